//! Core pool engine - acquire, release and on-demand growth.
//!
//! The available objects live in a lock-free bounded queue. Acquire and
//! release only ever need the shared side of the store lock, so the fast path
//! never serializes callers against each other. Growth swaps in a larger
//! queue and therefore takes the exclusive side; acquirers that arrive while
//! a growth is running wait for it to finish instead of touching a
//! half-built queue.
//!
//! # Example
//!
//! ```
//! use fixpool::{Pool, PoolConfig};
//!
//! let config = PoolConfig::new(8, 1)?.with_grow_factor(3);
//! let pool = Pool::new(config)?;
//!
//! let first = pool.get().expect("initial object");
//! let second = pool.get().expect("grown on exhaustion");
//! assert_eq!(pool.total(), 3);
//!
//! pool.put(first);
//! pool.put(second);
//! assert_eq!(pool.available(), 3);
//! # Ok::<(), fixpool::PoolError>(())
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering, fence};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, RwLock};
use tracing::{debug, trace, warn};

use super::guard::PooledObject;
use super::stats::{Counters, PoolStats};
use super::store::Store;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::object::Object;

/// Source of pool ids; each pool tags the objects it issues with its id.
static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// State shared by every handle to one pool.
pub(crate) struct Shared {
    id: u64,
    config: PoolConfig,
    store: RwLock<Store>,
    counters: Counters,
    /// Callers parked in `wait_for_object`.
    waiters: AtomicUsize,
    wait_lock: Mutex<()>,
    wakeup: Condvar,
}

impl Shared {
    fn get(&self) -> Option<Object> {
        let popped = self.store.read().pop();
        if let Some(obj) = popped {
            self.counters.hit();
            return Some(obj);
        }

        if !self.config.grows() {
            self.counters.miss();
            trace!(pool = self.id, "pool exhausted");
            return None;
        }

        self.grow_and_pop()
    }

    /// Runs one growth under the exclusive lock and takes an object from the
    /// grown store before anyone else can.
    fn grow_and_pop(&self) -> Option<Object> {
        let (obj, grew) = {
            let mut store = self.store.write();

            // Another caller may have grown the store, or returned an
            // object, while this one waited for the lock.
            if let Some(obj) = store.pop() {
                (Some(obj), false)
            } else {
                let from = store.count();
                let target = self.config.growth_target(from);
                let added = store.grow(target, self.config.object_size(), self.id);

                if added == 0 {
                    debug!(
                        pool = self.id,
                        count = from,
                        grow_factor = self.config.grow_factor(),
                        max_count = ?self.config.max_count(),
                        "pool exhausted and cannot grow further"
                    );
                    (None, false)
                } else {
                    debug!(pool = self.id, from, to = target, added, "pool grown");
                    (store.pop(), true)
                }
            }
        };

        if grew {
            self.counters.grew();
            self.wake_all();
        }

        match obj {
            Some(obj) => {
                self.counters.hit();
                Some(obj)
            }
            None => {
                self.counters.miss();
                None
            }
        }
    }

    pub(crate) fn put(&self, mut obj: Object) {
        if obj.origin() != self.id {
            self.counters.rejected();
            warn!(
                pool = self.id,
                origin = obj.origin(),
                len = obj.len(),
                "dropping object returned to a pool that did not issue it"
            );
            return;
        }

        if self.config.erase_on_return() {
            obj.zero();
        }

        let pushed = self.store.read().push(obj);
        match pushed {
            Ok(()) => self.counters.returned(),
            Err(obj) => {
                // Only reachable if an object was duplicated outside the pool.
                self.counters.overflowed();
                warn!(pool = self.id, len = obj.len(), "pool full, dropping returned object");
                return;
            }
        }

        fence(Ordering::SeqCst);
        if self.waiters.load(Ordering::SeqCst) > 0 {
            let _guard = self.wait_lock.lock();
            self.wakeup.notify_one();
        }
    }

    fn wake_all(&self) {
        if self.waiters.load(Ordering::SeqCst) > 0 {
            let _guard = self.wait_lock.lock();
            self.wakeup.notify_all();
        }
    }

    /// Parks until an object is returned or `deadline` passes.
    fn wait_for_object(&self, deadline: Option<Instant>) -> Option<Object> {
        self.waiters.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.wait_lock.lock();

        let obj = loop {
            let popped = self.store.read().pop();
            if popped.is_some() {
                break popped;
            }

            match deadline {
                Some(deadline) => {
                    if self.wakeup.wait_until(&mut guard, deadline).timed_out() {
                        break self.store.read().pop();
                    }
                }
                None => self.wakeup.wait(&mut guard),
            }
        };

        drop(guard);
        self.waiters.fetch_sub(1, Ordering::SeqCst);

        match obj {
            Some(obj) => {
                self.counters.hit();
                Some(obj)
            }
            None => {
                self.counters.miss();
                trace!(pool = self.id, "timed out waiting for an object");
                None
            }
        }
    }
}

/// A fixed-object-size memory pool.
///
/// `Pool` is a cheap, cloneable handle: clones share the same objects and
/// can be moved to other threads. Separate calls to [`Pool::new`] build
/// independent pools.
///
/// # Acquire and release
///
/// - [`get`](Pool::get) never blocks on other callers. It returns `None`
///   when the pool is exhausted and may not grow.
/// - [`put`](Pool::put) hands an object back, zeroing it first when the pool
///   erases on return. It never fails.
/// - [`checkout`](Pool::checkout) wraps an object in a guard that returns it
///   on drop.
/// - [`get_timeout`](Pool::get_timeout) is the blocking variant: it waits
///   for a release instead of giving up immediately.
///
/// # Growth
///
/// With a positive grow factor `g`, an acquire that finds the pool empty
/// multiplies the managed object count by `g` (bounded by the optional
/// `max_count`). Only new objects are allocated; outstanding objects keep
/// their place and rejoin the pool when returned. Growth runs at most once
/// at a time.
///
/// # Example
///
/// ```
/// use fixpool::{Pool, PoolConfig};
///
/// let pool = Pool::new(PoolConfig::new(16, 2)?)?;
///
/// let a = pool.get().unwrap();
/// let b = pool.get().unwrap();
/// assert!(pool.get().is_none()); // fixed size, exhausted
///
/// pool.put(a);
/// pool.put(b);
/// assert_eq!(pool.available(), 2);
/// # Ok::<(), fixpool::PoolError>(())
/// ```
#[derive(Clone)]
pub struct Pool {
    shared: Arc<Shared>,
}

impl Pool {
    /// Builds a pool and allocates `initial_count` zeroed objects.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if the configuration does
    /// not validate.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;

        let id = NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed);
        let store = Store::with_objects(config.object_size(), config.initial_count(), id);

        if config.grow_factor() == 1 {
            warn!(pool = id, "grow factor 1 never adds objects; the pool behaves as fixed size");
        }
        debug!(
            pool = id,
            object_size = config.object_size(),
            initial_count = config.initial_count(),
            grow_factor = config.grow_factor(),
            erase_on_return = config.erase_on_return(),
            "pool created"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                id,
                config,
                store: RwLock::new(store),
                counters: Counters::default(),
                waiters: AtomicUsize::new(0),
                wait_lock: Mutex::new(()),
                wakeup: Condvar::new(),
            }),
        })
    }

    /// Acquires an object, growing the pool first if it is empty and growth
    /// is enabled.
    ///
    /// Returns `None` when no object is available and the pool cannot grow.
    /// This is an expected outcome, not an error.
    #[inline]
    pub fn get(&self) -> Option<Object> {
        self.shared.get()
    }

    /// Returns an object to the pool.
    ///
    /// Objects issued by a different pool are dropped instead of being
    /// inserted, so they can never inflate this pool's count.
    #[inline]
    pub fn put(&self, obj: Object) {
        self.shared.put(obj)
    }

    /// Acquires an object wrapped in a guard that returns it on drop.
    pub fn checkout(&self) -> Option<PooledObject> {
        self.get()
            .map(|obj| PooledObject::new(obj, Arc::downgrade(&self.shared)))
    }

    /// Acquires an object, waiting up to `timeout` for one to be returned if
    /// the pool is exhausted.
    ///
    /// Growth is tried first, exactly as in [`get`](Pool::get). A timeout
    /// too large to represent waits indefinitely.
    pub fn get_timeout(&self, timeout: Duration) -> Option<Object> {
        if let Some(obj) = self.get() {
            return Some(obj);
        }
        if timeout.is_zero() {
            return None;
        }

        self.shared.wait_for_object(Instant::now().checked_add(timeout))
    }

    /// Acquires from `pool` if there is one; an absent pool yields `None`.
    pub fn get_opt(pool: Option<&Pool>) -> Option<Object> {
        pool.and_then(Pool::get)
    }

    /// Returns `obj` to `pool` if there is one; an absent pool is a no-op.
    pub fn put_opt(pool: Option<&Pool>, obj: Object) {
        if let Some(pool) = pool {
            pool.put(obj);
        }
    }

    /// Returns the configuration the pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    /// Returns the size of every object in bytes.
    pub fn object_size(&self) -> usize {
        self.shared.config.object_size()
    }

    /// Returns the grow factor.
    pub fn grow_factor(&self) -> i32 {
        self.shared.config.grow_factor()
    }

    /// Returns whether objects are zeroed on return.
    pub fn erase_on_return(&self) -> bool {
        self.shared.config.erase_on_return()
    }

    /// Returns the number of objects managed, available or outstanding.
    pub fn total(&self) -> usize {
        self.shared.store.read().count()
    }

    /// Returns the number of objects ready to be acquired.
    pub fn available(&self) -> usize {
        self.shared.store.read().available()
    }

    /// Returns the number of objects currently held by callers.
    pub fn outstanding(&self) -> usize {
        let store = self.shared.store.read();
        store.count().saturating_sub(store.available())
    }

    /// Returns a statistics snapshot.
    pub fn stats(&self) -> PoolStats {
        let (total, available) = {
            let store = self.shared.store.read();
            (store.count(), store.available())
        };
        self.shared
            .counters
            .snapshot(self.object_size(), total, available)
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.shared.id)
            .field("config", &self.shared.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Weak handle used by guards so an outstanding guard never keeps a pool
/// alive on its own.
pub(crate) type WeakShared = Weak<Shared>;
