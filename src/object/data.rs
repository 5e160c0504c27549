//! The Object type - a fixed-length buffer owned by exactly one holder.

use bytes::{Bytes, BytesMut};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A fixed-length byte buffer issued by a [`Pool`](crate::Pool).
///
/// An `Object` is exactly `object_size` bytes long for its whole life. It
/// derefs to `[u8]`, so callers can read and write its contents but can never
/// grow or shrink it. Ownership is exclusive: an object is either sitting in
/// its pool or held by one caller, and handing it back with
/// [`Pool::put`](crate::Pool::put) consumes it.
///
/// Objects are fungible. Unless the pool erases on return, a freshly acquired
/// object may still hold bytes written by its previous user.
///
/// # Example
///
/// ```
/// use fixpool::{Pool, PoolConfig};
///
/// let pool = Pool::new(PoolConfig::new(16, 1)?)?;
///
/// let mut obj = pool.get().expect("pool has a free object");
/// obj[..5].copy_from_slice(b"hello");
/// assert_eq!(obj.len(), 16);
/// assert_eq!(&obj[..5], b"hello");
///
/// pool.put(obj);
/// # Ok::<(), fixpool::PoolError>(())
/// ```
pub struct Object {
    data: BytesMut,
    origin: u64,
}

impl Object {
    /// Allocates a zeroed object for the pool identified by `origin`.
    pub(crate) fn zeroed(size: usize, origin: u64) -> Self {
        Self {
            data: BytesMut::zeroed(size),
            origin,
        }
    }

    /// Empty placeholder left behind when a guard gives up its object.
    /// Does not allocate and belongs to no pool.
    pub(crate) fn detached() -> Self {
        Self {
            data: BytesMut::new(),
            origin: 0,
        }
    }

    /// Returns the id of the pool that issued this object.
    pub(crate) fn origin(&self) -> u64 {
        self.origin
    }

    /// Returns the length of the object in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the object has no bytes.
    ///
    /// Pools never issue empty objects, so this is always false for objects
    /// obtained from a [`Pool`](crate::Pool).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrites every byte with `byte`.
    pub fn fill(&mut self, byte: u8) {
        self.data.fill(byte);
    }

    /// Overwrites every byte with zero.
    pub fn zero(&mut self) {
        self.fill(0);
    }

    /// Copies the contents into an immutable [`Bytes`].
    ///
    /// The object itself stays with the caller and can be returned to the
    /// pool right away; the copy outlives it.
    pub fn freeze_copy(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}

impl Deref for Object {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Object {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Object {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("len", &self.data.len())
            .field("pool", &self.origin)
            .finish()
    }
}
