//! RAII guard that returns an object to its pool on drop.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use super::engine::WeakShared;
use crate::object::Object;

/// An object checked out with [`Pool::checkout`](crate::Pool::checkout).
///
/// Derefs to [`Object`]. Dropping the guard returns the object to the pool
/// it came from; if that pool has already been dropped, the object is simply
/// freed.
pub struct PooledObject {
    obj: Object,
    pool: WeakShared,
}

impl PooledObject {
    pub(crate) fn new(obj: Object, pool: WeakShared) -> Self {
        Self { obj, pool }
    }

    /// Takes the object out of the guard without returning it to the pool.
    ///
    /// The object can still be handed back later with
    /// [`Pool::put`](crate::Pool::put).
    pub fn detach(mut self) -> Object {
        self.pool = WeakShared::new();
        mem::replace(&mut self.obj, Object::detached())
    }
}

impl Deref for PooledObject {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.obj
    }
}

impl DerefMut for PooledObject {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.obj
    }
}

impl fmt::Debug for PooledObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledObject").field(&self.obj).finish()
    }
}

impl Drop for PooledObject {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.upgrade() {
            pool.put(mem::replace(&mut self.obj, Object::detached()));
        }
    }
}
