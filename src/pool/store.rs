//! Backing store: the available queue plus the total object count.

use crossbeam_queue::ArrayQueue;

use crate::object::Object;

/// The queue of available objects and the number of objects the pool manages.
///
/// The queue capacity always equals `count`, so every object the pool ever
/// issued fits back in. Shared access (`&Store`) is enough for `pop`/`push`;
/// replacing the queue during growth needs `&mut Store`.
pub(crate) struct Store {
    queue: ArrayQueue<Object>,
    count: usize,
}

impl Store {
    /// Builds a store holding `count` zeroed objects of `size` bytes.
    pub(crate) fn with_objects(size: usize, count: usize, origin: u64) -> Self {
        let queue = ArrayQueue::new(count);
        for _ in 0..count {
            let pushed = queue.push(Object::zeroed(size, origin));
            debug_assert!(pushed.is_ok());
        }
        Self { queue, count }
    }

    #[inline]
    pub(crate) fn pop(&self) -> Option<Object> {
        self.queue.pop()
    }

    /// Pushes an object back. Fails only if the queue is already full, which
    /// means the object was never issued by this store.
    #[inline]
    pub(crate) fn push(&self, obj: Object) -> Result<(), Object> {
        self.queue.push(obj)
    }

    /// Number of objects currently available.
    #[inline]
    pub(crate) fn available(&self) -> usize {
        self.queue.len()
    }

    /// Number of objects managed, available or outstanding.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Grows the store to `target` objects and returns how many were added.
    ///
    /// Available objects move to a larger queue; `target - count` fresh zeroed
    /// objects join them. Outstanding objects are untouched and land in the
    /// new queue when they are returned.
    pub(crate) fn grow(&mut self, target: usize, size: usize, origin: u64) -> usize {
        if target <= self.count {
            return 0;
        }

        let next = ArrayQueue::new(target);
        while let Some(obj) = self.queue.pop() {
            let pushed = next.push(obj);
            debug_assert!(pushed.is_ok(), "grown queue smaller than live objects");
        }

        let added = target - self.count;
        for _ in 0..added {
            let pushed = next.push(Object::zeroed(size, origin));
            debug_assert!(pushed.is_ok(), "grown queue smaller than live objects");
        }

        self.queue = next;
        self.count = target;
        added
    }
}
