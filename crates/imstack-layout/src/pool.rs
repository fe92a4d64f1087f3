// crates/imstack-layout/src/pool.rs

use crate::{LayoutEntry, LayoutGroup};

/// Capacity used by the engine for each of its node pools.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// Objects that can be parked in an [`ObjectPool`] between frames.
pub trait Poolable: Default {
    /// Drop per-frame state while keeping owned allocations for reuse.
    fn recycle(&mut self);
}

/// Counters describing how a pool has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Objects created because the free list was empty.
    pub allocated: usize,
    /// Objects handed out from the free list.
    pub reused: usize,
    /// Objects currently parked in the free list.
    pub idle: usize,
}

/// Free list of boxed objects.
///
/// Boxes keep their address while parked, so a recycled node also keeps
/// any capacity it owns (child vectors, tag strings). Objects returned
/// when the free list is full are dropped.
#[derive(Debug)]
pub struct ObjectPool<T: Poolable> {
    free: Vec<Box<T>>,
    capacity: usize,
    allocated: usize,
    reused: usize,
}

impl<T: Poolable> ObjectPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            allocated: 0,
            reused: 0,
        }
    }

    pub fn get(&mut self) -> Box<T> {
        match self.free.pop() {
            Some(item) => {
                self.reused += 1;
                item
            }
            None => {
                self.allocated += 1;
                Box::default()
            }
        }
    }

    pub fn put(&mut self, mut item: Box<T>) {
        if self.free.len() < self.capacity {
            item.recycle();
            self.free.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            allocated: self.allocated,
            reused: self.reused,
            idle: self.free.len(),
        }
    }
}

impl<T: Poolable> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// The two pools one engine draws its nodes from.
#[derive(Debug, Default)]
pub struct NodePools {
    pub entries: ObjectPool<LayoutEntry>,
    pub groups: ObjectPool<LayoutGroup>,
}

impl NodePools {
    pub fn with_capacity(entries: usize, groups: usize) -> Self {
        Self {
            entries: ObjectPool::new(entries),
            groups: ObjectPool::new(groups),
        }
    }

    pub fn stats(&self) -> NodePoolStats {
        NodePoolStats {
            entries: self.entries.stats(),
            groups: self.groups.stats(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodePoolStats {
    pub entries: PoolStats,
    pub groups: PoolStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Scratch {
        items: Vec<u32>,
        recycled: bool,
    }

    impl Poolable for Scratch {
        fn recycle(&mut self) {
            self.items.clear();
            self.recycled = true;
        }
    }

    #[test]
    fn test_pool_reuses_returned_objects() {
        let mut pool: ObjectPool<Scratch> = ObjectPool::new(4);
        let mut item = pool.get();
        item.items.extend([1, 2, 3]);
        let address = &*item as *const Scratch;
        pool.put(item);

        let again = pool.get();
        assert_eq!(&*again as *const Scratch, address);
        assert!(again.recycled);
        assert!(again.items.is_empty());
        assert!(again.items.capacity() >= 3);
        assert_eq!(pool.stats(), PoolStats { allocated: 1, reused: 1, idle: 0 });
    }

    #[test]
    fn test_pool_drops_beyond_capacity() {
        let mut pool: ObjectPool<Scratch> = ObjectPool::new(1);
        let a = pool.get();
        let b = pool.get();
        pool.put(a);
        pool.put(b);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.stats().allocated, 2);
    }

    #[test]
    fn test_empty_pool_allocates() {
        let mut pool: ObjectPool<Scratch> = ObjectPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), DEFAULT_POOL_CAPACITY);
        let item = pool.get();
        assert!(!item.recycled);
        assert_eq!(pool.stats().reused, 0);
    }
}
