//! Fixed-capacity work queues with lock-free append.
//!
//! A [`WorkQueue`] is an arena of pre-allocated slots. Producers reserve a
//! slot with an atomic counter and write it exactly once; consumers only read
//! after the producing phase has finished. When the arena is full the item is
//! dropped and a sticky overflow flag is raised instead of growing.

use crate::ray::PathRay;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Capacity-bounded, append-only buffer shared by parallel producers.
pub struct WorkQueue<T> {
    slots: Vec<OnceLock<T>>,
    len: AtomicUsize,
    overflowed: AtomicBool,
}

impl<T> WorkQueue<T> {
    /// Allocate a queue with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| OnceLock::new()).collect(),
            len: AtomicUsize::new(0),
            overflowed: AtomicBool::new(false),
        }
    }

    /// Number of reserved slots. Never exceeds the capacity.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an append has been dropped since the last [`reset`](Self::reset).
    pub fn overflowed(&self) -> bool {
        self.overflowed.load(Ordering::Relaxed)
    }

    /// Append an item, returning its index.
    ///
    /// Returns `None` and raises the overflow flag if the queue is full.
    pub fn push(&self, item: T) -> Option<usize> {
        let capacity = self.slots.len();
        let reserved = self
            .len
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < capacity).then_some(n + 1)
            });

        match reserved {
            Ok(index) => {
                let written = self.slots[index].set(item).is_ok();
                debug_assert!(written, "slot {} reserved twice", index);
                Some(index)
            }
            Err(_) => {
                self.overflowed.store(true, Ordering::Relaxed);
                None
            }
        }
    }

    /// Get the item at `index`, if it has been written.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(OnceLock::get)
    }

    /// Iterate written items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len()].iter().filter_map(OnceLock::get)
    }

    /// Drop all items. The overflow flag is kept.
    pub fn clear(&mut self) {
        let len = *self.len.get_mut();
        for slot in &mut self.slots[..len] {
            slot.take();
        }
        *self.len.get_mut() = 0;
    }

    /// Drop all items and lower the overflow flag.
    pub fn reset(&mut self) {
        self.clear();
        *self.overflowed.get_mut() = false;
    }
}

impl<T: Send + Sync> WorkQueue<T> {
    /// Parallel iteration over `(index, item)` pairs.
    pub fn par_iter(&self) -> impl ParallelIterator<Item = (usize, &T)> + '_ {
        self.slots[..self.len()]
            .par_iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.get().map(|item| (index, item)))
    }
}

/// Double-buffered ray storage for one tile.
///
/// `current` is consumed by a processing pass while `next` collects the
/// rays it spawns; [`promote`](Self::promote) then swaps the two.
pub struct RayPools {
    pub current: WorkQueue<PathRay>,
    pub next: WorkQueue<PathRay>,
}

impl RayPools {
    /// Allocate both buffers with `capacity` slots each.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: WorkQueue::with_capacity(capacity),
            next: WorkQueue::with_capacity(capacity),
        }
    }

    /// Empty both buffers and clear overflow flags for a new tile.
    pub fn reset(&mut self) {
        self.current.reset();
        self.next.reset();
    }

    /// Make the rays spawned by the last pass current, and empty `next`.
    pub fn promote(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }

    /// Whether either buffer dropped a ray since the last reset.
    pub fn overflowed(&self) -> bool {
        self.current.overflowed() || self.next.overflowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raychi_math::{Ray, Vec3};

    fn ray(pixel: u32) -> PathRay {
        PathRay::primary(pixel, Ray::new(Vec3::ZERO, Vec3::Z), 4)
    }

    #[test]
    fn test_push_and_get() {
        let queue = WorkQueue::with_capacity(4);
        assert_eq!(queue.push(10), Some(0));
        assert_eq!(queue.push(20), Some(1));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(1), Some(&20));
        assert_eq!(queue.get(2), None);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_overflow_is_safe() {
        let queue = WorkQueue::with_capacity(1);
        assert_eq!(queue.push(ray(1)), Some(0));
        assert!(!queue.overflowed());

        assert_eq!(queue.push(ray(2)), None);
        assert_eq!(queue.push(ray(3)), None);
        assert!(queue.overflowed());
        assert_eq!(queue.len(), 1);

        // The ray written before the overflow is intact
        assert_eq!(queue.get(0).map(|r| r.pixel_index), Some(1));
    }

    #[test]
    fn test_clear_keeps_flag_reset_drops_it() {
        let mut queue = WorkQueue::with_capacity(1);
        queue.push(1);
        queue.push(2);

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.overflowed());
        assert_eq!(queue.push(3), Some(0));

        queue.reset();
        assert!(queue.is_empty());
        assert!(!queue.overflowed());
    }

    #[test]
    fn test_concurrent_push_never_exceeds_capacity() {
        let queue = WorkQueue::with_capacity(1000);
        (0..5000u32).into_par_iter().for_each(|i| {
            queue.push(i);
        });

        assert_eq!(queue.len(), 1000);
        assert!(queue.overflowed());
        assert_eq!(queue.par_iter().count(), 1000);

        // Every stored value is distinct
        let mut values: Vec<u32> = queue.iter().copied().collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 1000);
    }

    #[test]
    fn test_promote_swaps_buffers() {
        let mut pools = RayPools::with_capacity(4);
        pools.current.push(ray(1));
        pools.next.push(ray(2));
        pools.next.push(ray(3));

        pools.promote();
        assert_eq!(pools.current.len(), 2);
        assert!(pools.next.is_empty());
        assert_eq!(pools.current.get(0).map(|r| r.pixel_index), Some(2));
    }

    #[test]
    fn test_pool_overflow_sticky_across_promote() {
        let mut pools = RayPools::with_capacity(1);
        pools.next.push(ray(1));
        pools.next.push(ray(2));
        pools.promote();
        assert!(pools.overflowed());

        pools.reset();
        assert!(!pools.overflowed());
        assert!(pools.current.is_empty());
    }
}
