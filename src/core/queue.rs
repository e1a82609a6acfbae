//! Double-buffered multi-producer, single-consumer queue
//!
//! Producers push into the active buffer under a short lock. The single
//! drain thread swaps the buffers and then walks the previous active buffer
//! without touching the producer side again, so producers only ever contend
//! with each other and with the swap itself.

use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;

pub struct DoubleBufferedQueue<T> {
    active: Mutex<VecDeque<T>>,
    draining: Mutex<VecDeque<T>>,
}

impl<T> DoubleBufferedQueue<T> {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(VecDeque::new()),
            draining: Mutex::new(VecDeque::new()),
        }
    }

    /// Append to the active buffer.
    pub fn push(&self, item: T) {
        self.active.lock().push_back(item);
    }

    /// Exchange the buffers and hand the previous active buffer to the caller.
    ///
    /// Must only be called from the drain side. The returned batch keeps the
    /// draining buffer borrowed until it is dropped; anything not taken from
    /// it by then is discarded, and its capacity is reused on the next swap.
    pub fn swap_and_drain(&self) -> Drained<'_, T> {
        let mut draining = self.draining.lock();
        draining.clear();
        {
            let mut active = self.active.lock();
            std::mem::swap(&mut *active, &mut *draining);
        }
        Drained { buffer: draining }
    }

    /// Best-effort check of the active buffer.
    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }

    /// Number of entries waiting in the active buffer.
    pub fn len(&self) -> usize {
        self.active.lock().len()
    }
}

impl<T> Default for DoubleBufferedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries taken out of the queue by a single swap, in submission order.
pub struct Drained<'a, T> {
    buffer: MutexGuard<'a, VecDeque<T>>,
}

impl<T> Drained<'_, T> {
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl<T> Iterator for Drained<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<T> Drop for Drained<'_, T> {
    fn drop(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_swap_returns_submission_order() {
        let queue = DoubleBufferedQueue::new();
        for i in 0..5 {
            queue.push(i);
        }

        let drained: Vec<i32> = queue.swap_and_drain().collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_swap_on_empty_queue() {
        let queue: DoubleBufferedQueue<u8> = DoubleBufferedQueue::new();
        let drained = queue.swap_and_drain();
        assert!(drained.is_empty());
        drop(drained);

        queue.push(1);
        assert_eq!(queue.swap_and_drain().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_push_after_swap_lands_in_next_batch() {
        let queue = DoubleBufferedQueue::new();
        queue.push("a");
        let first = queue.swap_and_drain();
        queue.push("b");
        assert_eq!(first.collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.swap_and_drain().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_partially_consumed_batch_is_discarded() {
        let queue = DoubleBufferedQueue::new();
        queue.push(1);
        queue.push(2);
        {
            let mut drained = queue.swap_and_drain();
            assert_eq!(drained.next(), Some(1));
        }
        assert!(queue.swap_and_drain().is_empty());
    }

    #[test]
    fn test_concurrent_producers_lossless() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 1000;

        let queue = Arc::new(DoubleBufferedQueue::new());
        let handles: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        queue.push((p, i));
                    }
                })
            })
            .collect();

        let mut seen = Vec::new();
        while seen.len() < PRODUCERS * PER_PRODUCER {
            seen.extend(queue.swap_and_drain());
            if handles.iter().all(|h| h.is_finished()) {
                seen.extend(queue.swap_and_drain());
                break;
            }
        }
        for handle in handles {
            handle.join().expect("producer panicked");
        }
        seen.extend(queue.swap_and_drain());

        assert_eq!(seen.len(), PRODUCERS * PER_PRODUCER);
        for p in 0..PRODUCERS {
            let order: Vec<usize> = seen.iter().filter(|(q, _)| *q == p).map(|(_, i)| *i).collect();
            assert_eq!(order, (0..PER_PRODUCER).collect::<Vec<_>>());
        }
    }
}
