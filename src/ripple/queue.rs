//! Pending ripple events.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::types::Vec2;

/// A single disturbance waiting to be applied to the wave field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    /// Center in simulation UV space. Usually in `[0, 1]`, but contacts off
    /// the surface are kept as-is and left to the engine.
    pub center_uv: Vec2,
    /// Impulse strength, nominally `[0, 1]`. Not clamped.
    pub strength: f32,
    /// Push the surface up (true) or down (false)
    pub direction_up: bool,
}

impl Ripple {
    pub fn new(center_uv: Vec2, strength: f32, direction_up: bool) -> Self {
        Self {
            center_uv,
            strength,
            direction_up,
        }
    }
}

/// FIFO of ripples. Enqueue never fails; a starved consumer only adds latency.
#[derive(Clone, Debug, Default)]
pub struct RippleQueue {
    ripples: VecDeque<Ripple>,
}

impl RippleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, ripple: Ripple) {
        self.ripples.push_back(ripple);
    }

    /// Oldest pending ripple, if any
    pub fn dequeue(&mut self) -> Option<Ripple> {
        self.ripples.pop_front()
    }

    pub fn peek(&self) -> Option<&Ripple> {
        self.ripples.front()
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}

/// Clonable handle to a queue shared between threads.
///
/// Every operation takes the same mutex, so ordering and the
/// one-ripple-per-tick consumption are the same as [`RippleQueue`].
/// [`WaterSurface`](crate::water::WaterSurface) keeps its pending ripples in
/// one of these.
#[derive(Clone, Debug, Default)]
pub struct SharedRippleQueue {
    inner: Arc<Mutex<RippleQueue>>,
}

impl SharedRippleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the queue. A poisoned lock is recovered; the queue holds no
    /// invariant a panicking producer could break halfway.
    pub fn lock(&self) -> MutexGuard<'_, RippleQueue> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enqueue(&self, ripple: Ripple) {
        self.lock().enqueue(ripple);
    }

    pub fn dequeue(&self) -> Option<Ripple> {
        self.lock().dequeue()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ripple(n: f32) -> Ripple {
        Ripple::new(Vec2::splat(n), n, true)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = RippleQueue::new();
        for i in 0..5 {
            queue.enqueue(ripple(i as f32));
        }
        assert_eq!(queue.peek(), Some(&ripple(0.0)));
        for i in 0..5 {
            assert_eq!(queue.dequeue(), Some(ripple(i as f32)));
        }
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_out_of_range_values_kept() {
        let mut queue = RippleQueue::new();
        let r = Ripple::new(Vec2::new(-0.5, 3.0), 7.5, false);
        queue.enqueue(r);
        assert_eq!(queue.dequeue(), Some(r));
    }

    #[test]
    fn test_shared_queue_across_threads() {
        let queue = SharedRippleQueue::new();
        let producers: Vec<_> = (0..4)
            .map(|t| {
                let q = queue.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        q.enqueue(ripple((t * 100 + i) as f32));
                    }
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }
        assert_eq!(queue.len(), 100);

        // Each producer's ripples come out in the order it pushed them
        let mut last = [-1.0f32; 4];
        while let Some(r) = queue.dequeue() {
            let t = (r.strength / 100.0) as usize;
            assert!(r.strength > last[t]);
            last[t] = r.strength;
        }
        assert!(queue.is_empty());
    }
}
