//! Per-pylon strike timers as a single min-heap, ticked once per frame.
//!
//! Each pylon has at most one armed entry. Re-scheduling or cancelling
//! bumps the pylon's generation, so older heap entries are discarded
//! lazily when they reach the top. Cancellation is synchronous: once
//! `cancel` returns, `pop_due` can never yield that pylon's old timer.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Heap entry. Field order gives the ordering: time, then pylon id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    fire_at_ms: u64,
    pylon_id: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    generation: u64,
    fire_at_ms: u64,
}

#[derive(Debug, Default)]
pub struct StrikeScheduler {
    heap: BinaryHeap<Reverse<Entry>>,
    armed: HashMap<u32, Armed>,
    next_generation: u64,
}

impl StrikeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the pylon's timer. Replaces any pending timer.
    pub fn schedule(&mut self, pylon_id: u32, fire_at_ms: u64) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.armed.insert(
            pylon_id,
            Armed {
                generation,
                fire_at_ms,
            },
        );
        self.heap.push(Reverse(Entry {
            fire_at_ms,
            pylon_id,
            generation,
        }));
    }

    /// Invalidate the pylon's pending timer. Returns whether one was armed.
    pub fn cancel(&mut self, pylon_id: u32) -> bool {
        self.armed.remove(&pylon_id).is_some()
    }

    pub fn is_armed(&self, pylon_id: u32) -> bool {
        self.armed.contains_key(&pylon_id)
    }

    /// Fire time of the pylon's pending timer.
    pub fn fire_at(&self, pylon_id: u32) -> Option<u64> {
        self.armed.get(&pylon_id).map(|a| a.fire_at_ms)
    }

    /// Pop the next live timer due at or before `now_ms`. The popped pylon
    /// is disarmed; the caller re-schedules it.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<u32> {
        while let Some(Reverse(top)) = self.heap.peek().copied() {
            if top.fire_at_ms > now_ms {
                return None;
            }
            self.heap.pop();
            let live = self
                .armed
                .get(&top.pylon_id)
                .is_some_and(|a| a.generation == top.generation);
            if live {
                self.armed.remove(&top.pylon_id);
                return Some(top.pylon_id);
            }
        }
        None
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.armed.clear();
    }
}
