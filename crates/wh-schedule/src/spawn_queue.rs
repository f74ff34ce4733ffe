//! `SpawnQueue` — binary min-heap of slot timers with O(1) bulk decrement.
//!
//! # Epoch offset
//!
//! Every tick decrements *all* remaining-tick counters by one.  Rewriting
//! each key would cost O(S) per tick.  Instead each entry stores the
//! absolute epoch at which it falls due:
//!
//!   due = epoch_at_insert + remaining
//!
//! and the queue keeps a single `epoch` counter.  Advancing one tick is
//! `epoch += 1`; an entry's remaining ticks are `due − epoch`.  Since every
//! key shifts by the same amount the heap order never changes.
//!
//! Ties on `due` break on `SlotId`, so the firing order inside a tick is
//! deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wh_core::SlotId;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct Entry {
    due:  u64,
    slot: SlotId,
}

/// Min-heap of `(remaining ticks, slot)` timers.
#[derive(Clone, Debug, Default)]
pub struct SpawnQueue {
    heap:  BinaryHeap<Reverse<Entry>>,
    epoch: u64,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `slot` to fall due after `remaining` more ticks.
    pub fn push(&mut self, slot: SlotId, remaining: u64) {
        self.heap.push(Reverse(Entry { due: self.epoch + remaining, slot }));
    }

    /// Decrement every entry's remaining ticks by one.
    #[inline]
    pub fn advance(&mut self) {
        self.epoch += 1;
    }

    /// Pop the minimum entry if its remaining ticks are ≤ 0.
    pub fn pop_due(&mut self) -> Option<SlotId> {
        let Reverse(top) = self.heap.peek()?;
        if top.due > self.epoch {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| e.slot)
    }

    /// The minimum entry and its remaining ticks, without removing it.
    pub fn peek(&self) -> Option<(SlotId, i64)> {
        self.heap
            .peek()
            .map(|Reverse(e)| (e.slot, e.due as i64 - self.epoch as i64))
    }

    /// Remaining ticks for `slot`, or `None` if it is not queued.  O(S).
    pub fn remaining(&self, slot: SlotId) -> Option<i64> {
        self.heap
            .iter()
            .find(|Reverse(e)| e.slot == slot)
            .map(|Reverse(e)| e.due as i64 - self.epoch as i64)
    }

    /// Ticks advanced since the queue was created or cleared.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry and rewind the epoch to zero.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.epoch = 0;
    }
}
