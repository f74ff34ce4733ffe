//! `SpawnSchedule` — the perpetual recurring-event schedule.

use wh_core::{Position, SlotId};

use crate::{PeriodBounds, ScheduleResult, SpawnQueue, SpawnSlot};

/// Spawn slots plus the timer queue that drives them.
///
/// Slots are fixed at construction; [`reset`](Self::reset) rewinds every
/// timer to its full period and [`resample`](Self::resample) draws a new set
/// of slots.
#[derive(Clone, Debug)]
pub struct SpawnSchedule {
    slots:  Vec<SpawnSlot>,
    queue:  SpawnQueue,
    bounds: PeriodBounds,
}

impl SpawnSchedule {
    /// Build a schedule from pre-sampled slots.  Every timer starts at its
    /// full period.
    pub fn new(slots: Vec<SpawnSlot>, bounds: PeriodBounds) -> Self {
        let mut schedule = Self { slots, queue: SpawnQueue::new(), bounds };
        schedule.reset();
        schedule
    }

    /// Sample `count` slots from `shelves` with `seed` and build the schedule.
    pub fn sample(
        shelves: &[Position],
        count:   usize,
        bounds:  PeriodBounds,
        seed:    u64,
    ) -> ScheduleResult<Self> {
        let slots = SpawnSlot::sample(shelves, count, bounds, seed)?;
        Ok(Self::new(slots, bounds))
    }

    /// Rewind every timer to its slot's full period.
    pub fn reset(&mut self) {
        self.queue.clear();
        for slot in &self.slots {
            self.queue.push(slot.id, slot.period as u64);
        }
    }

    /// Replace the slots with a fresh sample and reset the timers.
    pub fn resample(&mut self, shelves: &[Position], seed: u64) -> ScheduleResult<()> {
        self.slots = SpawnSlot::sample(shelves, self.slots.len(), self.bounds, seed)?;
        self.reset();
        Ok(())
    }

    /// Advance one tick and return every slot that fell due, in firing
    /// order.
    ///
    /// Each fired slot is already back in the queue with its full period by
    /// the time this returns; whether the caller manages to spawn a package
    /// has no effect on the timer.
    pub fn tick(&mut self) -> Vec<SpawnSlot> {
        self.queue.advance();

        let mut fired = Vec::new();
        while let Some(id) = self.queue.pop_due() {
            let slot = self.slots[id.index()];
            fired.push(slot);
            self.queue.push(id, slot.period as u64);
        }
        fired
    }

    pub fn slots(&self) -> &[SpawnSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&SpawnSlot> {
        self.slots.get(id.index())
    }

    pub fn queue(&self) -> &SpawnQueue {
        &self.queue
    }

    pub fn bounds(&self) -> PeriodBounds {
        self.bounds
    }
}
