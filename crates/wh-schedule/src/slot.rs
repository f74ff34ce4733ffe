//! Spawn slots: fixed shelf positions bound to a recurring period.

use wh_core::{Position, SimRng, SlotId, SlotRng};

use crate::{ScheduleError, ScheduleResult};

/// Inclusive `[lower, upper]` range a slot's period is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodBounds {
    pub lower: u32,
    pub upper: u32,
}

impl PeriodBounds {
    pub fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// Both bounds equal to `period`.
    pub fn fixed(period: u32) -> Self {
        Self::new(period, period)
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.lower == 0 {
            return Err(ScheduleError::Config("spawn period lower bound must be at least 1".into()));
        }
        if self.lower > self.upper {
            return Err(ScheduleError::Config(format!(
                "spawn period bounds inverted: {} > {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

impl Default for PeriodBounds {
    fn default() -> Self {
        Self::new(10, 30)
    }
}

/// A shelf position that periodically attempts to spawn a package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSlot {
    pub id:       SlotId,
    pub position: Position,
    /// Ticks between firings; never zero.
    pub period:   u32,
}

impl SpawnSlot {
    /// Sample `count` distinct shelves and give each an independently drawn
    /// period.  The same `seed` always yields the same slots.
    ///
    /// # Errors
    ///
    /// Invalid `bounds`, or more slots than `shelves`.
    pub fn sample(
        shelves: &[Position],
        count:   usize,
        bounds:  PeriodBounds,
        seed:    u64,
    ) -> ScheduleResult<Vec<SpawnSlot>> {
        bounds.validate()?;
        if count > shelves.len() {
            return Err(ScheduleError::NotEnoughShelves {
                requested: count,
                available: shelves.len(),
            });
        }

        let mut rng = SimRng::new(seed);
        let picked = rng.sample_indices(shelves.len(), count);

        Ok(picked
            .into_iter()
            .enumerate()
            .map(|(i, shelf)| {
                let id = SlotId(i as u32);
                let period = SlotRng::new(seed, id).gen_range(bounds.lower..=bounds.upper);
                SpawnSlot { id, position: shelves[shelf], period }
            })
            .collect())
    }
}
