//! Construction parameters for a [`Warehouse`][crate::Warehouse].

use wh_core::Position;
use wh_layout::LayoutParams;
use wh_schedule::PeriodBounds;

/// How a move into an already occupied cell is resolved.
///
/// Robots act strictly in registry order, so the earlier robot always
/// reaches a contested cell first; the policy decides what happens to the
/// later one.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPolicy {
    /// The move completes, the cell's occupancy rises above one and a
    /// collision is recorded (and penalised by `collision_penalty`).
    #[default]
    Allow,
    /// The later robot stays where it is.
    Block,
}

/// Top-level warehouse configuration.
///
/// Typically built in code by the application (or deserialised with the
/// `serde` feature) and handed to
/// [`WarehouseBuilder`][crate::WarehouseBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarehouseConfig {
    /// Structural floor-plan parameters.
    pub layout: LayoutParams,

    /// Number of robots placed on reset.
    pub robots: usize,

    /// Packages each robot can carry at once.  Must be at least 1.
    pub capacity: usize,

    /// Packages placed on random shelves at every reset.  Must not exceed
    /// the number of shelf cells.
    pub packages: usize,

    /// Number of recurring spawn slots.  `None` uses `packages`.
    pub spawn_slots: Option<usize>,

    /// Inclusive bounds each slot's period is drawn from.
    pub spawn_period: PeriodBounds,

    /// Structural seed: fixes spawn-slot positions and periods.
    pub seed: u64,

    /// Runtime seed for package identifiers, destinations, and placement.
    /// `None` seeds from OS entropy, so runs differ between processes.
    pub runtime_seed: Option<u64>,

    /// Explicit drop-zone coordinates.  Must be non-shelf cells.
    pub drop_zones: Vec<Position>,

    pub collision_policy: CollisionPolicy,

    /// Subtracted from the tick reward per collision under
    /// [`CollisionPolicy::Allow`].
    pub collision_penalty: f64,

    /// Draw fresh spawn slots on every reset instead of keeping the ones
    /// sampled at construction.
    pub resample_slots_on_reset: bool,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            layout:                  LayoutParams::default(),
            robots:                  1,
            capacity:                1,
            packages:                10,
            spawn_slots:             None,
            spawn_period:            PeriodBounds::default(),
            seed:                    0,
            runtime_seed:            None,
            drop_zones:              vec![Position::new(0, 0)],
            collision_policy:        CollisionPolicy::Allow,
            collision_penalty:       0.0,
            resample_slots_on_reset: false,
        }
    }
}

impl WarehouseConfig {
    /// Effective number of spawn slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.spawn_slots.unwrap_or(self.packages)
    }
}
