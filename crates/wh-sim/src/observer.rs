//! Observer trait for progress reporting and statistics collection.

use wh_core::{Position, RobotId, SlotId, Tick};

use crate::Package;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickStats {
    /// Packages created by spawn slots.
    pub spawned:       usize,
    /// Slot firings whose shelf was still occupied.
    pub spawn_skipped: usize,
    pub picked_up:     usize,
    pub delivered:     usize,
    pub collisions:    usize,
    /// Deliveries minus collision penalties.
    pub reward:        f64,
}

/// Callbacks invoked by [`Warehouse`][crate::Warehouse] at key points of
/// reset and the tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Deliveries(usize);
///
/// impl WarehouseObserver for Deliveries {
///     fn on_drop(&mut self, _tick: Tick, _robot: RobotId, _package: &Package) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait WarehouseObserver {
    /// Called after a reset has placed robots and initial packages.
    fn on_reset(&mut self, _robots: usize, _packages: usize) {}

    /// Called at the very start of each tick, before the spawn phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A spawn slot created `package`.
    fn on_spawn(&mut self, _tick: Tick, _slot: SlotId, _package: &Package) {}

    /// A spawn slot fired but its shelf still held a package.
    fn on_spawn_skipped(&mut self, _tick: Tick, _slot: SlotId, _shelf: Position) {}

    fn on_pickup(&mut self, _tick: Tick, _robot: RobotId, _package: &Package) {}

    /// `package` was delivered and removed from the simulation.
    fn on_drop(&mut self, _tick: Tick, _robot: RobotId, _package: &Package) {}

    /// `robot` moved onto `cell`, which now holds `occupancy` robots.
    fn on_collision(&mut self, _tick: Tick, _robot: RobotId, _cell: Position, _occupancy: u32) {}

    /// Fewer distinct sites than requested were available for `what`
    /// (`"robots"` or `"packages"`).
    fn on_placement_exhausted(&mut self, _what: &'static str, _requested: usize, _placed: usize) {}

    /// Called at the end of each tick with its statistics.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}
}

/// A [`WarehouseObserver`] that does nothing.
pub struct NoopObserver;

impl WarehouseObserver for NoopObserver {}
