//! Fluent builder for constructing a [`Warehouse`].

use std::collections::HashSet;

use wh_core::{Position, SimRng, Tick};
use wh_layout::{Grid, Layout};
use wh_schedule::SpawnSchedule;

use crate::{
    NoopObserver, PackageRegistry, RobotRegistry, SimError, SimResult, Warehouse,
    WarehouseConfig,
};

/// Fluent builder for [`Warehouse`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                   |
/// |------------------------|-------------------------------------------|
/// | `.robot_positions(v)`  | Distinct random floor cells on each reset |
///
/// # Example
///
/// ```rust,ignore
/// let mut warehouse = WarehouseBuilder::new(config)
///     .robot_positions(vec![Position::new(0, 3)])
///     .build()?;
/// let result = warehouse.step(&[Action::Pickup]);
/// ```
pub struct WarehouseBuilder {
    config:    WarehouseConfig,
    positions: Option<Vec<Position>>,
}

impl WarehouseBuilder {
    pub fn new(config: WarehouseConfig) -> Self {
        Self { config, positions: None }
    }

    /// Fix the start cell of every robot (must be length `config.robots`).
    ///
    /// Each position must be walkable and distinct.  Positions are reused on
    /// every reset.
    pub fn robot_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate the configuration, generate the floor plan, sample the spawn
    /// slots, and return a freshly reset [`Warehouse`].
    pub fn build(self) -> SimResult<Warehouse> {
        let config = self.config;

        // ── Validate scalar parameters ────────────────────────────────────
        if config.capacity == 0 {
            return Err(SimError::Config("robot capacity must be at least 1".into()));
        }
        if !config.collision_penalty.is_finite() {
            return Err(SimError::Config("collision penalty must be finite".into()));
        }

        // ── Floor plan ────────────────────────────────────────────────────
        let layout = Layout::generate(config.layout)?;
        let shelves = config.layout.shelf_count();
        if config.packages > shelves {
            return Err(SimError::TooManyPackages { requested: config.packages, shelves });
        }
        if config.drop_zones.is_empty() && (config.packages > 0 || config.slot_count() > 0) {
            return Err(SimError::Config(
                "at least one drop zone is required when packages can exist".into(),
            ));
        }
        let grid = Grid::new(&layout, &config.drop_zones)?;

        // ── Explicit robot positions ──────────────────────────────────────
        if let Some(positions) = &self.positions {
            if positions.len() != config.robots {
                return Err(SimError::RobotCountMismatch {
                    expected: config.robots,
                    got:      positions.len(),
                });
            }
            if let Some(bad) = positions.iter().find(|&&p| !grid.is_walkable(p)) {
                return Err(SimError::Config(format!("robot start {bad} is not a walkable cell")));
            }
            let mut seen = HashSet::with_capacity(positions.len());
            if let Some(dup) = positions.iter().find(|&&p| !seen.insert(p)) {
                return Err(SimError::Config(format!("two robots start on {dup}")));
            }
        }

        // ── Spawn slots (structural seed) ─────────────────────────────────
        let schedule = SpawnSchedule::sample(
            grid.shelf_positions(),
            config.slot_count(),
            config.spawn_period,
            config.seed,
        )?;

        // ── Runtime RNG: reproducible only when pinned ────────────────────
        let rng = match config.runtime_seed {
            Some(seed) => SimRng::new(seed),
            None       => SimRng::from_entropy(),
        };

        let mut warehouse = Warehouse {
            config,
            layout,
            grid,
            schedule,
            packages:        PackageRegistry::new(),
            robots:          RobotRegistry::new(),
            robot_positions: self.positions,
            rng,
            tick:            Tick::ZERO,
            collisions:      0,
            delivered:       0,
        };
        warehouse.reset_state(&mut NoopObserver);
        Ok(warehouse)
    }
}
