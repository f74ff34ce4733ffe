//! The `Warehouse` struct and its step function.

use tracing::{debug, trace, warn};
use wh_core::{Direction, PackageId, Position, RobotId, SimRng, Tick};
use wh_layout::{Grid, Layout, LayoutError};
use wh_schedule::SpawnSchedule;

use crate::{
    Action, CollisionPolicy, Controller, Frame, NoopObserver, Observation, Package,
    PackageRegistry, RobotRegistry, SimError, SimResult, StepResult, TickStats,
    WarehouseConfig, WarehouseObserver,
};

// ── Warehouse ─────────────────────────────────────────────────────────────────

/// A running warehouse simulation.
///
/// `Warehouse` owns every piece of state and advances it one tick per
/// [`step`](Self::step):
///
/// 1. **Spawn**: advance the slot timers; every slot that falls due creates
///    a package on its shelf if the shelf is empty.  The timer is reset
///    either way.
/// 2. **Act** (strictly ascending `RobotId`): each robot applies its action
///    against the grid as already updated by the robots before it.
///    - *Move*: legal iff the target is in bounds and walkable (floor or drop
///      zone).  A move onto an occupied cell is a collision, resolved by the
///      configured [`CollisionPolicy`].
///    - *Pickup*: take packages from the four adjacent shelves, scanned up,
///      down, left, right, until capacity is reached.
///    - *Drop*: deliver every carried package whose destination is adjacent;
///      +1 reward each.
/// 3. **Advance** the tick counter and return the observation and reward.
///
/// Illegal actions are silent no-ops, so `step` never fails.
///
/// `Warehouse` is `Clone`; a clone shares no mutable state with the
/// original (see [`branch`](Self::branch)).
///
/// Create via [`WarehouseBuilder`][crate::WarehouseBuilder].
#[derive(Clone, Debug)]
pub struct Warehouse {
    pub(crate) config:          WarehouseConfig,
    pub(crate) layout:          Layout,
    pub(crate) grid:            Grid,
    pub(crate) schedule:        SpawnSchedule,
    pub(crate) packages:        PackageRegistry,
    pub(crate) robots:          RobotRegistry,
    /// Fixed start cells, reused on every reset.  `None` = random floor cells.
    pub(crate) robot_positions: Option<Vec<Position>>,
    /// Runtime randomness: package IDs, destinations, placement.
    pub(crate) rng:             SimRng,
    pub(crate) tick:            Tick,
    pub(crate) collisions:      u64,
    pub(crate) delivered:       u64,
}

impl Warehouse {
    // ── Public API ────────────────────────────────────────────────────────

    /// Rebuild grid and registries from scratch and rewind the tick counter.
    ///
    /// Spawn slots keep their construction-time sampling unless
    /// `resample_slots_on_reset` is set.
    pub fn reset(&mut self) -> StepResult {
        self.reset_with(&mut NoopObserver)
    }

    /// [`reset`](Self::reset) with observer callbacks.
    pub fn reset_with<O: WarehouseObserver>(&mut self, observer: &mut O) -> StepResult {
        if self.config.resample_slots_on_reset {
            let seed: u64 = self.rng.random();
            if let Err(e) = self.schedule.resample(self.grid.shelf_positions(), seed) {
                warn!(error = %e, "could not resample spawn slots; keeping the previous ones");
            }
        }
        self.reset_state(observer)
    }

    /// Advance one tick with one action per robot (by registry index).
    ///
    /// Robots without an action stay idle; surplus actions are ignored.
    pub fn step(&mut self, actions: &[Action]) -> StepResult {
        self.step_with(actions, &mut NoopObserver)
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_with<O: WarehouseObserver>(
        &mut self,
        actions:  &[Action],
        observer: &mut O,
    ) -> StepResult {
        let now = self.tick + 1;
        observer.on_tick_start(now);
        let mut stats = TickStats::default();

        // ── Phase 1: spawn ────────────────────────────────────────────────
        self.spawn_phase(now, &mut stats, observer);

        // ── Phase 2: robot actions, ascending RobotId ─────────────────────
        for (i, &action) in actions.iter().enumerate().take(self.robots.len()) {
            let robot = RobotId(i as u32);
            match action {
                Action::Pickup => self.pickup(robot, now, &mut stats, observer),
                Action::Drop   => self.deliver(robot, now, &mut stats, observer),
                Action::MoveDown | Action::MoveLeft | Action::MoveUp | Action::MoveRight => {
                    if let Some(dir) = action.direction() {
                        self.move_robot(robot, dir, now, &mut stats, observer);
                    }
                }
            }
        }

        // ── Phase 3: advance ──────────────────────────────────────────────
        self.tick = now;
        observer.on_tick_end(now, &stats);

        StepResult {
            observation: self.observation(),
            reward:      stats.reward,
            done:        false,
        }
    }

    /// Run `n` ticks with actions chosen by `controller`; returns the summed
    /// reward.
    pub fn run_ticks<C: Controller, O: WarehouseObserver>(
        &mut self,
        n:          u64,
        controller: &mut C,
        observer:   &mut O,
    ) -> f64 {
        let mut total = 0.0;
        for _ in 0..n {
            let actions = controller.actions(self);
            total += self.step_with(&actions, observer).reward;
        }
        total
    }

    /// A fully independent copy for speculative look-ahead.
    ///
    /// Grid, registries, scheduler heap and RNG state are all copied by
    /// value; stepping the branch never touches `self`.
    pub fn branch(&self) -> Warehouse {
        self.clone()
    }

    /// Reseed the runtime RNG.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SimRng::new(seed);
    }

    /// Put a package on the empty shelf `origin`, bound for drop zone
    /// `destination`.  Creation tick is the current tick.
    pub fn place_package(&mut self, origin: Position, destination: Position) -> SimResult<PackageId> {
        if !self.grid.drop_positions().contains(&destination) {
            return Err(LayoutError::NotADropZone(destination).into());
        }
        let package = self.insert_package(origin, destination, self.tick)?;
        Ok(package.id)
    }

    // ── Views ─────────────────────────────────────────────────────────────

    /// Robots (registry order) and shelved packages (ID order).
    pub fn observation(&self) -> Observation {
        Observation {
            robots:   self.robots.as_slice().to_vec(),
            packages: self.packages.iter().copied().collect(),
        }
    }

    /// Renderable snapshot of the grid and robots.
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.grid, &self.robots)
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    pub fn packages(&self) -> &PackageRegistry {
        &self.packages
    }

    pub fn robots(&self) -> &RobotRegistry {
        &self.robots
    }

    /// Ticks completed since the last reset.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Collisions since the last reset.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Packages delivered since the last reset.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    // ── Reset helpers ─────────────────────────────────────────────────────

    /// Clear everything and repopulate, keeping the current spawn slots.
    pub(crate) fn reset_state<O: WarehouseObserver>(&mut self, observer: &mut O) -> StepResult {
        self.tick = Tick::ZERO;
        self.collisions = 0;
        self.delivered = 0;
        self.grid.clear();
        self.packages.clear();
        self.robots.clear();
        self.schedule.reset();

        self.place_initial_packages(observer);
        self.place_robots(observer);

        debug!(
            robots   = self.robots.len(),
            packages = self.packages.len(),
            slots    = self.schedule.slots().len(),
            "warehouse reset"
        );
        observer.on_reset(self.robots.len(), self.packages.len());

        StepResult {
            observation: self.observation(),
            reward:      0.0,
            done:        false,
        }
    }

    fn place_initial_packages<O: WarehouseObserver>(&mut self, observer: &mut O) {
        let requested = self.config.packages;
        let empty = self.grid.empty_shelves();
        if requested > empty.len() {
            warn!(requested, shelves = empty.len(), "cannot place every package: no free shelves");
            observer.on_placement_exhausted("packages", requested, empty.len());
        }

        for i in self.rng.sample_indices(empty.len(), requested) {
            let Some(&destination) = self.rng.choose(self.grid.drop_positions()) else {
                return;
            };
            if let Err(e) = self.insert_package(empty[i], destination, Tick::ZERO) {
                warn!(error = %e, "initial package placement failed");
            }
        }
    }

    fn place_robots<O: WarehouseObserver>(&mut self, observer: &mut O) {
        let capacity = self.config.capacity;
        let starts: Vec<Position> = match &self.robot_positions {
            Some(positions) => positions.clone(),
            None => {
                let requested = self.config.robots;
                let floor = self.grid.floor_positions();
                if requested > floor.len() {
                    warn!(
                        requested,
                        floor = floor.len(),
                        "cannot place every robot: no free floor positions"
                    );
                    observer.on_placement_exhausted("robots", requested, floor.len());
                }
                self.rng
                    .sample_indices(floor.len(), requested)
                    .into_iter()
                    .map(|i| floor[i])
                    .collect()
            }
        };

        for pos in starts {
            if self.grid.enter(pos).is_some() {
                self.robots.spawn(pos, capacity);
            }
        }
    }

    // ── Spawn phase ───────────────────────────────────────────────────────

    fn spawn_phase<O: WarehouseObserver>(
        &mut self,
        now:      Tick,
        stats:    &mut TickStats,
        observer: &mut O,
    ) {
        for slot in self.schedule.tick() {
            if !self.grid.is_empty_shelf(slot.position) {
                stats.spawn_skipped += 1;
                trace!(slot = slot.id.0, shelf = %slot.position, "spawn skipped: shelf occupied");
                observer.on_spawn_skipped(now, slot.id, slot.position);
                continue;
            }

            let Some(&destination) = self.rng.choose(self.grid.drop_positions()) else {
                continue;
            };
            match self.insert_package(slot.position, destination, now) {
                Ok(package) => {
                    stats.spawned += 1;
                    debug!(
                        tick        = now.0,
                        slot        = slot.id.0,
                        package     = package.id.0,
                        destination = %destination,
                        "package spawned"
                    );
                    observer.on_spawn(now, slot.id, &package);
                }
                Err(e) => warn!(error = %e, slot = slot.id.0, "spawn failed"),
            }
        }
    }

    /// Create a package with a fresh ID on the empty shelf `origin`.
    fn insert_package(
        &mut self,
        origin:      Position,
        destination: Position,
        created:     Tick,
    ) -> SimResult<Package> {
        if !self.grid.is_empty_shelf(origin) {
            return Err(match self.grid.get(origin) {
                None                  => LayoutError::OutOfBounds(origin),
                Some(c) if c.package().is_some() => LayoutError::ShelfOccupied(origin),
                Some(_)               => LayoutError::NotAShelf(origin),
            }
            .into());
        }

        let robots = &self.robots;
        let id = self.packages.fresh_id(&mut self.rng, |id| robots.carries(id));
        self.grid.place_package(origin, id)?;

        let package = Package { id, origin, destination, created };
        if self.packages.insert(package).is_some() {
            return Err(SimError::Config(format!("duplicate package id {id}")));
        }
        Ok(package)
    }

    // ── Robot actions ─────────────────────────────────────────────────────

    fn move_robot<O: WarehouseObserver>(
        &mut self,
        id:       RobotId,
        dir:      Direction,
        now:      Tick,
        stats:    &mut TickStats,
        observer: &mut O,
    ) {
        let (height, width) = (self.grid.height(), self.grid.width());
        let Some(robot) = self.robots.get_mut(id) else { return };

        let from = robot.position;
        let Some(to) = from.step(dir, height, width) else { return };
        if !self.grid.is_walkable(to) {
            return;
        }
        if self.config.collision_policy == CollisionPolicy::Block && self.grid.occupancy(to) > 0 {
            return;
        }

        let Some(occupancy) = self.grid.enter(to) else { return };
        self.grid.leave(from);
        robot.position = to;

        if occupancy > 1 {
            stats.collisions += 1;
            stats.reward -= self.config.collision_penalty;
            self.collisions += 1;
            trace!(tick = now.0, robot = id.0, cell = %to, occupancy, "collision");
            observer.on_collision(now, id, to, occupancy);
        }
    }

    fn pickup<O: WarehouseObserver>(
        &mut self,
        id:       RobotId,
        now:      Tick,
        stats:    &mut TickStats,
        observer: &mut O,
    ) {
        let (height, width) = (self.grid.height(), self.grid.width());
        let Some(robot) = self.robots.get_mut(id) else { return };

        for cell in robot.position.neighbours(height, width) {
            if robot.is_full() {
                break;
            }
            let Some(package_id) = self.grid.take_package(cell) else { continue };
            match self.packages.remove(package_id) {
                Some(package) => {
                    robot.carried.push(package);
                    stats.picked_up += 1;
                    observer.on_pickup(now, id, &package);
                }
                None => warn!(package = package_id.0, shelf = %cell, "shelf held an unregistered package"),
            }
        }
    }

    fn deliver<O: WarehouseObserver>(
        &mut self,
        id:       RobotId,
        now:      Tick,
        stats:    &mut TickStats,
        observer: &mut O,
    ) {
        let (height, width) = (self.grid.height(), self.grid.width());
        let Some(robot) = self.robots.get_mut(id) else { return };
        if !robot.is_loaded() {
            return;
        }

        for cell in robot.position.neighbours(height, width) {
            let mut i = 0;
            while i < robot.carried.len() {
                if robot.carried[i].destination != cell {
                    i += 1;
                    continue;
                }
                let package = robot.carried.remove(i);
                stats.delivered += 1;
                stats.reward += 1.0;
                self.delivered += 1;
                debug!(tick = now.0, robot = id.0, package = package.id.0, "package delivered");
                observer.on_drop(now, id, &package);
            }
        }
    }
}
