//! Integration tests for wh-sim.
//!
//! Most scenarios use the default 7 × 7 floor plan:
//!
//! ```text
//!   0123456
//! 0 .......
//! 1 .##.##.
//! 2 .##.##.
//! 3 .......
//! 4 .##.##.
//! 5 .##.##.
//! 6 .......
//! ```

use std::collections::HashSet;

use wh_core::{Position, RobotId, SlotId, Tick};
use wh_schedule::PeriodBounds;

use crate::{
    Action, CollisionPolicy, Package, RandomController, Warehouse, WarehouseBuilder,
    WarehouseConfig, WarehouseObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// No initial packages, no spawn slots, pinned runtime seed.
fn quiet_config(robots: usize, capacity: usize, drops: Vec<Position>) -> WarehouseConfig {
    WarehouseConfig {
        robots,
        capacity,
        packages:     0,
        spawn_slots:  Some(0),
        runtime_seed: Some(1),
        drop_zones:   drops,
        ..WarehouseConfig::default()
    }
}

fn build_at(config: WarehouseConfig, starts: Vec<Position>) -> Warehouse {
    WarehouseBuilder::new(config).robot_positions(starts).build().unwrap()
}

fn p(row: u32, col: u32) -> Position {
    Position::new(row, col)
}

/// Panics if any structural invariant is violated.
fn assert_invariants(w: &Warehouse) {
    // Occupancy bookkeeping matches the robot registry.
    assert_eq!(w.grid().total_occupancy(), w.robots().len() as u64);
    for robot in w.robots().iter() {
        assert!(w.grid().occupancy(robot.position) >= 1);
        assert!(robot.carried.len() <= robot.capacity, "robot over capacity");
    }

    // Every shelved package sits on its own origin cell, one per shelf.
    assert_eq!(w.grid().package_count(), w.packages().len());
    for package in w.packages().iter() {
        assert_eq!(w.grid().package_at(package.origin), Some(package.id));
    }

    // Identifiers are unique across shelves and robots.
    let mut seen = HashSet::new();
    for package in w.packages().iter() {
        assert!(seen.insert(package.id));
    }
    for robot in w.robots().iter() {
        for package in &robot.carried {
            assert!(seen.insert(package.id), "duplicate package id {}", package.id);
        }
    }
}

#[derive(Default)]
struct Recorder {
    spawned:    Vec<(Tick, SlotId)>,
    skipped:    Vec<(Tick, SlotId)>,
    pickups:    Vec<(RobotId, Package)>,
    drops:      Vec<(RobotId, Package)>,
    collisions: Vec<(Tick, RobotId, Position, u32)>,
    exhausted:  Vec<(&'static str, usize, usize)>,
    ticks:      usize,
}

impl WarehouseObserver for Recorder {
    fn on_spawn(&mut self, tick: Tick, slot: SlotId, _package: &Package) {
        self.spawned.push((tick, slot));
    }
    fn on_spawn_skipped(&mut self, tick: Tick, slot: SlotId, _shelf: Position) {
        self.skipped.push((tick, slot));
    }
    fn on_pickup(&mut self, _tick: Tick, robot: RobotId, package: &Package) {
        self.pickups.push((robot, *package));
    }
    fn on_drop(&mut self, _tick: Tick, robot: RobotId, package: &Package) {
        self.drops.push((robot, *package));
    }
    fn on_collision(&mut self, tick: Tick, robot: RobotId, cell: Position, occupancy: u32) {
        self.collisions.push((tick, robot, cell, occupancy));
    }
    fn on_placement_exhausted(&mut self, what: &'static str, requested: usize, placed: usize) {
        self.exhausted.push((what, requested, placed));
    }
    fn on_tick_end(&mut self, _tick: Tick, _stats: &crate::TickStats) {
        self.ticks += 1;
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;
    use wh_layout::{LayoutError, LayoutParams};

    #[test]
    fn builds_with_defaults() {
        let w = WarehouseBuilder::new(WarehouseConfig::default()).build().unwrap();
        assert_eq!(w.robots().len(), 1);
        assert_eq!(w.packages().len(), 10);
        assert_eq!(w.schedule().slots().len(), 10);
        assert_eq!(w.tick(), Tick::ZERO);
        assert_invariants(&w);
    }

    #[test]
    fn too_many_packages_is_fatal() {
        let config = WarehouseConfig { packages: 17, ..WarehouseConfig::default() };
        let result = WarehouseBuilder::new(config).build();
        assert!(matches!(
            result,
            Err(SimError::TooManyPackages { requested: 17, shelves: 16 })
        ));
    }

    #[test]
    fn every_shelf_may_hold_a_package() {
        let config = WarehouseConfig {
            packages:     16,
            runtime_seed: Some(3),
            ..WarehouseConfig::default()
        };
        let w = WarehouseBuilder::new(config).build().unwrap();
        assert_eq!(w.packages().len(), 16);
        assert!(w.grid().empty_shelves().is_empty());
    }

    #[test]
    fn too_many_slots_is_fatal() {
        let config = WarehouseConfig {
            packages:    0,
            spawn_slots: Some(17),
            ..WarehouseConfig::default()
        };
        assert!(matches!(WarehouseBuilder::new(config).build(), Err(SimError::Schedule(_))));
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = WarehouseConfig { capacity: 0, ..WarehouseConfig::default() };
        assert!(matches!(WarehouseBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn inverted_period_rejected() {
        let config = WarehouseConfig {
            spawn_period: PeriodBounds::new(9, 3),
            ..WarehouseConfig::default()
        };
        assert!(WarehouseBuilder::new(config).build().is_err());
    }

    #[test]
    fn drop_zone_on_shelf_rejected() {
        let config = WarehouseConfig { drop_zones: vec![p(1, 1)], ..WarehouseConfig::default() };
        assert!(matches!(
            WarehouseBuilder::new(config).build(),
            Err(SimError::Layout(LayoutError::DropOnShelf(_)))
        ));
    }

    #[test]
    fn missing_drop_zones_rejected() {
        let config = WarehouseConfig { drop_zones: vec![], ..WarehouseConfig::default() };
        assert!(WarehouseBuilder::new(config).build().is_err());
    }

    #[test]
    fn robot_position_count_mismatch() {
        let result = WarehouseBuilder::new(quiet_config(2, 1, vec![p(6, 6)]))
            .robot_positions(vec![p(0, 0)])
            .build();
        assert!(matches!(
            result,
            Err(SimError::RobotCountMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn robot_on_shelf_rejected() {
        let result = WarehouseBuilder::new(quiet_config(1, 1, vec![p(6, 6)]))
            .robot_positions(vec![p(1, 1)])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn shared_robot_start_rejected() {
        let result = WarehouseBuilder::new(quiet_config(2, 1, vec![p(6, 6)]))
            .robot_positions(vec![p(0, 3), p(0, 3)])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn oversized_layout_is_config_error() {
        let config = WarehouseConfig {
            layout: LayoutParams { shelf_width: u32::MAX / 2 + 1, ..LayoutParams::default() },
            ..quiet_config(0, 1, vec![p(0, 0)])
        };
        let result = WarehouseBuilder::new(config).build();
        assert!(matches!(result, Err(SimError::Layout(LayoutError::Config(_)))));
    }

    #[test]
    fn structural_seed_fixes_slots() {
        let config = WarehouseConfig { seed: 77, ..WarehouseConfig::default() };
        let a = WarehouseBuilder::new(config.clone()).build().unwrap();
        let b = WarehouseBuilder::new(config).build().unwrap();
        assert_eq!(a.schedule().slots(), b.schedule().slots());
    }
}

// ── Movement and collisions ───────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use super::*;

    #[test]
    fn moves_on_floor() {
        let mut w = build_at(quiet_config(1, 1, vec![p(6, 6)]), vec![p(0, 0)]);
        w.step(&[Action::MoveUp]);
        w.step(&[Action::MoveUp]);
        assert_eq!(w.robots().as_slice()[0].position, p(2, 0));
        w.step(&[Action::MoveDown]);
        assert_eq!(w.robots().as_slice()[0].position, p(1, 0));
        assert_invariants(&w);
    }

    #[test]
    fn shelf_blocks_movement() {
        let mut w = build_at(quiet_config(1, 1, vec![p(6, 6)]), vec![p(0, 1)]);
        let result = w.step(&[Action::MoveUp]);
        assert_eq!(result.reward, 0.0);
        assert_eq!(w.robots().as_slice()[0].position, p(0, 1));
        assert_invariants(&w);
    }

    #[test]
    fn edge_blocks_movement() {
        let mut w = build_at(quiet_config(1, 1, vec![p(6, 6)]), vec![p(0, 0)]);
        w.step(&[Action::MoveDown]);
        w.step(&[Action::MoveLeft]);
        assert_eq!(w.robots().as_slice()[0].position, p(0, 0));
    }

    #[test]
    fn action_indices_move_along_rows() {
        let mut w = build_at(quiet_config(1, 1, vec![p(6, 6)]), vec![p(3, 3)]);
        let at = |w: &Warehouse| w.robots().as_slice()[0].position;

        w.step(&[Action::try_from(0u8).unwrap()]);
        assert_eq!(at(&w), p(2, 3), "action 0 lowers the row");
        w.step(&[Action::try_from(2u8).unwrap()]);
        assert_eq!(at(&w), p(3, 3), "action 2 raises the row");
        w.step(&[Action::try_from(1u8).unwrap()]);
        assert_eq!(at(&w), p(3, 2));
        w.step(&[Action::try_from(3u8).unwrap()]);
        assert_eq!(at(&w), p(3, 3));
    }

    #[test]
    fn robots_walk_onto_drop_zones() {
        let mut w = build_at(quiet_config(1, 1, vec![p(0, 1)]), vec![p(0, 0)]);
        w.step(&[Action::MoveRight]);
        assert_eq!(w.robots().as_slice()[0].position, p(0, 1));
        assert_eq!(w.grid().occupancy(p(0, 1)), 1);
    }

    #[test]
    fn contested_cell_allow_policy() {
        let mut w = build_at(quiet_config(2, 1, vec![p(6, 6)]), vec![p(0, 0), p(0, 2)]);
        let mut rec = Recorder::default();
        let result = w.step_with(&[Action::MoveRight, Action::MoveLeft], &mut rec);

        let robots = w.robots().as_slice();
        assert_eq!(robots[0].position, p(0, 1));
        assert_eq!(robots[1].position, p(0, 1));
        assert_eq!(w.grid().occupancy(p(0, 1)), 2);
        assert_eq!(w.collisions(), 1);
        assert_eq!(rec.collisions, vec![(Tick(1), RobotId(1), p(0, 1), 2)]);
        assert_eq!(result.reward, 0.0);
        assert_invariants(&w);
    }

    #[test]
    fn contested_cell_block_policy() {
        let config = WarehouseConfig {
            collision_policy: CollisionPolicy::Block,
            ..quiet_config(2, 1, vec![p(6, 6)])
        };
        let mut w = build_at(config, vec![p(0, 0), p(0, 2)]);
        w.step(&[Action::MoveRight, Action::MoveLeft]);

        let robots = w.robots().as_slice();
        assert_eq!(robots[0].position, p(0, 1), "lower index wins");
        assert_eq!(robots[1].position, p(0, 2));
        assert_eq!(w.collisions(), 0);
        assert_invariants(&w);
    }

    #[test]
    fn earlier_robot_vacates_before_later_moves() {
        let config = WarehouseConfig {
            collision_policy: CollisionPolicy::Block,
            ..quiet_config(2, 1, vec![p(6, 6)])
        };
        // Robot 0 at (0,1) steps right; robot 1 follows into the freed cell.
        let mut w = build_at(config, vec![p(0, 1), p(0, 0)]);
        w.step(&[Action::MoveRight, Action::MoveRight]);
        let robots = w.robots().as_slice();
        assert_eq!(robots[0].position, p(0, 2));
        assert_eq!(robots[1].position, p(0, 1));
    }

    #[test]
    fn collision_penalty_applied() {
        let config = WarehouseConfig {
            collision_penalty: 0.5,
            ..quiet_config(2, 1, vec![p(6, 6)])
        };
        let mut w = build_at(config, vec![p(0, 0), p(0, 2)]);
        let result = w.step(&[Action::MoveRight, Action::MoveLeft]);
        assert_eq!(result.reward, -0.5);
    }

    #[test]
    fn missing_and_surplus_actions() {
        let mut w = build_at(quiet_config(2, 1, vec![p(6, 6)]), vec![p(0, 0), p(6, 0)]);
        w.step(&[Action::MoveRight]);
        let robots = w.robots().as_slice();
        assert_eq!(robots[0].position, p(0, 1));
        assert_eq!(robots[1].position, p(6, 0));

        w.step(&[Action::MoveRight, Action::MoveRight, Action::MoveRight]);
        assert_eq!(w.robots().as_slice()[1].position, p(6, 1));
        assert_eq!(w.tick(), Tick(2));
    }
}

// ── Pickup and drop ───────────────────────────────────────────────────────────

#[cfg(test)]
mod carry_tests {
    use super::*;

    #[test]
    fn pickup_move_drop_scenario() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 1)]);
        let id = w.place_package(p(1, 1), p(1, 0)).unwrap();

        let r1 = w.step(&[Action::Pickup]);
        assert_eq!(r1.observation.robots[0].carried.len(), 1);
        assert_eq!(r1.observation.robots[0].carried[0].id, id);
        assert!(r1.observation.packages.is_empty());
        assert!(w.grid().is_empty_shelf(p(1, 1)));

        w.step(&[Action::MoveLeft]);
        let r3 = w.step(&[Action::Drop]);
        assert_eq!(r3.observation.robots[0].carried.len(), 0);
        assert_eq!(r3.reward, 1.0);
        assert!(!r3.done);
        assert_eq!(w.delivered(), 1);
        assert_invariants(&w);
    }

    #[test]
    fn drop_away_from_destination_keeps_package() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 1)]);
        w.place_package(p(1, 1), p(1, 0)).unwrap();
        w.step(&[Action::Pickup]);
        let before = w.robots().as_slice()[0].carried.clone();

        let result = w.step(&[Action::Drop]);
        assert_eq!(result.reward, 0.0);
        assert_eq!(w.robots().as_slice()[0].carried, before);
    }

    #[test]
    fn pickup_respects_capacity_and_scan_order() {
        let mut w = build_at(quiet_config(1, 1, vec![p(0, 0)]), vec![p(3, 1)]);
        let below = w.place_package(p(2, 1), p(0, 0)).unwrap();
        let above = w.place_package(p(4, 1), p(0, 0)).unwrap();

        w.step(&[Action::Pickup]);
        let robot = &w.robots().as_slice()[0];
        assert_eq!(robot.carried.len(), 1);
        assert_eq!(robot.carried[0].id, above, "up (row + 1) is scanned before down");
        assert_eq!(w.grid().package_at(p(2, 1)), Some(below));

        // Already full: a second pickup is a no-op.
        w.step(&[Action::Pickup]);
        assert_eq!(w.robots().as_slice()[0].carried.len(), 1);
        assert_invariants(&w);
    }

    #[test]
    fn multi_drop_in_one_action() {
        let mut w = build_at(quiet_config(1, 2, vec![p(3, 0), p(3, 2)]), vec![p(3, 1)]);
        w.place_package(p(2, 1), p(3, 0)).unwrap();
        w.place_package(p(4, 1), p(3, 2)).unwrap();

        let mut rec = Recorder::default();
        w.step_with(&[Action::Pickup], &mut rec);
        assert_eq!(rec.pickups.len(), 2);

        let result = w.step_with(&[Action::Drop], &mut rec);
        assert_eq!(result.reward, 2.0);
        assert_eq!(rec.drops.len(), 2);
        assert!(w.robots().as_slice()[0].carried.is_empty());
        assert_invariants(&w);
    }

    #[test]
    fn drop_with_nothing_carried_is_noop() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 0)]);
        let result = w.step(&[Action::Drop]);
        assert_eq!(result.reward, 0.0);
    }

    #[test]
    fn place_package_validation() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 0)]);
        assert!(w.place_package(p(0, 3), p(1, 0)).is_err(), "floor is not a shelf");
        assert!(w.place_package(p(1, 1), p(6, 6)).is_err(), "not a drop zone");
        w.place_package(p(1, 1), p(1, 0)).unwrap();
        assert!(w.place_package(p(1, 1), p(1, 0)).is_err(), "no stacking");
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_tests {
    use super::*;

    fn one_slot(period: u32) -> WarehouseConfig {
        WarehouseConfig {
            robots:       0,
            packages:     0,
            spawn_slots:  Some(1),
            spawn_period: PeriodBounds::fixed(period),
            runtime_seed: Some(5),
            ..WarehouseConfig::default()
        }
    }

    #[test]
    fn occupied_slot_keeps_its_timer() {
        let mut w = WarehouseBuilder::new(one_slot(5)).build().unwrap();
        let slot = w.schedule().slots()[0];
        let mut rec = Recorder::default();

        for _ in 0..4 {
            w.step_with(&[], &mut rec);
        }
        assert!(w.packages().is_empty());

        w.step_with(&[], &mut rec);
        assert_eq!(rec.spawned, vec![(Tick(5), slot.id)]);
        let package = *w.packages().iter().next().unwrap();
        assert_eq!(package.origin, slot.position);
        assert_eq!(package.created, Tick(5));
        assert_eq!(package.destination, p(0, 0));

        for _ in 0..15 {
            w.step_with(&[], &mut rec);
        }
        assert_eq!(rec.spawned.len(), 1);
        assert_eq!(
            rec.skipped,
            vec![(Tick(10), slot.id), (Tick(15), slot.id), (Tick(20), slot.id)]
        );
        assert_eq!(w.packages().len(), 1);
        assert_eq!(w.packages().iter().next().unwrap().id, package.id);
        assert_eq!(w.schedule().queue().len(), 1);
        assert_eq!(w.schedule().queue().remaining(slot.id), Some(5));
    }

    #[test]
    fn freed_slot_respawns_on_next_firing() {
        // Slots depend only on the structural seed, so a robot-free build
        // tells us where the slot will be.
        let probe = WarehouseBuilder::new(one_slot(3)).build().unwrap();
        let shelf = probe.schedule().slots()[0].position;
        let start = shelf
            .neighbours(probe.grid().height(), probe.grid().width())
            .find(|&n| probe.grid().is_walkable(n))
            .unwrap();

        let config = WarehouseConfig { robots: 1, ..one_slot(3) };
        let mut w = build_at(config, vec![start]);
        assert_eq!(w.schedule().slots()[0].position, shelf);
        for _ in 0..3 {
            w.step(&[]);
        }
        assert!(w.grid().package_at(shelf).is_some());

        w.step(&[Action::Pickup]);
        assert!(w.grid().is_empty_shelf(shelf));
        assert_eq!(w.robots().as_slice()[0].carried.len(), 1);

        w.step(&[]);
        assert!(w.grid().is_empty_shelf(shelf));
        w.step(&[]);
        assert!(w.grid().package_at(shelf).is_some(), "slot fires again at tick 6");
        assert_invariants(&w);
    }

    #[test]
    fn spawned_destinations_are_drop_zones() {
        let config = WarehouseConfig {
            robots:       2,
            packages:     4,
            spawn_slots:  Some(12),
            spawn_period: PeriodBounds::new(1, 4),
            runtime_seed: Some(8),
            drop_zones:   vec![p(0, 0), p(6, 6), p(3, 3)],
            ..WarehouseConfig::default()
        };
        let mut w = WarehouseBuilder::new(config).build().unwrap();
        for _ in 0..20 {
            w.step(&[]);
        }
        for package in w.packages().iter() {
            assert!(w.grid().drop_positions().contains(&package.destination));
            assert!(w.layout().is_shelf(package.origin));
        }
        assert_invariants(&w);
    }
}

// ── Reset, branch, determinism ────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;
    use crate::{Controller, ScriptedController};

    fn busy_config() -> WarehouseConfig {
        WarehouseConfig {
            robots:       4,
            capacity:     2,
            packages:     6,
            spawn_slots:  Some(8),
            spawn_period: PeriodBounds::new(2, 6),
            seed:         11,
            runtime_seed: Some(7),
            drop_zones:   vec![p(0, 0), p(0, 6), p(6, 0), p(6, 6)],
            ..WarehouseConfig::default()
        }
    }

    #[test]
    fn random_run_preserves_invariants() {
        let mut w = WarehouseBuilder::new(busy_config()).build().unwrap();
        let mut controller = RandomController::new(3);
        for _ in 0..500 {
            let actions = controller.actions(&w);
            w.step(&actions);
            assert_invariants(&w);
        }
    }

    #[test]
    fn identical_seeds_identical_runs() {
        let mut a = WarehouseBuilder::new(busy_config()).build().unwrap();
        let mut b = WarehouseBuilder::new(busy_config()).build().unwrap();
        assert_eq!(a.observation(), b.observation());

        let mut ca = RandomController::new(21);
        let mut cb = RandomController::new(21);
        for _ in 0..200 {
            let ra = a.step(&ca.actions(&a));
            let rb = b.step(&cb.actions(&b));
            assert_eq!(ra, rb);
        }
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn entropy_runtime_seed_keeps_structure() {
        let config = WarehouseConfig { runtime_seed: None, ..busy_config() };
        let a = WarehouseBuilder::new(config.clone()).build().unwrap();
        let b = WarehouseBuilder::new(config).build().unwrap();
        assert_eq!(a.schedule().slots(), b.schedule().slots());
    }

    #[test]
    fn reset_rewinds_and_keeps_slots() {
        let mut w = WarehouseBuilder::new(busy_config()).build().unwrap();
        let slots = w.schedule().slots().to_vec();
        let mut controller = RandomController::new(4);
        w.run_ticks(50, &mut controller, &mut crate::NoopObserver);
        assert_eq!(w.tick(), Tick(50));

        let result = w.reset();
        assert_eq!(w.tick(), Tick::ZERO);
        assert_eq!(result.reward, 0.0);
        assert!(!result.done);
        assert_eq!(result.observation.robots.len(), 4);
        assert_eq!(result.observation.packages.len(), 6);
        assert!(result.observation.robots.iter().all(|r| r.carried.is_empty()));
        assert_eq!(w.schedule().slots(), slots.as_slice());
        assert_eq!(w.collisions(), 0);
        assert_invariants(&w);
    }

    #[test]
    fn reset_can_resample_slots() {
        let config = WarehouseConfig { resample_slots_on_reset: true, ..busy_config() };
        let mut w = WarehouseBuilder::new(config).build().unwrap();
        w.reset();
        assert_eq!(w.schedule().slots().len(), 8);
        assert_eq!(w.schedule().queue().len(), 8);
        assert_invariants(&w);
    }

    #[test]
    fn branch_is_isolated() {
        let mut w = WarehouseBuilder::new(busy_config()).build().unwrap();
        w.step(&[Action::MoveUp; 4]);
        let before = w.observation();
        let frame = w.frame();

        let mut branch = w.branch();
        let mut controller = RandomController::new(9);
        branch.run_ticks(100, &mut controller, &mut crate::NoopObserver);

        assert_eq!(w.observation(), before);
        assert_eq!(w.frame(), frame);
        assert_eq!(w.tick(), Tick(1));
        assert_eq!(branch.tick(), Tick(101));
    }

    #[test]
    fn branch_replays_identically() {
        let mut w = WarehouseBuilder::new(busy_config()).build().unwrap();
        let mut branch = w.branch();
        let actions = [Action::Pickup, Action::MoveLeft, Action::Drop, Action::MoveDown];
        for _ in 0..30 {
            assert_eq!(w.step(&actions), branch.step(&actions));
        }
    }

    #[test]
    fn robot_placement_exhaustion_degrades() {
        let config = WarehouseConfig { robots: 100, ..quiet_config(0, 1, vec![p(0, 0)]) };
        let mut w = WarehouseBuilder::new(config).build().unwrap();
        let floor = w.grid().floor_positions().len();
        assert_eq!(w.robots().len(), floor);

        let mut rec = Recorder::default();
        w.reset_with(&mut rec);
        assert_eq!(rec.exhausted, vec![("robots", 100, floor)]);
        assert_invariants(&w);

        // Every robot still gets stepped safely.
        w.step(&vec![Action::MoveRight; 100]);
        assert_invariants(&w);
    }

    #[test]
    fn scripted_run_collects_reward() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 1)]);
        w.place_package(p(1, 1), p(1, 0)).unwrap();
        let mut controller = ScriptedController::new(vec![
            vec![Action::Pickup],
            vec![Action::MoveLeft],
            vec![Action::Drop],
        ]);
        let mut rec = Recorder::default();
        let total = w.run_ticks(5, &mut controller, &mut rec);
        assert_eq!(total, 1.0);
        assert_eq!(rec.ticks, 5);
    }
}

// ── Actions and frames ────────────────────────────────────────────────────────

#[cfg(test)]
mod view_tests {
    use super::*;
    use crate::{ACTION_COUNT, InvalidAction};
    use wh_core::Direction;
    use wh_layout::CellKind;

    #[test]
    fn action_decoding() {
        assert_eq!(Action::try_from(0u8), Ok(Action::MoveDown));
        assert_eq!(Action::try_from(4usize), Ok(Action::Pickup));
        assert_eq!(Action::try_from(5u8), Ok(Action::Drop));
        assert_eq!(Action::try_from(6u8), Err(InvalidAction(6)));
        assert_eq!(Action::ALL.len(), ACTION_COUNT);
        assert!(Action::ALL.iter().enumerate().all(|(i, a)| a.index() == i));
        assert_eq!(Action::MoveUp.direction(), Some(Direction::Up));
        assert_eq!(Action::Drop.direction(), None);
    }

    #[test]
    fn frame_ascii_and_colors() {
        let mut w = build_at(quiet_config(1, 1, vec![p(1, 0)]), vec![p(0, 1)]);
        w.place_package(p(1, 1), p(1, 0)).unwrap();
        let frame = w.frame();

        assert_eq!(frame.kind_at(p(1, 1)), Some(CellKind::PackageOnShelf));
        assert_eq!(frame.kind_at(p(1, 0)), Some(CellKind::Drop));
        assert_eq!(frame.kind_at(p(9, 9)), None);

        let text = frame.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], ".R.....");
        assert_eq!(lines[1], "DP#.##.");
        assert_eq!(lines[3], ".......");

        let rgb = frame.rgb();
        assert_eq!(rgb.len(), 49);
        assert_eq!(rgb[p(0, 1).flat_index(7)], [0.0, 0.0, 0.8]);
        assert_eq!(rgb[p(1, 1).flat_index(7)], [0.0, 0.8, 0.0]);

        w.step(&[Action::Pickup]);
        let frame = w.frame();
        assert!(frame.to_string().starts_with(".L....."));
        assert_eq!(frame.rgb()[p(0, 1).flat_index(7)], [0.0, 0.8, 0.8]);
    }

    #[test]
    fn frame_marks_collisions() {
        let mut w = build_at(quiet_config(2, 1, vec![p(6, 6)]), vec![p(0, 0), p(0, 2)]);
        w.step(&[Action::MoveRight, Action::MoveLeft]);
        let frame = w.frame();
        assert!(frame.to_string().starts_with(".*....."));
        assert_eq!(frame.rgb()[1], [1.0, 1.0, 1.0]);
    }
}
