//! random_moves — a warehouse driven by uniformly random actions.
//!
//! Builds a 39 × 40 floor plan (10 block columns, 5 block rows, wide
//! aisles), runs it for a fixed number of ticks, and prints a summary plus
//! the final floor as ASCII.  Set `RUST_LOG=wh_sim=debug` to watch spawns
//! and deliveries.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use wh_core::{Position, RobotId, SlotId, Tick};
use wh_layout::LayoutParams;
use wh_schedule::PeriodBounds;
use wh_sim::{
    CollisionPolicy, Package, RandomController, TickStats, WarehouseBuilder, WarehouseConfig,
    WarehouseObserver,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROBOTS:          usize = 1;
const CAPACITY:        usize = 1;
const PACKAGES:        usize = 10;
const TICKS:           u64   = 2_000;
const STRUCTURAL_SEED: u64   = 42;
const RUNTIME_SEED:    u64   = 7;
const PROGRESS_EVERY:  u64   = 500;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    spawned:    usize,
    skipped:    usize,
    picked_up:  usize,
    delivered:  usize,
    collisions: usize,
}

impl WarehouseObserver for Tally {
    fn on_spawn(&mut self, _tick: Tick, _slot: SlotId, _package: &Package) {
        self.spawned += 1;
    }

    fn on_spawn_skipped(&mut self, _tick: Tick, _slot: SlotId, _shelf: Position) {
        self.skipped += 1;
    }

    fn on_pickup(&mut self, tick: Tick, robot: RobotId, package: &Package) {
        self.picked_up += 1;
        info!(%tick, %robot, package = %package.id, "pickup");
    }

    fn on_drop(&mut self, tick: Tick, robot: RobotId, package: &Package) {
        self.delivered += 1;
        info!(%tick, %robot, package = %package.id, "delivered");
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.collisions += stats.collisions;
        if tick.0 % PROGRESS_EVERY == 0 {
            println!(
                "{tick:>6}  spawned {:>4}  skipped {:>4}  delivered {:>3}",
                self.spawned, self.skipped, self.delivered
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let layout = LayoutParams {
        shelf_length:      2,
        shelf_height:      5,
        shelf_width:       10,
        shelve_throughput: 1,
        cross_throughput:  5,
    };
    let config = WarehouseConfig {
        layout,
        robots:           ROBOTS,
        capacity:         CAPACITY,
        packages:         PACKAGES,
        spawn_slots:      None,
        spawn_period:     PeriodBounds::default(),
        seed:             STRUCTURAL_SEED,
        runtime_seed:     Some(RUNTIME_SEED),
        drop_zones:       vec![Position::new(0, 0), Position::new(0, layout.width() - 1)],
        collision_policy: CollisionPolicy::Allow,
        ..WarehouseConfig::default()
    };

    println!("=== random_moves — robotic warehouse ===");
    println!(
        "Floor: {} × {}  |  shelves: {}  |  robots: {ROBOTS}  |  ticks: {TICKS}",
        layout.width(),
        layout.height(),
        layout.shelf_count()
    );
    println!();

    let mut warehouse = WarehouseBuilder::new(config).build()?;
    let mut controller = RandomController::new(RUNTIME_SEED);
    let mut tally = Tally::default();

    let t0 = Instant::now();
    let reward = warehouse.run_ticks(TICKS, &mut controller, &mut tally);
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  total reward       : {reward}");
    println!("  packages spawned   : {}", tally.spawned);
    println!("  spawns skipped     : {}", tally.skipped);
    println!("  pickups            : {}", tally.picked_up);
    println!("  deliveries         : {}", tally.delivered);
    println!("  collisions         : {}", tally.collisions);
    println!("  packages on shelves: {}", warehouse.packages().len());
    println!();
    print!("{}", warehouse.frame());

    Ok(())
}
