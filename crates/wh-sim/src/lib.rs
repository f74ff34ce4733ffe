//! `wh-sim` — step engine for the robotic warehouse simulator.
//!
//! # One tick
//!
//! ```text
//! step(actions):
//!   ① Spawn   — advance slot timers; each due slot creates a package on
//!               its shelf if the shelf is empty, then re-arms its timer.
//!   ② Act     — for each robot in ascending RobotId order:
//!                 Move(dir) → walkable target? occupancy bookkeeping,
//!                             collision policy
//!                 Pickup    → adjacent shelves, up/down/left/right, until full
//!                 Drop      → deliver carried packages with adjacent
//!                             destinations, +1 reward each
//!   ③ Advance — tick += 1; return (observation, reward, done = false)
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`config`]      | `WarehouseConfig`, `CollisionPolicy`                   |
//! | [`builder`]     | `WarehouseBuilder`                                     |
//! | [`warehouse`]   | `Warehouse` (reset, step, branch)                      |
//! | [`action`]      | `Action`, `ACTION_COUNT`, `InvalidAction`              |
//! | [`package`]     | `Package`, `PackageRegistry`                           |
//! | [`robot`]       | `Robot`, `RobotRegistry`                               |
//! | [`observer`]    | `WarehouseObserver`, `NoopObserver`, `TickStats`       |
//! | [`controller`]  | `Controller`, `IdleController`, `RandomController`, `ScriptedController` |
//! | [`snapshot`]    | `Observation`, `StepResult`, `Frame`                   |
//! | [`error`]       | `SimError`, `SimResult<T>`                             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_sim::{Action, WarehouseBuilder, WarehouseConfig};
//!
//! let mut warehouse = WarehouseBuilder::new(WarehouseConfig::default()).build()?;
//! let result = warehouse.step(&[Action::MoveUp]);
//! println!("{}", warehouse.frame());
//! ```

pub mod action;
pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod package;
pub mod robot;
pub mod snapshot;
pub mod warehouse;

#[cfg(test)]
mod tests;

pub use action::{ACTION_COUNT, Action, InvalidAction};
pub use builder::WarehouseBuilder;
pub use config::{CollisionPolicy, WarehouseConfig};
pub use controller::{Controller, IdleController, RandomController, ScriptedController};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TickStats, WarehouseObserver};
pub use package::{Package, PackageRegistry};
pub use robot::{Robot, RobotRegistry};
pub use snapshot::{Frame, Observation, RobotMarker, StepResult};
pub use warehouse::Warehouse;
