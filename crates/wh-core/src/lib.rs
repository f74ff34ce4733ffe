//! `wh-core` — foundational types for the robotic warehouse simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `PackageId`, `SlotId`                      |
//! | [`pos`]         | `Position`, `Direction`                               |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (runtime), `SlotRng` (per spawn slot)        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{PackageId, RobotId, SlotId};
pub use pos::{Direction, Position};
pub use rng::{SimRng, SlotRng};
pub use time::Tick;
