//! `wh-schedule` — recurring package-spawn timers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`slot`]        | `SpawnSlot`, `PeriodBounds`, seeded slot sampling        |
//! | [`spawn_queue`] | `SpawnQueue` (binary min-heap keyed on due epoch)       |
//! | [`schedule`]    | `SpawnSchedule` (slots + queue, fires due slots per tick) |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Timer model (summary)
//!
//! Every slot owns a fixed `period`.  Each tick all remaining-tick counters
//! drop by one; a slot whose counter reaches zero fires, is reset to its
//! period, and goes back into the queue whether or not a package could be
//! created.  The queue therefore always holds exactly one entry per slot.
//!
//! ```text
//! tick 1..=period-1   remaining > 0   (nothing)
//! tick period         remaining = 0   fire → remaining = period
//! tick 2·period       remaining = 0   fire → …
//! ```

pub mod error;
pub mod schedule;
pub mod slot;
pub mod spawn_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use schedule::SpawnSchedule;
pub use slot::{PeriodBounds, SpawnSlot};
pub use spawn_queue::SpawnQueue;
