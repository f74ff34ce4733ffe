//! `wh-layout` — warehouse floor plan and live cell state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`topology`]  | `LayoutParams`, `Layout` (dimensions + shelf predicate)   |
//! | [`grid`]      | `Cell`, `CellKind`, `Grid` (live cells + position sets)   |
//! | [`error`]     | `LayoutError`, `LayoutResult<T>`                          |
//!
//! # Floor plan
//!
//! ```text
//! ---------------------------
//! I           C             I
//! I    SS  SS  SS  SS  SS   I
//! I C  SS  SS  SS  SS  SS C I
//! I    SS  SS  SS  SS  SS   I
//! I           C             I
//! I    SS  SS  SS  SS  SS   I
//! I C  SS  SS  SS  SS  SS C I
//! I    SS  SS  SS  SS  SS   I
//! I           C             I
//! ---------------------------
//! ```
//!
//! Shelf blocks are two cells wide and `shelf_length` cells tall.  Blocks in
//! a row are separated by `shelve_throughput` aisle columns; rows of blocks
//! and the outer perimeter are separated by `cross_throughput` wide cross
//! aisles (marked `C`).

pub mod error;
pub mod grid;
pub mod topology;


pub use error::{LayoutError, LayoutResult};
pub use grid::{Cell, CellKind, Grid};
pub use topology::{Layout, LayoutParams};
