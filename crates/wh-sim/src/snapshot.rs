//! Read-only views handed to agents and to rendering collaborators.

use std::fmt;

use wh_core::Position;
use wh_layout::{CellKind, Grid};

use crate::{Package, Robot, RobotRegistry};

/// Per-tick observation: every robot and every package still on a shelf.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Robots in registry order.
    pub robots:   Vec<Robot>,
    /// Shelved packages in ascending ID order.
    pub packages: Vec<Package>,
}

/// Result of [`Warehouse::step`][crate::Warehouse::step] and
/// [`Warehouse::reset`][crate::Warehouse::reset].
///
/// The environment defines no terminal state (`done` is always `false`) and
/// carries no auxiliary info.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward:      f64,
    pub done:        bool,
}

/// A robot as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotMarker {
    pub position: Position,
    pub carrying: usize,
}

/// Renderable snapshot of the grid: cell classes plus robot markers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    /// Row-major, `width * height` long.
    pub cells:  Vec<CellKind>,
    /// Robot occupancy per cell, row-major.
    pub occupancy: Vec<u32>,
    pub robots: Vec<RobotMarker>,
}

// Palette: floor, shelf, package, empty robot, loaded robot, drop, collision.
const FLOOR:        [f32; 3] = [0.0, 0.0, 0.0];
const SHELF:        [f32; 3] = [0.5, 0.2, 0.05];
const PACKAGE:      [f32; 3] = [0.0, 0.8, 0.0];
const ROBOT_EMPTY:  [f32; 3] = [0.0, 0.0, 0.8];
const ROBOT_LOADED: [f32; 3] = [0.0, 0.8, 0.8];
const DROP:         [f32; 3] = [0.8, 0.0, 0.0];
const COLLISION:    [f32; 3] = [1.0, 1.0, 1.0];

impl Frame {
    pub(crate) fn capture(grid: &Grid, robots: &RobotRegistry) -> Self {
        Self {
            width:     grid.width(),
            height:    grid.height(),
            cells:     grid.cells().iter().map(|c| c.kind()).collect(),
            occupancy: grid.cells().iter().map(|c| c.occupancy()).collect(),
            robots:    robots
                .iter()
                .map(|r| RobotMarker { position: r.position, carrying: r.carried.len() })
                .collect(),
        }
    }

    #[inline]
    pub fn kind_at(&self, pos: Position) -> Option<CellKind> {
        pos.within(self.height, self.width)
            .then(|| self.cells[pos.flat_index(self.width)])
    }

    /// Color-coded bitmap, row-major, one RGB triple in `[0, 1]` per cell.
    ///
    /// Robots paint over the cell they stand on; a cell holding more than
    /// one robot is painted white.
    pub fn rgb(&self) -> Vec<[f32; 3]> {
        let mut bitmap: Vec<[f32; 3]> = self
            .cells
            .iter()
            .map(|kind| match kind {
                CellKind::Floor          => FLOOR,
                CellKind::Shelf          => SHELF,
                CellKind::PackageOnShelf => PACKAGE,
                CellKind::Drop           => DROP,
            })
            .collect();

        for robot in &self.robots {
            let i = robot.position.flat_index(self.width);
            bitmap[i] = if self.occupancy[i] > 1 {
                COLLISION
            } else if robot.carrying > 0 {
                ROBOT_LOADED
            } else {
                ROBOT_EMPTY
            };
        }
        bitmap
    }
}

/// ASCII map: `.` floor, `#` shelf, `P` package, `D` drop zone,
/// `R` empty robot, `L` loaded robot, `*` several robots.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut glyphs: Vec<char> = self
            .cells
            .iter()
            .map(|kind| match kind {
                CellKind::Floor          => '.',
                CellKind::Shelf          => '#',
                CellKind::PackageOnShelf => 'P',
                CellKind::Drop           => 'D',
            })
            .collect();

        for robot in &self.robots {
            let i = robot.position.flat_index(self.width);
            glyphs[i] = match (self.occupancy[i] > 1, robot.carrying > 0) {
                (true, _)      => '*',
                (false, true)  => 'L',
                (false, false) => 'R',
            };
        }

        for row in glyphs.chunks(self.width as usize) {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
