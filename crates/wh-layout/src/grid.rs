//! Live cell contents of the warehouse floor.
//!
//! `Grid` exclusively owns every [`Cell`].  A package cell holds only the
//! package's identifier; the package record itself lives in the package
//! registry in `wh-sim`.

use wh_core::{PackageId, Position};

use crate::{Layout, LayoutError, LayoutResult};

/// Coarse classification of a cell, used for rendering and observations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Floor,
    Shelf,
    Drop,
    PackageOnShelf,
}

/// The contents of one grid cell.
///
/// Walkable cells track how many robots stand on them.  More than one robot
/// on a cell is a collision, not an error.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Floor { robots: u32 },
    Drop { robots: u32 },
    Shelf,
    Package(PackageId),
}

impl Cell {
    pub const EMPTY_FLOOR: Cell = Cell::Floor { robots: 0 };
    pub const EMPTY_DROP: Cell = Cell::Drop { robots: 0 };

    #[inline]
    pub fn kind(self) -> CellKind {
        match self {
            Cell::Floor { .. } => CellKind::Floor,
            Cell::Drop { .. }  => CellKind::Drop,
            Cell::Shelf        => CellKind::Shelf,
            Cell::Package(_)   => CellKind::PackageOnShelf,
        }
    }

    /// `true` for cells a robot may stand on.
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(self, Cell::Floor { .. } | Cell::Drop { .. })
    }

    /// Robots currently on the cell (always 0 for shelf cells).
    #[inline]
    pub fn occupancy(self) -> u32 {
        match self {
            Cell::Floor { robots } | Cell::Drop { robots } => robots,
            Cell::Shelf | Cell::Package(_) => 0,
        }
    }

    #[inline]
    pub fn package(self) -> Option<PackageId> {
        match self {
            Cell::Package(id) => Some(id),
            _ => None,
        }
    }
}

/// The live 2-D cell array plus the floor / shelf / drop position sets.
#[derive(Clone, Debug)]
pub struct Grid {
    width:  u32,
    height: u32,
    /// Row-major, `width * height` long.
    cells:  Vec<Cell>,
    shelves: Vec<Position>,
    /// Plain floor cells (drop zones excluded), row-major.
    floor:  Vec<Position>,
    drops:  Vec<Position>,
}

impl Grid {
    /// Lay out an empty grid from `layout`, marking `drops` as drop zones.
    ///
    /// # Errors
    ///
    /// A drop zone outside the map or on a shelf cell is rejected.
    pub fn new(layout: &Layout, drops: &[Position]) -> LayoutResult<Self> {
        let mut cells: Vec<Cell> = (0..layout.cell_count())
            .map(|i| {
                let pos = Position::from_flat_index(i, layout.width);
                if layout.is_shelf(pos) { Cell::Shelf } else { Cell::EMPTY_FLOOR }
            })
            .collect();

        let mut drop_set: Vec<Position> = Vec::with_capacity(drops.len());
        for &pos in drops {
            if !layout.contains(pos) {
                return Err(LayoutError::OutOfBounds(pos));
            }
            if layout.is_shelf(pos) {
                return Err(LayoutError::DropOnShelf(pos));
            }
            if !drop_set.contains(&pos) {
                drop_set.push(pos);
            }
            cells[pos.flat_index(layout.width)] = Cell::EMPTY_DROP;
        }

        let floor = layout
            .floor_positions()
            .into_iter()
            .filter(|p| !drop_set.contains(p))
            .collect();

        Ok(Self {
            width:   layout.width,
            height:  layout.height,
            cells,
            shelves: layout.shelf_positions(),
            floor,
            drops:   drop_set,
        })
    }

    // ── Dimensions and position sets ──────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.within(self.height, self.width)
    }

    pub fn shelf_positions(&self) -> &[Position] {
        &self.shelves
    }

    pub fn floor_positions(&self) -> &[Position] {
        &self.floor
    }

    pub fn drop_positions(&self) -> &[Position] {
        &self.drops
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[pos.flat_index(self.width)])
    }

    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_walkable)
    }

    #[inline]
    pub fn occupancy(&self, pos: Position) -> u32 {
        self.get(pos).map_or(0, Cell::occupancy)
    }

    #[inline]
    pub fn package_at(&self, pos: Position) -> Option<PackageId> {
        self.get(pos).and_then(Cell::package)
    }

    #[inline]
    pub fn is_empty_shelf(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Shelf))
    }

    /// Shelf cells currently holding no package, row-major.
    pub fn empty_shelves(&self) -> Vec<Position> {
        self.shelves
            .iter()
            .copied()
            .filter(|&p| self.is_empty_shelf(p))
            .collect()
    }

    /// Sum of occupancy over every walkable cell.
    pub fn total_occupancy(&self) -> u64 {
        self.cells.iter().map(|c| c.occupancy() as u64).sum()
    }

    /// Number of packages sitting on shelves.
    pub fn package_count(&self) -> usize {
        self.cells.iter().filter(|c| c.package().is_some()).count()
    }

    // ── Robot occupancy ───────────────────────────────────────────────────

    /// Add a robot to a walkable cell; returns the new occupancy, or `None`
    /// if the cell cannot hold robots.
    pub fn enter(&mut self, pos: Position) -> Option<u32> {
        let cell = self.cell_mut(pos)?;
        match cell {
            Cell::Floor { robots } | Cell::Drop { robots } => {
                *robots += 1;
                Some(*robots)
            }
            Cell::Shelf | Cell::Package(_) => None,
        }
    }

    /// Remove a robot from a walkable cell.  Saturates at zero.
    pub fn leave(&mut self, pos: Position) {
        if let Some(Cell::Floor { robots } | Cell::Drop { robots }) = self.cell_mut(pos) {
            *robots = robots.saturating_sub(1);
        }
    }

    // ── Packages ──────────────────────────────────────────────────────────

    /// Put package `id` on the empty shelf at `pos`.
    pub fn place_package(&mut self, pos: Position, id: PackageId) -> LayoutResult<()> {
        let cell = self.cell_mut(pos).ok_or(LayoutError::OutOfBounds(pos))?;
        match *cell {
            Cell::Shelf => {
                *cell = Cell::Package(id);
                Ok(())
            }
            Cell::Package(_) => Err(LayoutError::ShelfOccupied(pos)),
            Cell::Floor { .. } | Cell::Drop { .. } => Err(LayoutError::NotAShelf(pos)),
        }
    }

    /// Remove and return the package at `pos`, leaving an empty shelf.
    pub fn take_package(&mut self, pos: Position) -> Option<PackageId> {
        let cell = self.cell_mut(pos)?;
        let id = cell.package()?;
        *cell = Cell::Shelf;
        Some(id)
    }

    /// Remove every package and robot, restoring the freshly generated plan.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = match *cell {
                Cell::Floor { .. } => Cell::EMPTY_FLOOR,
                Cell::Drop { .. } => Cell::EMPTY_DROP,
                Cell::Shelf | Cell::Package(_) => Cell::Shelf,
            };
        }
    }

    #[inline]
    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if self.contains(pos) {
            Some(&mut self.cells[pos.flat_index(self.width)])
        } else {
            None
        }
    }
}
