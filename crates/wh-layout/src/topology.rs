//! Procedural floor-plan generation from structural parameters.
//!
//! ```text
//! width  = 2·shelf_width + 2·cross_throughput + (shelf_width − 1)·shelve_throughput
//! height = shelf_length·shelf_height + (shelf_height + 1)·cross_throughput
//! ```
//!
//! A cell `(row, col)` is a shelf cell iff
//!
//! ```text
//! row ≥ cross  ∧  (row − cross) mod (shelf_length + cross) < shelf_length
//! col ≥ cross  ∧  col < width − cross  ∧  (col − cross) mod (2 + shelve) < 2
//! ```
//!
//! Every other cell is floor.  Drop zones are explicit coordinates layered
//! on top by [`Grid::new`][crate::Grid::new].

use wh_core::Position;

use crate::{LayoutError, LayoutResult};

/// Structural parameters of the warehouse floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    /// Cells per shelf block along the row axis.
    pub shelf_length: u32,
    /// Number of block rows.
    pub shelf_height: u32,
    /// Number of block columns.
    pub shelf_width: u32,
    /// Aisle width between adjacent blocks in a row.
    pub shelve_throughput: u32,
    /// Width of the perimeter and the aisles between block rows.
    pub cross_throughput: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            shelf_length:      2,
            shelf_height:      2,
            shelf_width:       2,
            shelve_throughput: 1,
            cross_throughput:  1,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> LayoutResult<()> {
        for (name, value) in [
            ("shelf_length", self.shelf_length),
            ("shelf_height", self.shelf_height),
            ("shelf_width", self.shelf_width),
        ] {
            if value == 0 {
                return Err(LayoutError::Config(format!("{name} must be at least 1")));
            }
        }
        if self.checked_extent().is_none() {
            return Err(LayoutError::Config(format!(
                "structural parameters overflow the map size: {self:?}"
            )));
        }
        Ok(())
    }

    /// `(width, height, cell count)` with every intermediate term of the
    /// layout formulas checked; `None` on overflow.  Requires non-zero block
    /// dimensions.
    fn checked_extent(&self) -> Option<(u32, u32, usize)> {
        let cross = self.cross_throughput;

        let width = self
            .shelf_width
            .checked_mul(2)?
            .checked_add(cross.checked_mul(2)?)?
            .checked_add((self.shelf_width - 1).checked_mul(self.shelve_throughput)?)?;
        let height = self
            .shelf_length
            .checked_mul(self.shelf_height)?
            .checked_add(self.shelf_height.checked_add(1)?.checked_mul(cross)?)?;

        // Moduli used by `is_shelf`, and the shelf count.
        self.shelf_length.checked_add(cross)?;
        self.shelve_throughput.checked_add(2)?;
        (self.shelf_width as usize)
            .checked_mul(2)?
            .checked_mul(self.shelf_length as usize)?
            .checked_mul(self.shelf_height as usize)?;

        let cells = (width as usize).checked_mul(height as usize)?;
        Some((width, height, cells))
    }

    /// Map width in cells.  Only meaningful once [`validate`](Self::validate)
    /// has passed.
    pub fn width(&self) -> u32 {
        2 * self.shelf_width
            + 2 * self.cross_throughput
            + (self.shelf_width - 1) * self.shelve_throughput
    }

    /// Map height in cells.
    pub fn height(&self) -> u32 {
        self.shelf_length * self.shelf_height + (self.shelf_height + 1) * self.cross_throughput
    }

    /// Number of shelf cells the plan contains.
    pub fn shelf_count(&self) -> usize {
        2 * self.shelf_width as usize * self.shelf_length as usize * self.shelf_height as usize
    }

    /// The shelf predicate for a `width`-wide map.
    pub fn is_shelf(&self, width: u32, row: u32, col: u32) -> bool {
        let cross = self.cross_throughput;

        let in_shelf_band = row >= cross
            && (row - cross) % (self.shelf_length + cross) < self.shelf_length;

        let in_shelf_pair = col >= cross
            && col + cross < width
            && (col - cross) % (2 + self.shelve_throughput) < 2;

        in_shelf_band && in_shelf_pair
    }
}

/// A generated floor plan: dimensions plus the shelf/floor classification.
#[derive(Clone, Debug)]
pub struct Layout {
    pub params: LayoutParams,
    pub width:  u32,
    pub height: u32,
    /// Row-major shelf flags, `width * height` long.
    shelf_mask: Vec<bool>,
}

impl Layout {
    /// Validate `params` and classify every cell.
    pub fn generate(params: LayoutParams) -> LayoutResult<Self> {
        params.validate()?;
        let width = params.width();
        let height = params.height();

        let mut shelf_mask = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                shelf_mask.push(params.is_shelf(width, row, col));
            }
        }

        Ok(Self { params, width, height, shelf_mask })
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.within(self.height, self.width)
    }

    /// `true` if `pos` is in bounds and a shelf cell.
    #[inline]
    pub fn is_shelf(&self, pos: Position) -> bool {
        self.contains(pos) && self.shelf_mask[pos.flat_index(self.width)]
    }

    /// All shelf cells in row-major order.
    pub fn shelf_positions(&self) -> Vec<Position> {
        self.positions_where(true)
    }

    /// All non-shelf cells in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.positions_where(false)
    }

    pub fn cell_count(&self) -> usize {
        self.shelf_mask.len()
    }

    fn positions_where(&self, shelf: bool) -> Vec<Position> {
        self.shelf_mask
            .iter()
            .enumerate()
            .filter(|&(_, &is_shelf)| is_shelf == shelf)
            .map(|(i, _)| Position::from_flat_index(i, self.width))
            .collect()
    }
}
