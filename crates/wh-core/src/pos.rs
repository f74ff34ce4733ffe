//! Grid coordinates and the four movement directions.
//!
//! `Up` increases the row and `Down` decreases it; `Left` and `Right`
//! decrease and increase the column.  This is the convention the integer
//! action encoding is defined against, so action `0` (move down) from
//! `(3, 3)` lands on `(2, 3)`.

use std::fmt;

/// A cell coordinate on the warehouse floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Row-major index into a map `width` cells wide.
    #[inline]
    pub fn flat_index(self, width: u32) -> usize {
        self.row as usize * width as usize + self.col as usize
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    #[inline]
    pub fn from_flat_index(index: usize, width: u32) -> Self {
        let w = width as usize;
        Self::new((index / w) as u32, (index % w) as u32)
    }

    /// `true` if the position lies on a `height` × `width` map.
    #[inline]
    pub fn within(self, height: u32, width: u32) -> bool {
        self.row < height && self.col < width
    }

    /// The neighbouring cell in `dir`, or `None` if it would leave a
    /// `height` × `width` map.
    pub fn step(self, dir: Direction, height: u32, width: u32) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        next.within(height, width).then_some(next)
    }

    /// In-bounds orthogonal neighbours, scanned in [`Direction::SCAN_ORDER`].
    pub fn neighbours(self, height: u32, width: u32) -> impl Iterator<Item = Position> {
        Direction::SCAN_ORDER
            .into_iter()
            .filter_map(move |dir| self.step(dir, height, width))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal movement directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed adjacency scan order used by pickup and drop.
    pub const SCAN_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(row delta, column delta)`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (1, 0),
            Direction::Down  => (-1, 0),
            Direction::Left  => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
