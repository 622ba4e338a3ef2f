//! Cells and the arithmetic around them.
//!
//! Cells are addressed in board units (the same units as the board's width
//! and height) by their top left corner, so a cell on a board with a cell
//! size of 20 always has coordinates that are multiples of 20.

use super::Direction;

use std::fmt::{self, Display};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl Display for Cell {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.x, self.y)
    }
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The cell at grid column `col`, row `row`.
    pub fn from_grid(col: i32, row: i32, cell_size: i32) -> Self {
        Cell { x: col * cell_size, y: row * cell_size }
    }

    /// The neighbouring cell one `cell_size` step away in `dir`.
    ///
    /// `None` if that would overflow; such a cell couldn't be on any board.
    pub fn stepped(self, dir: Direction, cell_size: i32) -> Option<Cell> {
        let Cell { x, y } = self;
        let (Δx, Δy) = dir.into_pair();

        Some(Cell {
            x: x.checked_add(Δx.checked_mul(cell_size)?)?,
            y: y.checked_add(Δy.checked_mul(cell_size)?)?,
        })
    }

    /// Whether the whole footprint of this cell lies on a `width` x `height`
    /// board. Only the near corner needs checking since every cell is the
    /// same size.
    pub fn within(self, width: i32, height: i32, cell_size: i32) -> bool {
        (0..=width - cell_size).contains(&self.x) && (0..=height - cell_size).contains(&self.y)
    }

    pub fn is_aligned(self, cell_size: i32) -> bool {
        self.x % cell_size == 0 && self.y % cell_size == 0
    }

    /// `(column, row)` of this cell on the grid.
    pub fn grid_pos(self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }

    /// The square this cell covers, scaled by `scale` output units (pixels,
    /// usually) per board unit.
    pub fn footprint(self, cell_size: i32, scale: i32) -> Rect {
        Rect {
            x: self.x * scale,
            y: self.y * scale,
            w: cell_size * scale,
            h: cell_size * scale,
        }
    }
}

/// An axis aligned rectangle in output units, for renderers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}
