use super::direction::Direction;
use crate::consts;
use std::fmt;

/// A single square of the playing field.  `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The dimensions of the playing field.  There is no wraparound: stepping
/// off an edge leaves the grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridWorld {
    width: u16,
    height: u16,
}

impl GridWorld {
    /// Create a grid of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub const fn new(width: u16, height: u16) -> GridWorld {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        GridWorld { width, height }
    }

    pub fn width(self) -> u16 {
        self.width
    }

    pub fn height(self) -> u16 {
        self.height
    }

    /// Total number of cells in the grid
    pub fn cell_count(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// The cell in the middle of the grid, rounding towards the bottom-right
    /// for even dimensions
    pub fn center(self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell in row-major order
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Return the cell one step from `cell` in `direction`, or `None` if that
    /// would leave the grid.
    pub fn step(self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dx, dy) = direction.delta();
        let next = Cell {
            x: cell.x.checked_add_signed(dx.into())?,
            y: cell.y.checked_add_signed(dy.into())?,
        };
        self.contains(next).then_some(next)
    }
}

impl Default for GridWorld {
    fn default() -> GridWorld {
        GridWorld::new(consts::GRID_WIDTH, consts::GRID_HEIGHT)
    }
}
