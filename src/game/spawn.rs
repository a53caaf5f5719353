use super::grid::{Cell, GridWorld};
use rand::Rng;
use std::collections::HashSet;

/// Picks random free cells for newly-spawned items
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpawnPlacer {
    grid: GridWorld,
}

impl SpawnPlacer {
    pub fn new(grid: GridWorld) -> SpawnPlacer {
        SpawnPlacer { grid }
    }

    pub fn grid(&self) -> GridWorld {
        self.grid
    }

    /// Choose a cell uniformly at random from those not in `occupied`.
    ///
    /// Cells are sampled from the whole grid until a free one turns up, so
    /// this gets slow as the grid fills.  Returns `None` if every cell of the
    /// grid is occupied.
    pub fn place_avoiding<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
    ) -> Option<Cell> {
        let taken = occupied.iter().filter(|&&c| self.grid.contains(c)).count();
        if taken >= self.grid.cell_count() {
            return None;
        }
        loop {
            let cell = Cell::new(
                rng.random_range(0..self.grid.width()),
                rng.random_range(0..self.grid.height()),
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
    }
}
