use super::direction::Direction;
use super::grid::{Cell, GridWorld};
use std::collections::VecDeque;

/// The player-controlled snake.
///
/// The body is ordered from head to tail and never contains the same cell
/// twice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    /// The cells occupied by the snake, with the head at the front
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake will move on the next call to
    /// [`Snake::advance()`]
    pub(super) direction: Direction,

    /// Whether the next move should leave the tail in place
    pub(super) grow_pending: bool,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `direction`
    pub fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
            grow_pending: false,
        }
    }

    /// Return the position of the snake's head
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the cells of the snake, head first
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_pending(&self) -> bool {
        self.grow_pending
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Point the snake in `direction` for the next move.  Turning straight
    /// back onto the neck is ignored.  Returns whether the direction was
    /// accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Make the next move extend the snake by one cell
    pub fn mark_growth(&mut self) {
        self.grow_pending = true;
    }

    /// Move the snake forwards one cell in its current direction.
    ///
    /// The cell the tail is leaving on this move counts as free unless the
    /// snake is about to grow or that cell is also the neck.  On collision
    /// the snake is left unchanged.
    #[doc(alias = "move")]
    pub fn advance(&mut self, grid: GridWorld) -> Result<(), Collision> {
        let head = self.head();
        let Some(new_head) = grid.step(head, self.direction) else {
            return Err(Collision::Wall);
        };
        let vacated = (!self.grow_pending && self.body.len() > 2)
            .then(|| self.body.back().copied())
            .flatten();
        if Some(new_head) != vacated && self.occupies(new_head) {
            return Err(Collision::Body(new_head));
        }
        self.body.push_front(new_head);
        if self.grow_pending {
            self.grow_pending = false;
        } else {
            let _ = self.body.pop_back();
        }
        Ok(())
    }
}

/// The reason a snake was unable to move
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Collision {
    /// The snake tried to leave the grid
    Wall,

    /// The snake tried to move onto its own body at the given cell
    Body(Cell),
}
