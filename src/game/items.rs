//! Things the snake can pick up
use super::grid::Cell;
use super::powerups::PowerUpKind;
use super::spawn::SpawnPlacer;
use crate::consts;
use rand::Rng;
use std::collections::HashSet;

/// The food item.  Exactly one is on the field while a round is in play.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Food {
    cell: Cell,
    special: bool,
    /// Ticks since a special food appeared; only used for animation
    age: u32,
}

impl Food {
    pub fn new(cell: Cell, special: bool) -> Food {
        Food {
            cell,
            special,
            age: 0,
        }
    }

    /// Place a new food on a free cell.  The food is special if
    /// `force_special` is true, or else with probability
    /// [`SPECIAL_FOOD_PROBABILITY`][consts::SPECIAL_FOOD_PROBABILITY].
    /// Returns `None` if there is no free cell.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        placer: &SpawnPlacer,
        occupied: &HashSet<Cell>,
        force_special: bool,
    ) -> Option<Food> {
        let cell = placer.place_avoiding(rng, occupied)?;
        let special = force_special || rng.random_bool(consts::SPECIAL_FOOD_PROBABILITY);
        Some(Food::new(cell, special))
    }

    /// Move the food to a new free cell and reroll whether it's special.  If
    /// there is no free cell, the food is left as is and `false` is returned.
    pub fn respawn<R: Rng>(
        &mut self,
        rng: &mut R,
        placer: &SpawnPlacer,
        occupied: &HashSet<Cell>,
        force_special: bool,
    ) -> bool {
        match Food::spawn(rng, placer, occupied, force_special) {
            Some(food) => {
                *self = food;
                true
            }
            None => false,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Points for eating this food outside of a mini-game
    pub fn points(&self) -> u32 {
        if self.special {
            consts::SPECIAL_FOOD_POINTS
        } else {
            consts::FOOD_POINTS
        }
    }

    pub(super) fn tick(&mut self) {
        if self.special {
            self.age = self.age.saturating_add(1);
        }
    }
}

/// An uncollected power-up lying on the field
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldPowerUp {
    pub cell: Cell,
    pub kind: PowerUpKind,
    pub age: u32,
}

impl FieldPowerUp {
    pub fn new(cell: Cell, kind: PowerUpKind) -> FieldPowerUp {
        FieldPowerUp { cell, kind, age: 0 }
    }

    pub(super) fn tick(&mut self) {
        self.age = self.age.saturating_add(1);
    }
}

/// A coin; picking one up starts a mini-game
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Coin {
    pub cell: Cell,
    pub age: u32,
}

impl Coin {
    pub fn new(cell: Cell) -> Coin {
        Coin { cell, age: 0 }
    }

    pub(super) fn tick(&mut self) {
        self.age = self.age.saturating_add(1);
    }
}
