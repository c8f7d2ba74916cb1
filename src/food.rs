use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::warn;

use crate::board::{Board, Cell};

/// Random draws attempted per board cell before falling back to a scan of the
/// free cells.
const SAMPLES_PER_CELL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(Cell),
    /// Every cell is occupied; the food keeps its previous position.
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Food { position }
    }

    /// Food on a random cell outside `occupied`.
    pub fn spawn<R: Rng + ?Sized>(board: &Board, occupied: &HashSet<Cell>, rng: &mut R) -> Self {
        let mut food = Food::new(board.center());
        food.randomize_position(board, occupied, rng);
        food
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a uniformly random cell that is not in `occupied`.
    ///
    /// Sampling is bounded; once the budget is spent the free cells are
    /// enumerated and one is chosen, so a full board is reported instead of
    /// looping forever.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Placement {
        for _ in 0..board.area() * SAMPLES_PER_CELL {
            let candidate = board.random_cell(rng);
            debug_assert!(board.contains(candidate));
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return Placement::Placed(candidate);
            }
        }

        match board.cells().filter(|cell| !occupied.contains(cell)).choose(rng) {
            Some(candidate) => {
                self.position = candidate;
                Placement::Placed(candidate)
            }
            None => {
                warn!(occupied = occupied.len(), "no free cell left for food");
                Placement::BoardFull
            }
        }
    }
}
