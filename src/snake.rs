use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::board::{Board, Cell};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen orientation (y grows downwards).
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[cfg(test)]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// What a single `move_step` did to the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head advanced; `vacated` is the tail cell that was trimmed, if any.
    Moved { vacated: Option<Cell> },
    /// The new head landed on the body and the snake was reset.
    Collided,
}

/// Ordered body cells, head first.
///
/// `length` is the target length: the body may be one cell shorter right
/// after eating and catches up on the following move because the tail is not
/// trimmed.
#[derive(Debug, Clone)]
pub struct Snake {
    positions: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    next_direction: Direction,
    start: Cell,
}

impl Snake {
    /// Fresh snake at `start` heading in a random direction.
    pub fn new<R: Rng + ?Sized>(start: Cell, rng: &mut R) -> Self {
        Snake::with_direction(start, Direction::random(rng))
    }

    pub fn with_direction(start: Cell, direction: Direction) -> Self {
        let mut positions = VecDeque::new();
        positions.push_back(start);

        Snake {
            positions,
            length: 1,
            direction,
            next_direction: direction,
            start,
        }
    }

    /// Back to a single cell at the start position with a random heading.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Snake::with_direction(self.start, Direction::random(rng));
    }

    /// Heading of the last completed move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading the next move will use.
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Unconditional setter. Reversal filtering happens in the input layer.
    pub fn update_direction(&mut self, direction: Direction) {
        self.next_direction = direction;
    }

    pub fn head_position(&self) -> Cell {
        self.positions.front().copied().unwrap_or(self.start)
    }

    pub fn positions(&self) -> &VecDeque<Cell> {
        &self.positions
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.positions.iter().copied().collect()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn move_step<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) -> MoveOutcome {
        self.direction = self.next_direction;
        let new_head = board.step(self.head_position(), self.direction);

        if self.positions.contains(&new_head) {
            self.reset(rng);
            return MoveOutcome::Collided;
        }

        self.positions.push_front(new_head);
        let vacated = if self.positions.len() > self.length {
            self.positions.pop_back()
        } else {
            None
        };
        MoveOutcome::Moved { vacated }
    }
}
