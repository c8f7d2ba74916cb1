use rand::Rng;

use crate::snake::Direction;

/// A grid-aligned cell, addressed in screen units (multiples of the grid size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Fixed-size toroidal playfield. Width and height are in screen units and are
/// always whole multiples of `grid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    grid: i32,
}

impl Board {
    pub const fn new(width: i32, height: i32, grid: i32) -> Self {
        Board {
            width,
            height,
            grid,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn grid(&self) -> i32 {
        self.grid
    }

    pub fn columns(&self) -> i32 {
        self.width / self.grid
    }

    pub fn rows(&self) -> i32 {
        self.height / self.grid
    }

    pub fn area(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Grid-aligned middle of the board, where every snake starts.
    pub fn center(&self) -> Cell {
        Cell {
            x: self.columns() / 2 * self.grid,
            y: self.rows() / 2 * self.grid,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x)
            && (0..self.height).contains(&cell.y)
            && cell.x % self.grid == 0
            && cell.y % self.grid == 0
    }

    /// Folds an off-board cell back onto the board from the opposite edge.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.width),
            y: cell.y.rem_euclid(self.height),
        }
    }

    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.vector();
        self.wrap(Cell {
            x: cell.x + dx * self.grid,
            y: cell.y + dy * self.grid,
        })
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell {
            x: rng.gen_range(0..self.columns()) * self.grid,
            y: rng.gen_range(0..self.rows()) * self.grid,
        }
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| Cell {
                x: col * self.grid,
                y: row * self.grid,
            })
        })
    }
}
