//! Collaborators the game loop drives: something to paint on, something to
//! read input from and something to pace the ticks.

use anyhow::Result;

use crate::board::Cell;
use crate::input::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Background,
    Food,
    SnakeHead,
    SnakeBody,
    SnakeTail,
}

pub trait Surface {
    /// Repaints the whole board with the background.
    fn clear(&mut self) -> Result<()>;

    fn fill_cell(&mut self, cell: Cell, paint: Paint) -> Result<()>;

    fn set_status(&mut self, status: &str) -> Result<()>;

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> Result<()>;
}

pub trait EventSource {
    /// Everything queued since the previous call, without blocking.
    fn drain(&mut self) -> Result<Vec<InputEvent>>;
}

pub trait FrameClock {
    /// Blocks until the next tick boundary at `ticks_per_second`.
    fn wait(&mut self, ticks_per_second: u32);
}
