use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use crate::board::{Board, Cell};
use crate::frontend::{EventSource, FrameClock, Paint, Surface};
use crate::input::InputEvent;

const BOARD_BACKGROUND_COLOR: Color = Color::Rgb { r: 197, g: 197, b: 197 };
const FOOD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const SNAKE_HEAD_COLOR: Color = Color::Rgb { r: 0, g: 150, b: 0 };
const SNAKE_BODY_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const SNAKE_TAIL_COLOR: Color = Color::Rgb { r: 140, g: 255, b: 140 };

/// One board cell is two terminal columns wide so it looks roughly square.
const COLUMNS_PER_CELL: u16 = 2;
/// Row 0 holds the status line.
const BOARD_TOP: u16 = 1;

/// Largest board, in cells, whose terminal coordinates still fit in `u16`.
pub const MAX_COLUMNS: i32 = (u16::MAX / COLUMNS_PER_CELL) as i32;
pub const MAX_ROWS: i32 = (u16::MAX - BOARD_TOP) as i32;

/// Fails if the board and its status line do not fit the current terminal.
pub fn ensure_fits(board: &Board) -> Result<()> {
    let (columns, rows) = terminal::size().context("failed to read the terminal size")?;
    if !fits(board, columns, rows) {
        bail!(
            "a {}x{} cell board needs a terminal of {}x{}, this one is {}x{}; \
             enlarge it or pass a smaller --width/--height",
            board.columns(),
            board.rows(),
            i64::from(board.columns()) * i64::from(COLUMNS_PER_CELL),
            i64::from(board.rows()) + i64::from(BOARD_TOP),
            columns,
            rows
        );
    }
    Ok(())
}

fn fits(board: &Board, columns: u16, rows: u16) -> bool {
    board.columns() <= i32::from(columns / COLUMNS_PER_CELL)
        && board.rows() <= i32::from(rows.saturating_sub(BOARD_TOP))
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    board: Board,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, board: Board) -> Self {
        TerminalSurface { out, board }
    }

    fn origin(&self, cell: Cell) -> Result<(u16, u16)> {
        let grid = self.board.grid();
        let column = u16::try_from(cell.x / grid)
            .ok()
            .and_then(|column| column.checked_mul(COLUMNS_PER_CELL))
            .with_context(|| format!("cell {cell:?} is right of the last terminal column"))?;
        let row = u16::try_from(cell.y / grid)
            .ok()
            .and_then(|row| row.checked_add(BOARD_TOP))
            .with_context(|| format!("cell {cell:?} is below the last terminal row"))?;
        Ok((column, row))
    }
}

fn color(paint: Paint) -> Color {
    match paint {
        Paint::Background => BOARD_BACKGROUND_COLOR,
        Paint::Food => FOOD_COLOR,
        Paint::SnakeHead => SNAKE_HEAD_COLOR,
        Paint::SnakeBody => SNAKE_BODY_COLOR,
        Paint::SnakeTail => SNAKE_TAIL_COLOR,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> Result<()> {
        let blank = " ".repeat(self.board.columns() as usize * COLUMNS_PER_CELL as usize);
        queue!(
            self.out,
            Clear(ClearType::All),
            SetBackgroundColor(BOARD_BACKGROUND_COLOR)
        )?;
        for row in 0..self.board.rows() {
            let (_, y) = self.origin(Cell::new(0, row * self.board.grid()))?;
            queue!(self.out, MoveTo(0, y), Print(&blank))?;
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    fn fill_cell(&mut self, cell: Cell, paint: Paint) -> Result<()> {
        let (column, row) = self.origin(cell)?;
        queue!(
            self.out,
            MoveTo(column, row),
            SetBackgroundColor(color(paint)),
            Print("  "),
            ResetColor
        )?;
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<()> {
        queue!(
            self.out,
            SetTitle(status),
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Pending crossterm events, read without blocking.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn drain(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(input) = InputEvent::from_crossterm(event::read()?) {
                events.push(input);
            }
        }
        Ok(events)
    }
}

/// Sleeps so that consecutive `wait` calls are at least one tick apart.
#[derive(Debug, Default)]
pub struct TickClock {
    next: Option<Instant>,
}

impl TickClock {
    pub fn new() -> Self {
        TickClock::default()
    }
}

impl FrameClock for TickClock {
    fn wait(&mut self, ticks_per_second: u32) {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        if let Some(next) = self.next {
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            }
        }
        self.next = Some(Instant::now() + period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Board = Board::new(640, 480, 20);

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.out).expect("utf-8 output")
    }

    #[test]
    fn cells_map_to_double_width_columns_below_status() {
        let mut surface = TerminalSurface::new(Vec::new(), BOARD);
        surface
            .fill_cell(Cell::new(40, 20), Paint::Food)
            .expect("fill");
        surface.present().expect("present");

        // MoveTo is 0-based, the escape sequence is 1-based: column 4, row 2.
        assert!(output(surface).contains("\x1b[3;5H"));
    }

    #[test]
    fn cells_beyond_terminal_coordinates_are_an_error() {
        let mut surface = TerminalSurface::new(Vec::new(), Board::new(800_000, 40, 20));
        assert!(surface.fill_cell(Cell::new(799_980, 0), Paint::Food).is_err());

        let mut surface = TerminalSurface::new(Vec::new(), Board::new(40, 2_000_000, 20));
        assert!(surface.fill_cell(Cell::new(0, 1_999_980), Paint::Food).is_err());
    }

    #[test]
    fn board_must_fit_the_window() {
        let board = Board::new(640, 480, 20);
        assert!(fits(&board, 64, 25));
        assert!(fits(&board, 200, 60));
        assert!(!fits(&board, 63, 25));
        assert!(!fits(&board, 64, 24));
        assert!(!fits(&board, 0, 0));
    }

    #[test]
    fn status_line_is_printed() {
        let mut surface = TerminalSurface::new(Vec::new(), BOARD);
        surface
            .set_status("Snake | Speed: 10 | Record: 1")
            .expect("status");
        assert!(output(surface).contains("Snake | Speed: 10 | Record: 1"));
    }

    #[test]
    fn clear_paints_every_row() {
        let mut surface = TerminalSurface::new(Vec::new(), Board::new(60, 40, 20));
        surface.clear().expect("clear");
        let out = output(surface);
        assert_eq!(out.matches("      ").count(), 2);
    }

    #[test]
    fn clock_waits_one_period_between_ticks() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.wait(50);
        clock.wait(50);
        assert!(start.elapsed() >= Duration::from_millis(19));
    }
}
