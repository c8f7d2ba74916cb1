use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};

use crate::board::{Board, Cell};
use crate::food::Food;
use crate::frontend::{EventSource, FrameClock, Paint, Surface};
use crate::input::{handle_events, Control, InputEvent};
use crate::session::{Session, Speed};
use crate::snake::{MoveOutcome, Snake};

/// What happened during one tick, enough to repaint incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub control: Control,
    pub collided: bool,
    pub ate: bool,
    pub vacated: Option<Cell>,
}

impl TickReport {
    fn idle(control: Control) -> Self {
        TickReport {
            control,
            collided: false,
            ate: false,
            vacated: None,
        }
    }
}

pub struct Game<R> {
    board: Board,
    snake: Snake,
    food: Food,
    session: Session,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(board: Board, speed: Speed, mut rng: R) -> Self {
        let snake = Snake::new(board.center(), &mut rng);
        let food = Food::spawn(&board, &snake.occupied(), &mut rng);

        Game {
            board,
            snake,
            food,
            session: Session::new(speed),
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Input, move, then consumption. Returns early without moving when an
    /// exit was requested.
    pub fn tick<I>(&mut self, events: I) -> TickReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if handle_events(events, &mut self.snake, &mut self.session) == Control::Exit {
            return TickReport::idle(Control::Exit);
        }

        let (collided, vacated) = match self.snake.move_step(&self.board, &mut self.rng) {
            MoveOutcome::Collided => {
                info!(record = self.session.record(), "snake bit itself, starting over");
                (true, None)
            }
            MoveOutcome::Moved { vacated } => (false, vacated),
        };

        let ate = !collided && self.snake.head_position() == self.food.position();
        if ate {
            self.snake.grow();
            self.session.observe_length(self.snake.length());
            let placement =
                self.food
                    .randomize_position(&self.board, &self.snake.occupied(), &mut self.rng);
            debug!(length = self.snake.length(), ?placement, "food eaten");
        }

        TickReport {
            control: Control::Continue,
            collided,
            ate,
            vacated,
        }
    }

    pub fn render<S: Surface>(&self, surface: &mut S, report: &TickReport) -> Result<()> {
        if report.collided {
            surface.clear()?;
        }
        if let Some(cell) = report.vacated {
            surface.fill_cell(cell, Paint::Background)?;
        }

        surface.fill_cell(self.food.position(), Paint::Food)?;

        let positions = self.snake.positions();
        for (i, cell) in positions.iter().enumerate().rev() {
            let paint = if i == 0 {
                Paint::SnakeHead
            } else if i == positions.len() - 1 {
                Paint::SnakeTail
            } else {
                Paint::SnakeBody
            };
            surface.fill_cell(*cell, paint)?;
        }

        surface.set_status(&self.session.status_line())?;
        surface.present()
    }
}

/// Runs ticks until an exit is requested and returns the record length.
pub fn run<R, S, E, C>(
    game: &mut Game<R>,
    surface: &mut S,
    events: &mut E,
    clock: &mut C,
) -> Result<usize>
where
    R: Rng,
    S: Surface,
    E: EventSource,
    C: FrameClock,
{
    info!(
        width = game.board.width(),
        height = game.board.height(),
        grid = game.board.grid(),
        speed = game.session.speed().get(),
        "game started"
    );

    surface.clear()?;
    game.render(surface, &TickReport::idle(Control::Continue))?;

    loop {
        clock.wait(game.session.speed().get());

        let report = game.tick(events.drain()?);
        if report.control == Control::Exit {
            break;
        }
        game.render(surface, &report)?;
    }

    info!(record = game.session.record(), "game finished");
    Ok(game.session.record())
}
