use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::session::Session;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    SpeedUp,
    SpeedDown,
    Exit,
    Other,
}

impl Key {
    pub fn from_key_event(key: KeyEvent) -> Key {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') => Key::Up,
            KeyCode::Down | KeyCode::Char('s') => Key::Down,
            KeyCode::Left | KeyCode::Char('a') => Key::Left,
            KeyCode::Right | KeyCode::Char('d') => Key::Right,
            KeyCode::F(1) | KeyCode::Char('+') | KeyCode::Char('=') => Key::SpeedUp,
            KeyCode::F(2) | KeyCode::Char('-') | KeyCode::Char('_') => Key::SpeedDown,
            KeyCode::Esc | KeyCode::Char('q') => Key::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Exit,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Quit,
}

impl InputEvent {
    /// Key presses only; releases, repeats, mouse and resize events are dropped.
    pub fn from_crossterm(event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(InputEvent::KeyDown(Key::from_key_event(key)))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// New heading for `key` while moving towards `heading`.
///
/// Only perpendicular turns are accepted; the same or the opposite direction,
/// and non-steering keys, leave the heading unchanged.
pub fn turn(heading: Direction, key: Key) -> Option<Direction> {
    use Direction::*;

    match (heading, key) {
        (Up | Down, Key::Left) => Some(Left),
        (Up | Down, Key::Right) => Some(Right),
        (Left | Right, Key::Up) => Some(Up),
        (Left | Right, Key::Down) => Some(Down),
        _ => None,
    }
}

/// Applies every pending event in order. Stops at the first exit request.
pub fn handle_events<I>(events: I, snake: &mut Snake, session: &mut Session) -> Control
where
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        let key = match event {
            InputEvent::Quit => {
                info!("quit requested");
                return Control::Exit;
            }
            InputEvent::KeyDown(key) => key,
        };

        // Checked against the heading of the last move, not the pending one.
        if let Some(direction) = turn(snake.direction(), key) {
            debug!(?direction, "turn");
            snake.update_direction(direction);
            continue;
        }

        match key {
            Key::SpeedUp => {
                if session.speed_mut().increase() {
                    info!(speed = session.speed().get(), "speed up");
                }
            }
            Key::SpeedDown => {
                if session.speed_mut().decrease() {
                    info!(speed = session.speed().get(), "speed down");
                }
            }
            Key::Exit => {
                info!("exit key pressed");
                return Control::Exit;
            }
            _ => {}
        }
    }
    Control::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::config::{MAX_SPEED, MIN_SPEED};
    use crate::session::Speed;

    fn key_for(direction: Direction) -> Key {
        match direction {
            Direction::Up => Key::Up,
            Direction::Down => Key::Down,
            Direction::Left => Key::Left,
            Direction::Right => Key::Right,
        }
    }

    fn snake(direction: Direction) -> Snake {
        Snake::with_direction(Cell::new(320, 240), direction)
    }

    #[test]
    fn turn_table() {
        for heading in Direction::ALL {
            for target in Direction::ALL {
                let expected = if target == heading || target == heading.opposite() {
                    None
                } else {
                    Some(target)
                };
                assert_eq!(turn(heading, key_for(target)), expected, "{heading:?} -> {target:?}");
            }
            for key in [Key::SpeedUp, Key::SpeedDown, Key::Exit, Key::Other] {
                assert_eq!(turn(heading, key), None);
            }
        }
    }

    #[test]
    fn reversal_never_changes_direction() {
        for heading in Direction::ALL {
            let mut snake = snake(heading);
            let mut session = Session::new(Speed::new(10));
            let events = [InputEvent::KeyDown(key_for(heading.opposite()))];

            assert_eq!(handle_events(events, &mut snake, &mut session), Control::Continue);
            assert_eq!(snake.direction(), heading);
            assert_eq!(snake.next_direction(), heading);
        }
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse() {
        let mut snake = snake(Direction::Right);
        let mut session = Session::new(Speed::new(10));
        let events = [
            InputEvent::KeyDown(Key::Up),
            InputEvent::KeyDown(Key::Left),
        ];

        handle_events(events, &mut snake, &mut session);

        assert_eq!(snake.next_direction(), Direction::Up);
    }

    #[test]
    fn drains_every_event() {
        let mut snake = snake(Direction::Left);
        let mut session = Session::new(Speed::new(10));
        let events = [
            InputEvent::KeyDown(Key::Other),
            InputEvent::KeyDown(Key::SpeedUp),
            InputEvent::KeyDown(Key::Down),
            InputEvent::KeyDown(Key::SpeedUp),
        ];

        assert_eq!(handle_events(events, &mut snake, &mut session), Control::Continue);
        assert_eq!(session.speed().get(), 12);
        assert_eq!(snake.next_direction(), Direction::Down);
    }

    #[test]
    fn speed_keys_saturate() {
        let mut snake = snake(Direction::Left);
        let mut session = Session::new(Speed::new(10));

        handle_events([InputEvent::KeyDown(Key::SpeedUp); 100], &mut snake, &mut session);
        assert_eq!(session.speed().get(), MAX_SPEED);

        handle_events([InputEvent::KeyDown(Key::SpeedDown); 100], &mut snake, &mut session);
        assert_eq!(session.speed().get(), MIN_SPEED);
    }

    #[test]
    fn exit_stops_processing() {
        let mut snake = snake(Direction::Left);
        let mut session = Session::new(Speed::new(10));
        let events = [
            InputEvent::KeyDown(Key::Exit),
            InputEvent::KeyDown(Key::SpeedUp),
        ];

        assert_eq!(handle_events(events, &mut snake, &mut session), Control::Exit);
        assert_eq!(session.speed().get(), 10);
        assert_eq!(
            handle_events([InputEvent::Quit], &mut snake, &mut session),
            Control::Exit
        );
    }

    #[test]
    fn maps_crossterm_keys() {
        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(
            InputEvent::from_crossterm(press(KeyCode::F(1))),
            Some(InputEvent::KeyDown(Key::SpeedUp))
        );
        assert_eq!(
            InputEvent::from_crossterm(press(KeyCode::F(2))),
            Some(InputEvent::KeyDown(Key::SpeedDown))
        );
        assert_eq!(
            InputEvent::from_crossterm(press(KeyCode::Esc)),
            Some(InputEvent::KeyDown(Key::Exit))
        );
        assert_eq!(
            InputEvent::from_crossterm(press(KeyCode::Char('x'))),
            Some(InputEvent::KeyDown(Key::Other))
        );
        assert_eq!(
            InputEvent::from_crossterm(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(InputEvent::KeyDown(Key::Exit))
        );
        assert_eq!(InputEvent::from_crossterm(Event::Resize(80, 24)), None);

        let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(InputEvent::from_crossterm(Event::Key(release)), None);
    }
}
