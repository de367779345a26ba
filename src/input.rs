use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Serialize;

/// Direction of travel on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Returns the unit step `(dx, dy)` for this heading. Screen coordinates,
    /// so `Up` decreases `y`.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Returns true for `Left` and `Right`.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// High-level input events consumed by the session driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Heading(Heading),
    Pause,
    Quit,
}

/// Maps a terminal key event to a game input.
///
/// Only key presses are considered; repeats and releases are ignored so that a
/// held key does not flood the heading buffer on terminals that report them.
#[must_use]
pub fn map_key_event(event: KeyEvent) -> Option<GameInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(GameInput::Heading(Heading::Up)),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            Some(GameInput::Heading(Heading::Right))
        }
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Some(GameInput::Heading(Heading::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Some(GameInput::Heading(Heading::Left)),
        KeyCode::Char('p' | 'P' | ' ') => Some(GameInput::Pause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
