use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::Heading;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position clamped into bounds on both axes.
    #[must_use]
    pub fn clamped(self, bounds: GridSize) -> Self {
        Self {
            x: clamp_axis(self.x, i32::from(bounds.width)),
            y: clamp_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring position one cell towards `heading`.
    #[must_use]
    pub fn stepped(self, heading: Heading) -> Self {
        let (dx, dy) = heading.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

fn clamp_axis(value: i32, upper_bound: i32) -> i32 {
    value.clamp(0, (upper_bound - 1).max(0))
}

/// Rendering hint for one body segment.
///
/// Straight variants name the direction of travel through the cell. Corner
/// variants are named `<old><new>`: `RightUp` is a cell entered while moving
/// right and left while moving up.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum SegmentOrientation {
    Up,
    Right,
    Down,
    Left,
    UpRight,
    UpLeft,
    RightUp,
    RightDown,
    DownRight,
    DownLeft,
    LeftUp,
    LeftDown,
}

impl SegmentOrientation {
    /// Straight segment aligned with `heading`.
    #[must_use]
    pub fn straight(heading: Heading) -> Self {
        match heading {
            Heading::Up => Self::Up,
            Heading::Right => Self::Right,
            Heading::Down => Self::Down,
            Heading::Left => Self::Left,
        }
    }

    /// Corner for a turn from `from` to `to`, or `None` when the pair is not a
    /// quarter turn.
    #[must_use]
    pub fn turn(from: Heading, to: Heading) -> Option<Self> {
        use Heading::{Down, Left, Right, Up};

        let corner = match (from, to) {
            (Up, Right) => Self::UpRight,
            (Up, Left) => Self::UpLeft,
            (Right, Up) => Self::RightUp,
            (Right, Down) => Self::RightDown,
            (Down, Right) => Self::DownRight,
            (Down, Left) => Self::DownLeft,
            (Left, Up) => Self::LeftUp,
            (Left, Down) => Self::LeftDown,
            _ => return None,
        };
        Some(corner)
    }

    /// Heading the snake had when it entered the cell.
    #[must_use]
    pub fn entry(self) -> Heading {
        match self {
            Self::Up | Self::UpRight | Self::UpLeft => Heading::Up,
            Self::Right | Self::RightUp | Self::RightDown => Heading::Right,
            Self::Down | Self::DownRight | Self::DownLeft => Heading::Down,
            Self::Left | Self::LeftUp | Self::LeftDown => Heading::Left,
        }
    }

    /// Heading the snake had when it left (or will leave) the cell.
    #[must_use]
    pub fn exit(self) -> Heading {
        match self {
            Self::Up | Self::RightUp | Self::LeftUp => Heading::Up,
            Self::Right | Self::UpRight | Self::DownRight => Heading::Right,
            Self::Down | Self::RightDown | Self::LeftDown => Heading::Down,
            Self::Left | Self::UpLeft | Self::DownLeft => Heading::Left,
        }
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        self.entry() != self.exit()
    }
}

/// One occupied cell of the body together with its rendering hint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Segment {
    pub position: Position,
    pub orientation: SegmentOrientation,
}

/// Outcome of a single [`Snake::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum MovementEvent {
    Moved,
    Waited,
}

/// Segmented body, heading buffer and movement cadence.
///
/// The body is ordered tail first; the back of the deque is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Segment>,
    /// Heading the next move will use.
    heading: Heading,
    length: usize,
    cadence: u32,
    cadence_remaining: u32,
}

impl Snake {
    /// Creates the starting snake: three cells from `(2, 2)` to `(4, 2)`
    /// heading right.
    #[must_use]
    pub fn new(cadence: u32) -> Self {
        Self::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 4, y: 2 },
            ],
            Heading::Right,
            cadence,
        )
    }

    /// Creates a snake from explicit positions ordered tail to head.
    ///
    /// Every segment starts straight along `heading`. The retention cap is the
    /// segment count, but never below the initial length.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is empty.
    #[must_use]
    pub fn from_segments(positions: Vec<Position>, heading: Heading, cadence: u32) -> Self {
        assert!(
            !positions.is_empty(),
            "snake must start with at least one segment"
        );

        let length = positions.len().max(INITIAL_SNAKE_LENGTH);
        let body = positions
            .into_iter()
            .map(|position| Segment {
                position,
                orientation: SegmentOrientation::straight(heading),
            })
            .collect();
        let cadence = cadence.max(1);

        Self {
            body,
            heading,
            length,
            cadence,
            cadence_remaining: cadence - 1,
        }
    }

    /// Requests a new heading. Returns whether the request was accepted.
    ///
    /// Requests equal or opposite to the current heading are ignored. An
    /// accepted request marks the head cell as the corner from the current
    /// heading to `requested` and commits it; of several turns between two
    /// moves the last one wins.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        let Some(corner) = SegmentOrientation::turn(self.heading, requested) else {
            return false;
        };

        if let Some(head) = self.body.back_mut() {
            head.orientation = corner;
        }

        debug!(from = ?self.heading, to = ?requested, "heading changed");
        self.heading = requested;
        true
    }

    /// Runs one tick of the movement cadence.
    ///
    /// Moves one cell towards the heading when the countdown has run out,
    /// otherwise only counts down. The new head is clamped to `bounds`, so
    /// pushing into a wall keeps the head in place while the tail still
    /// follows.
    pub fn advance(&mut self, bounds: GridSize) -> MovementEvent {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        if self.cadence_remaining > 0 {
            self.cadence_remaining -= 1;
            return MovementEvent::Waited;
        }

        let next_head = self.head().stepped(self.heading).clamped(bounds);
        self.body.push_back(Segment {
            position: next_head,
            orientation: SegmentOrientation::straight(self.heading),
        });

        while self.body.len() > self.length {
            let _ = self.body.pop_front();
        }

        self.cadence_remaining = self.cadence - 1;
        trace!(x = next_head.x, y = next_head.y, "snake moved");
        MovementEvent::Moved
    }

    /// Raises the retention cap by `amount`. The tail stops being trimmed for
    /// that many moves.
    pub fn grow(&mut self, amount: usize) {
        self.length = self.length.saturating_add(amount);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body
            .back()
            .expect("snake body must always contain at least one segment")
            .position
    }

    /// Returns the current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the retention cap, which doubles as the displayed score.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the heading the next move will use.
    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    /// Ticks left before the next move.
    #[must_use]
    pub fn cadence_remaining(&self) -> u32 {
        self.cadence_remaining
    }

    /// Iterates over segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Iterates over segment positions from tail to head.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|segment| segment.position)
    }

    /// Iterates over segment orientations from tail to head.
    pub fn orientations(&self) -> impl Iterator<Item = SegmentOrientation> + '_ {
        self.body.iter().map(|segment| segment.orientation)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Heading;

    use super::{MovementEvent, Position, SegmentOrientation, Snake};

    const BOARD: GridSize = GridSize {
        width: 20,
        height: 20,
    };

    fn orientations(snake: &Snake) -> Vec<SegmentOrientation> {
        snake.orientations().collect()
    }

    fn positions(snake: &Snake) -> Vec<Position> {
        snake.positions().collect()
    }

    #[test]
    fn position_clamping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert_eq!(
            Position { x: -1, y: 3 }.clamped(bounds),
            Position { x: 0, y: 3 }
        );
        assert_eq!(
            Position { x: 4, y: 8 }.clamped(bounds),
            Position { x: 4, y: 7 }
        );
        assert_eq!(
            Position { x: 10, y: -2 }.clamped(bounds),
            Position { x: 9, y: 0 }
        );
    }

    #[test]
    fn corners_exist_only_for_quarter_turns() {
        assert_eq!(
            SegmentOrientation::turn(Heading::Right, Heading::Up),
            Some(SegmentOrientation::RightUp)
        );
        assert_eq!(
            SegmentOrientation::turn(Heading::Down, Heading::Left),
            Some(SegmentOrientation::DownLeft)
        );
        assert_eq!(SegmentOrientation::turn(Heading::Up, Heading::Up), None);
        assert_eq!(SegmentOrientation::turn(Heading::Up, Heading::Down), None);

        let corner = SegmentOrientation::LeftDown;
        assert_eq!(corner.entry(), Heading::Left);
        assert_eq!(corner.exit(), Heading::Down);
        assert!(corner.is_corner());
        assert!(!SegmentOrientation::Left.is_corner());
    }

    #[test]
    fn new_snake_matches_starting_layout() {
        let snake = Snake::new(1);

        assert_eq!(
            positions(&snake),
            vec![
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 4, y: 2 },
            ]
        );
        assert_eq!(snake.length(), 3);
        assert_eq!(snake.heading(), Heading::Right);
        assert_eq!(orientations(&snake), vec![SegmentOrientation::Right; 3]);
    }

    #[test]
    fn cadence_moves_once_every_n_calls() {
        let mut snake = Snake::new(4);

        for round in 0..3 {
            for _ in 0..3 {
                assert_eq!(snake.advance(BOARD), MovementEvent::Waited);
            }
            assert_eq!(snake.advance(BOARD), MovementEvent::Moved);
            assert_eq!(snake.head(), Position { x: 5 + round, y: 2 });
        }
    }

    #[test]
    fn waiting_does_not_touch_the_body() {
        let mut snake = Snake::new(2);
        let before = positions(&snake);

        assert_eq!(snake.advance(BOARD), MovementEvent::Waited);

        assert_eq!(positions(&snake), before);
        assert_eq!(snake.cadence_remaining(), 0);
    }

    #[test]
    fn moving_keeps_length_and_appends_straight_head() {
        let mut snake = Snake::new(1);

        snake.advance(BOARD);

        assert_eq!(
            positions(&snake),
            vec![
                Position { x: 3, y: 2 },
                Position { x: 4, y: 2 },
                Position { x: 5, y: 2 },
            ]
        );
        assert_eq!(snake.orientations().last(), Some(SegmentOrientation::Right));
    }

    #[test]
    fn same_and_reverse_headings_are_rejected() {
        let mut snake = Snake::new(1);
        let before = orientations(&snake);

        assert!(!snake.set_heading(Heading::Right));
        assert!(!snake.set_heading(Heading::Left));

        assert_eq!(snake.heading(), Heading::Right);
        assert_eq!(orientations(&snake), before);
    }

    #[test]
    fn turn_marks_head_as_corner() {
        let mut snake = Snake::new(1);

        assert!(snake.set_heading(Heading::Down));

        assert_eq!(snake.heading(), Heading::Down);
        assert_eq!(
            orientations(&snake),
            vec![
                SegmentOrientation::Right,
                SegmentOrientation::Right,
                SegmentOrientation::RightDown,
            ]
        );

        snake.advance(BOARD);
        assert_eq!(snake.head(), Position { x: 4, y: 3 });
        assert_eq!(
            orientations(&snake),
            vec![
                SegmentOrientation::Right,
                SegmentOrientation::RightDown,
                SegmentOrientation::Down,
            ]
        );
    }

    #[test]
    fn later_turn_before_move_wins() {
        let mut snake = Snake::new(1);

        assert!(snake.set_heading(Heading::Up));
        assert!(snake.set_heading(Heading::Right));

        assert_eq!(snake.heading(), Heading::Right);
        assert_eq!(
            snake.orientations().last(),
            Some(SegmentOrientation::UpRight)
        );

        assert!(snake.set_heading(Heading::Down));
        assert_eq!(
            snake.orientations().last(),
            Some(SegmentOrientation::RightDown)
        );
        snake.advance(BOARD);
        assert_eq!(snake.head(), Position { x: 4, y: 3 });
    }

    #[test]
    fn second_turn_is_checked_against_pending_heading() {
        let mut snake = Snake::new(1);

        assert!(snake.set_heading(Heading::Up));
        assert!(snake.set_heading(Heading::Left));

        assert_eq!(snake.heading(), Heading::Left);
        assert_eq!(
            snake.orientations().last(),
            Some(SegmentOrientation::UpLeft)
        );
        assert!(!snake.set_heading(Heading::Right));
        assert!(!snake.set_heading(Heading::Left));

        snake.advance(BOARD);
        assert_eq!(snake.head(), Position { x: 3, y: 2 });
        assert_eq!(snake.orientations().last(), Some(SegmentOrientation::Left));
    }

    #[test]
    fn moving_into_wall_clamps_head() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 0, y: 2 }],
            Heading::Left,
            1,
        );

        assert_eq!(snake.advance(BOARD), MovementEvent::Moved);
        assert_eq!(snake.head(), Position { x: 0, y: 2 });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn growth_delays_tail_trimming() {
        let mut snake = Snake::new(1);

        snake.grow(2);
        snake.advance(BOARD);
        assert_eq!(snake.len(), 4);
        snake.advance(BOARD);
        assert_eq!(snake.len(), 5);
        snake.advance(BOARD);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.positions().next(), Some(Position { x: 3, y: 2 }));
    }

    #[test]
    fn zero_cadence_is_treated_as_every_tick() {
        let mut snake = Snake::new(0);

        assert_eq!(snake.cadence(), 1);
        assert_eq!(snake.advance(BOARD), MovementEvent::Moved);
    }
}
