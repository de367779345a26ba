use tile_snake::config::BoardConfig;
use tile_snake::game::GameSession;
use tile_snake::input::{GameInput, Heading};
use tile_snake::snake::{MovementEvent, Position, SegmentOrientation, Snake};

fn five_by_five(seed: u64) -> GameSession {
    let config = BoardConfig {
        columns: 5,
        rows: 5,
        apple_count: 3,
        cadence: 1,
        seed: Some(seed),
        ..BoardConfig::default()
    };
    GameSession::new(&config).expect("5x5 board should be valid")
}

#[test]
fn turn_up_after_moving_right() {
    let mut session = five_by_five(42);
    session.snake = Snake::from_segments(vec![Position { x: 2, y: 2 }], Heading::Right, 1);
    session.world.set_apples(vec![Position { x: 0, y: 4 }]);

    assert_eq!(session.tick().movement, MovementEvent::Moved);
    assert_eq!(session.snake.head(), Position { x: 3, y: 2 });

    assert!(session.apply_input(GameInput::Heading(Heading::Up)));
    assert_eq!(
        session.snake.orientations().last(),
        Some(SegmentOrientation::RightUp)
    );

    assert_eq!(session.tick().movement, MovementEvent::Moved);
    assert_eq!(session.snake.head(), Position { x: 3, y: 1 });
    assert_eq!(
        session.snake.orientations().collect::<Vec<_>>(),
        vec![
            SegmentOrientation::Right,
            SegmentOrientation::RightUp,
            SegmentOrientation::Up,
        ]
    );
}

#[test]
fn left_wall_clamps_head_but_still_moves() {
    let mut session = five_by_five(7);
    session.snake = Snake::from_segments(vec![Position { x: 0, y: 2 }], Heading::Left, 1);
    session.world.set_apples(vec![Position { x: 4, y: 4 }]);

    assert_eq!(session.tick().movement, MovementEvent::Moved);
    assert_eq!(session.snake.head(), Position { x: 0, y: 2 });
}

#[test]
fn eating_one_of_several_apples_does_not_refill() {
    let mut session = five_by_five(3);
    session.snake = Snake::from_segments(vec![Position { x: 2, y: 2 }], Heading::Right, 1);
    session.world.set_apples(vec![Position { x: 3, y: 2 }, Position { x: 0, y: 0 }]);

    let outcome = session.tick();

    assert_eq!(outcome.apples_eaten, 1);
    assert!(!outcome.refilled);
    assert_eq!(session.snake.length(), 4);
    assert_eq!(session.score, 1);
    assert_eq!(session.world.apples(), &[Position { x: 0, y: 0 }]);
}

#[test]
fn collecting_every_apple_refills_exactly_once() {
    let mut session = five_by_five(11);
    session.snake = Snake::from_segments(vec![Position { x: 0, y: 1 }], Heading::Right, 1);
    session.world.set_apples(vec![
        Position { x: 1, y: 1 },
        Position { x: 2, y: 1 },
        Position { x: 3, y: 1 },
    ]);

    let mut refills = 0;
    for _ in 0..3 {
        let outcome = session.tick();
        assert_eq!(outcome.apples_eaten, 1);
        if outcome.refilled {
            refills += 1;
        }
    }

    assert_eq!(refills, 1);
    assert_eq!(session.world.apples().len(), 3);
    assert_eq!(session.snake.length(), 6);
    assert_eq!(session.score, 3);
}

#[test]
fn body_never_exceeds_length_over_long_run() {
    let mut session = five_by_five(99);
    let turns = [Heading::Down, Heading::Left, Heading::Up, Heading::Right];

    for step in 0..400 {
        if step % 5 == 0 {
            session.apply_input(GameInput::Heading(turns[(step / 5) % turns.len()]));
        }

        let previous_head = session.snake.head();
        let heading = session.snake.heading();
        let previous_len = session.snake.len();
        let previous_length = session.snake.length();
        let outcome = session.tick();

        assert!(session.snake.len() <= session.snake.length());
        assert!(session.snake.head().is_within_bounds(session.bounds()));
        if outcome.movement == MovementEvent::Moved {
            assert_eq!(
                session.snake.head(),
                previous_head.stepped(heading).clamped(session.bounds())
            );
            assert_eq!(
                session.snake.len(),
                (previous_len + 1).min(previous_length)
            );
        }
    }
}
