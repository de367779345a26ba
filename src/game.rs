use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{BoardConfig, GridSize};
use crate::error::ConfigError;
use crate::input::{GameInput, Heading};
use crate::snake::{MovementEvent, Position, Segment, Snake};
use crate::world::GridWorld;

/// Current high-level session state. There is no game-over state: the snake
/// runs until the host stops ticking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum SessionStatus {
    Playing,
    Paused,
}

/// What happened during one [`GameSession::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickOutcome {
    pub movement: MovementEvent,
    pub apples_eaten: usize,
    pub refilled: bool,
}

impl TickOutcome {
    const IDLE: Self = Self {
        movement: MovementEvent::Waited,
        apples_eaten: 0,
        refilled: false,
    };
}

/// Read-only view handed to render consumers after a tick.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub bounds: GridSize,
    /// Body from tail to head.
    pub body: Vec<Segment>,
    pub heading: Heading,
    pub apples: Vec<Position>,
    pub length: usize,
    pub score: u32,
    pub tick_count: u64,
    pub status: SessionStatus,
    pub seed: u64,
}

/// Complete mutable state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub world: GridWorld,
    pub score: u32,
    pub tick_count: u64,
    pub status: SessionStatus,
    seed: u64,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session from `config`, drawing a fresh seed when the config
    /// does not pin one.
    pub fn new(config: &BoardConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::new_with_seed(config, seed)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    ///
    /// Fails when `config` does not describe a playable board, e.g. one too
    /// small to hold the starting body.
    pub fn new_with_seed(config: &BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let snake = Snake::new(config.cadence);
        let mut world = GridWorld::new(config.grid_size(), config.apple_count);
        world.spawn_initial(&mut rng, config.apple_count);

        info!(
            seed,
            columns = config.columns,
            rows = config.rows,
            apples = config.apple_count,
            cadence = config.cadence,
            "session started"
        );

        Ok(Self {
            snake,
            world,
            score: 0,
            tick_count: 0,
            status: SessionStatus::Playing,
            seed,
            rng,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// When the snake moves, apples under the new head are eaten (one growth
    /// and one point each) and the board is refilled if that emptied it.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::Playing {
            return TickOutcome::IDLE;
        }

        self.tick_count += 1;
        let movement = self.snake.advance(self.world.bounds());
        if movement == MovementEvent::Waited {
            return TickOutcome::IDLE;
        }

        let eaten = self.world.collect_at(self.snake.head());
        for _ in &eaten {
            self.snake.grow(1);
            self.score += 1;
        }

        let refilled = self.world.refill_if_empty(&mut self.rng);
        if refilled {
            debug!(tick = self.tick_count, "apple set refilled");
        }

        TickOutcome {
            movement,
            apples_eaten: eaten.len(),
            refilled,
        }
    }

    /// Applies one external input event. Returns whether it changed state.
    pub fn apply_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Heading(heading) => {
                self.status == SessionStatus::Playing && self.snake.set_heading(heading)
            }
            GameInput::Pause => {
                self.status = match self.status {
                    SessionStatus::Playing => SessionStatus::Paused,
                    SessionStatus::Paused => SessionStatus::Playing,
                };
                true
            }
            GameInput::Quit => false,
        }
    }

    /// Copies out everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds(),
            body: self.snake.segments().copied().collect(),
            heading: self.snake.heading(),
            apples: self.world.apples().to_vec(),
            length: self.snake.length(),
            score: self.score,
            tick_count: self.tick_count,
            status: self.status,
            seed: self.seed,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.world.bounds()
    }

    /// Seed the session random generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
