use rand::Rng;
use tracing::debug;

use crate::config::GridSize;
use crate::snake::Position;

/// Board dimensions and the apples currently on it.
///
/// Apples are drawn independently and uniformly, so two apples may share a
/// cell and an apple may land under the snake.
#[derive(Debug, Clone)]
pub struct GridWorld {
    bounds: GridSize,
    apple_count: usize,
    apples: Vec<Position>,
}

impl GridWorld {
    /// Creates an empty world; call [`GridWorld::spawn_initial`] to populate it.
    #[must_use]
    pub fn new(bounds: GridSize, apple_count: usize) -> Self {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        Self {
            bounds,
            apple_count,
            apples: Vec::with_capacity(apple_count),
        }
    }

    /// Replaces the apple set with `count` fresh random positions.
    pub fn spawn_initial<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) {
        self.apples = spawn_apples(rng, self.bounds, count);
        debug!(count, "apples spawned");
    }

    /// Removes and returns every apple at `position`.
    pub fn collect_at(&mut self, position: Position) -> Vec<Position> {
        let (consumed, remaining): (Vec<Position>, Vec<Position>) = self
            .apples
            .iter()
            .partition(|apple| **apple == position);

        if !consumed.is_empty() {
            self.apples = remaining;
            debug!(
                x = position.x,
                y = position.y,
                eaten = consumed.len(),
                left = self.apples.len(),
                "apples collected"
            );
        }
        consumed
    }

    /// Spawns a full new set when no apples remain. Returns whether it did.
    ///
    /// A non-empty set is left untouched, so leftovers are never merged with a
    /// refill.
    pub fn refill_if_empty<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.apples.is_empty() {
            return false;
        }

        self.spawn_initial(rng, self.apple_count);
        true
    }

    /// Places apples at explicit positions, replacing the current set.
    pub fn set_apples(&mut self, apples: Vec<Position>) {
        self.apples = apples;
    }

    #[must_use]
    pub fn apples(&self) -> &[Position] {
        &self.apples
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

/// Draws `count` independent uniform positions inside `bounds`.
#[must_use]
pub fn spawn_apples<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    count: usize,
) -> Vec<Position> {
    (0..count)
        .map(|_| Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        })
        .collect()
}
