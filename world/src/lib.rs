#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake Arena.
//!
//! The world owns the grid, the creature and the food exclusively. Callers
//! mutate it through [`apply`] and observe it through the [`query`] module;
//! nothing else holds a reference into its state between ticks.

mod food;
mod history;
mod snake;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_arena_core::{Command, Direction, EndCause, Event, Grid, HeldDirections, RoundPhase};

pub use food::{Food, FOOD_SPRITE_OFFSET};
pub use history::{SegmentHistory, INITIAL_BODY_LENGTH};
pub use snake::Snake;

const DEFAULT_FOOD_SEED: u64 = 0x5a4e_14c3_9e0b_77d1;

/// Construction parameters for a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid: Grid,
    seed: u64,
}

impl Config {
    /// Creates a configuration for the provided grid and food placement seed.
    #[must_use]
    pub const fn new(grid: Grid, seed: u64) -> Self {
        Self { grid, seed }
    }

    /// Arena geometry.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Seed for the food placement generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Grid::standard(), DEFAULT_FOOD_SEED)
    }
}

/// Represents the authoritative Snake Arena world state.
#[derive(Debug)]
pub struct World<R = ChaCha8Rng> {
    grid: Grid,
    snake: Snake,
    food: Food<R>,
    phase: RoundPhase,
    end_cause: Option<EndCause>,
    tick_index: u64,
}

impl World<ChaCha8Rng> {
    /// Creates a world in the ready phase with food placed from the configured seed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let grid = config.grid();
        let food = Food::new(&grid, ChaCha8Rng::seed_from_u64(config.seed()));
        Self::from_parts(grid, Snake::spawn(&grid), food)
    }
}

impl<R: Rng> World<R> {
    /// Assembles a world from explicitly constructed parts.
    #[must_use]
    pub fn from_parts(grid: Grid, snake: Snake, food: Food<R>) -> Self {
        Self {
            grid,
            snake,
            food,
            phase: RoundPhase::Ready,
            end_cause: None,
            tick_index: 0,
        }
    }

    /// Runs one simulation step for a frame of held keys.
    ///
    /// Held headings are requested in North, South, East, West order, each one
    /// checked against the heading left by the previous request, then the
    /// simulation advances. Returns `true` when this step ended the round.
    pub fn tick(&mut self, held: &HeldDirections, out_events: &mut Vec<Event>) -> bool {
        for direction in held.iter() {
            self.steer(direction, out_events);
        }
        self.step(out_events)
    }

    fn begin_round(&mut self, heading: Direction, out_events: &mut Vec<Event>) {
        if self.phase != RoundPhase::Ready {
            return;
        }

        self.snake.force_heading(heading);
        self.phase = RoundPhase::Running;
        tracing::info!(?heading, "round started");
        out_events.push(Event::RoundStarted { heading });
    }

    fn steer(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase != RoundPhase::Running {
            return;
        }

        let from = self.snake.heading();
        if from != direction && self.snake.set_direction(direction) {
            out_events.push(Event::HeadingChanged {
                from,
                to: direction,
            });
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.phase != RoundPhase::Running {
            return false;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        self.snake.tick();

        let tile = self.grid.pixel_to_tile(self.snake.head_pixel());
        let from = self.snake.head_tile();
        if tile != from {
            let collided = self.snake.on_tile_boundary_crossed(tile);
            tracing::debug!(tick = self.tick_index, ?from, to = ?tile, "tile boundary crossed");
            out_events.push(Event::TileCrossed { from, to: tile });
            if collided {
                self.end_round(EndCause::SelfCollision, out_events);
                return true;
            }
        }

        let center = self.grid.sprite_center(self.snake.head_pixel());
        if self.food.is_consumed(center) {
            let relocated_to = self
                .food
                .relocate(self.grid.tiles_wide(), self.grid.tiles_high());
            self.snake.grow();
            let count = self.food.consumed_count();
            tracing::debug!(tick = self.tick_index, count, ?relocated_to, "food consumed");
            out_events.push(Event::FoodConsumed {
                count,
                relocated_to,
            });
        }

        if !self.grid.play_bounds().contains(self.snake.head_pixel()) {
            self.end_round(EndCause::OutOfBounds, out_events);
            return true;
        }

        false
    }

    fn reset_round(&mut self, out_events: &mut Vec<Event>) {
        self.snake = Snake::spawn(&self.grid);
        self.food.reset(&self.grid);
        self.phase = RoundPhase::Ready;
        self.end_cause = None;
        self.tick_index = 0;
        out_events.push(Event::RoundReset);
    }

    fn end_round(&mut self, cause: EndCause, out_events: &mut Vec<Event>) {
        let score = self.food.consumed_count();
        self.snake.kill();
        self.phase = RoundPhase::Ended;
        self.end_cause = Some(cause);
        tracing::info!(tick = self.tick_index, ?cause, score, "round ended");
        out_events.push(Event::RoundEnded { cause, score });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply<R: Rng>(world: &mut World<R>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginRound { heading } => world.begin_round(heading, out_events),
        Command::Steer { direction } => world.steer(direction, out_events),
        Command::Tick => {
            let _ = world.step(out_events);
        }
        Command::ResetRound => world.reset_round(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_arena_core::{CreatureSnapshot, EndCause, FoodSnapshot, Grid, RoundPhase};

    use super::World;

    /// Provides read-only access to the arena geometry.
    #[must_use]
    pub fn grid<R>(world: &World<R>) -> &Grid {
        &world.grid
    }

    /// Current phase of the round.
    #[must_use]
    pub fn phase<R>(world: &World<R>) -> RoundPhase {
        world.phase
    }

    /// Reports whether a collision ended the round.
    #[must_use]
    pub fn round_ended<R>(world: &World<R>) -> bool {
        world.phase == RoundPhase::Ended
    }

    /// Collision that ended the round, if any.
    #[must_use]
    pub fn end_cause<R>(world: &World<R>) -> Option<EndCause> {
        world.end_cause
    }

    /// Number of simulation steps taken this round.
    #[must_use]
    pub fn tick_count<R>(world: &World<R>) -> u64 {
        world.tick_index
    }

    /// Meals eaten this round.
    #[must_use]
    pub fn score<R>(world: &World<R>) -> i32 {
        world.food.consumed_count()
    }

    /// Captures a read-only view of the creature.
    #[must_use]
    pub fn creature<R>(world: &World<R>) -> CreatureSnapshot {
        world.snake.snapshot()
    }

    /// Captures a read-only view of the food.
    #[must_use]
    pub fn food<R>(world: &World<R>) -> FoodSnapshot {
        world.food.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn world() -> World<StepRng> {
        let grid = Grid::standard();
        World::from_parts(grid, Snake::spawn(&grid), Food::new(&grid, StepRng::new(0, 0)))
    }

    #[test]
    fn ticks_are_ignored_until_the_round_begins() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        apply(
            &mut world,
            Command::Steer {
                direction: Direction::East,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::tick_count(&world), 0);
        assert_eq!(query::phase(&world), RoundPhase::Ready);
        assert_eq!(query::creature(&world).heading, Direction::North);
    }

    #[test]
    fn begin_round_accepts_any_heading() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginRound {
                heading: Direction::South,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::RoundStarted {
                heading: Direction::South
            }]
        );
        assert_eq!(query::phase(&world), RoundPhase::Running);
        assert_eq!(query::creature(&world).heading, Direction::South);
    }

    #[test]
    fn rejected_steer_emits_nothing() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginRound {
                heading: Direction::North,
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::Steer {
                direction: Direction::South,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::creature(&world).heading, Direction::North);
    }

    #[test]
    fn held_keys_are_applied_in_polling_order() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginRound {
                heading: Direction::South,
            },
            &mut events,
        );
        events.clear();

        let held = HeldDirections {
            north: true,
            south: false,
            east: true,
            west: false,
        };
        assert!(!world.tick(&held, &mut events));

        assert_eq!(
            events,
            vec![Event::HeadingChanged {
                from: Direction::South,
                to: Direction::East
            }]
        );
    }

    #[test]
    fn reset_returns_to_a_fresh_ready_round() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginRound {
                heading: Direction::North,
            },
            &mut events,
        );
        for _ in 0..100 {
            apply(&mut world, Command::Tick, &mut events);
        }
        assert!(query::round_ended(&world));

        events.clear();
        apply(&mut world, Command::ResetRound, &mut events);

        assert_eq!(events, vec![Event::RoundReset]);
        assert_eq!(query::phase(&world), RoundPhase::Ready);
        assert_eq!(query::end_cause(&world), None);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::tick_count(&world), 0);
        let creature = query::creature(&world);
        assert!(creature.alive);
        assert_eq!(creature.head_tile, snake_arena_core::TileCoord::new(6, 4));
    }

    #[test]
    fn default_config_uses_standard_grid() {
        let world = World::new(Config::default());
        assert_eq!(*query::grid(&world), Grid::standard());
        assert_eq!(query::score(&world), 0);
    }
}
