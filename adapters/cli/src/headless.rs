use serde::Serialize;
use snake_arena_core::{Command, Direction, EndCause, Event, HeldDirections, TileCoord};
use snake_arena_world::{self as world, query, Config, World};

/// Outcome of a round simulated without a window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RoundSummary {
    /// Seed used for food placement.
    pub(crate) seed: u64,
    /// Heading the round started with.
    pub(crate) heading: Direction,
    /// Simulation steps taken.
    pub(crate) ticks: u64,
    /// Whether a collision ended the round within the tick limit.
    pub(crate) ended: bool,
    /// Collision that ended the round.
    pub(crate) end_cause: Option<EndCause>,
    /// Meals eaten.
    pub(crate) score: i32,
    /// Body segments at the end of the run.
    pub(crate) length: usize,
    /// Tile boundary crossings observed.
    pub(crate) tiles_crossed: u64,
    /// Head tile at the end of the run.
    pub(crate) head_tile: TileCoord,
    /// Food tile at the end of the run.
    pub(crate) food_tile: TileCoord,
}

/// Runs a round with no keys held until it ends or `max_ticks` steps elapse.
pub(crate) fn run(config: Config, heading: Direction, max_ticks: u64) -> RoundSummary {
    let mut world = World::new(config);
    let mut events = Vec::new();
    world::apply(&mut world, Command::BeginRound { heading }, &mut events);

    let held = HeldDirections::default();
    let mut tiles_crossed = 0;
    for _ in 0..max_ticks {
        events.clear();
        let ended = world.tick(&held, &mut events);
        tiles_crossed += events
            .iter()
            .filter(|event| matches!(event, Event::TileCrossed { .. }))
            .count() as u64;
        if ended {
            break;
        }
    }

    let creature = query::creature(&world);
    tracing::debug!(ticks = query::tick_count(&world), tiles_crossed, "headless run finished");
    RoundSummary {
        seed: config.seed(),
        heading,
        ticks: query::tick_count(&world),
        ended: query::round_ended(&world),
        end_cause: query::end_cause(&world),
        score: query::score(&world),
        length: creature.segments.len(),
        tiles_crossed,
        head_tile: creature.head_tile,
        food_tile: query::food(&world).tile,
    }
}
