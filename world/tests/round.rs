use rand::rngs::mock::StepRng;
use snake_arena_core::{
    Command, Direction, EndCause, Event, Grid, HeldDirections, RoundPhase, TileCoord,
};
use snake_arena_world::{self as world, query, Config, Food, Snake, World};

fn parked_food(grid: &Grid) -> Food<StepRng> {
    Food::new(grid, StepRng::new(0, 0))
}

fn world_with(snake: Snake, food: Food<StepRng>) -> World<StepRng> {
    World::from_parts(Grid::standard(), snake, food)
}

fn begin(world: &mut World<StepRng>, heading: Direction) {
    let mut events = Vec::new();
    world::apply(world, Command::BeginRound { heading }, &mut events);
    assert_eq!(events, vec![Event::RoundStarted { heading }]);
}

fn run(world: &mut World<StepRng>, held: HeldDirections, ticks: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        let _ = world.tick(&held, &mut events);
    }
    events
}

fn tile_history(world: &World<StepRng>) -> Vec<TileCoord> {
    query::creature(world)
        .segments
        .iter()
        .map(|segment| segment.tile)
        .collect()
}

#[test]
fn heading_east_crosses_one_tile_in_sixteen_ticks() {
    let grid = Grid::standard();
    let mut world = world_with(Snake::spawn(&grid), parked_food(&grid));
    begin(&mut world, Direction::East);

    let events = run(&mut world, HeldDirections::default(), 16);

    assert_eq!(
        events,
        vec![Event::TileCrossed {
            from: TileCoord::new(6, 4),
            to: TileCoord::new(5, 4),
        }]
    );
    let creature = query::creature(&world);
    assert_eq!(creature.head_tile, TileCoord::new(5, 4));
    assert_eq!(creature.head_pixel.x(), 104);
    assert_eq!(creature.segments.len(), 2);
    assert_eq!(query::phase(&world), RoundPhase::Running);
}

#[test]
fn eating_grows_the_tail_after_the_next_crossing() {
    let grid = Grid::standard();
    let mut food = parked_food(&grid);
    food.place(TileCoord::new(7, 4));
    let mut world = world_with(Snake::spawn(&grid), food);
    begin(&mut world, Direction::North);

    let events = run(&mut world, HeldDirections::default(), 10);
    assert!(events.is_empty());

    let events = run(&mut world, HeldDirections::default(), 1);
    assert_eq!(
        events,
        vec![
            Event::TileCrossed {
                from: TileCoord::new(6, 4),
                to: TileCoord::new(6, 3),
            },
            Event::FoodConsumed {
                count: 1,
                relocated_to: TileCoord::new(0, 0),
            },
        ]
    );
    assert_eq!(query::score(&world), 1);
    assert_eq!(
        tile_history(&world),
        vec![
            TileCoord::new(6, 3),
            TileCoord::new(7, 5),
            TileCoord::new(7, 5)
        ]
    );

    let events = run(&mut world, HeldDirections::default(), 16);
    assert_eq!(
        events,
        vec![Event::TileCrossed {
            from: TileCoord::new(6, 3),
            to: TileCoord::new(6, 2),
        }]
    );
    assert_eq!(
        tile_history(&world),
        vec![
            TileCoord::new(6, 2),
            TileCoord::new(6, 3),
            TileCoord::new(7, 5)
        ]
    );
}

#[test]
fn running_north_leaves_the_arena_on_tick_eighty_one() {
    let grid = Grid::standard();
    let mut world = world_with(Snake::spawn(&grid), parked_food(&grid));
    begin(&mut world, Direction::North);

    let mut events = Vec::new();
    for _ in 0..80 {
        assert!(!world.tick(&HeldDirections::default(), &mut events));
    }
    assert!(world.tick(&HeldDirections::default(), &mut events));

    assert_eq!(
        events.last(),
        Some(&Event::RoundEnded {
            cause: EndCause::OutOfBounds,
            score: 0,
        })
    );
    assert_eq!(query::tick_count(&world), 81);
    assert_eq!(query::end_cause(&world), Some(EndCause::OutOfBounds));
    assert!(!query::creature(&world).alive);

    let pixel_before = query::creature(&world).head_pixel;
    assert!(!world.tick(&HeldDirections::only(Direction::East), &mut events));
    assert_eq!(query::creature(&world).head_pixel, pixel_before);
    assert_eq!(query::tick_count(&world), 81);
}

#[test]
fn circling_back_into_the_body_ends_the_round() {
    let grid = Grid::standard();
    let mut snake = Snake::spawn(&grid);
    for _ in 0..3 {
        snake.grow();
    }
    assert_eq!(snake.len(), 5);
    let mut world = world_with(snake, parked_food(&grid));
    begin(&mut world, Direction::North);

    let legs = [
        (Direction::North, 11),
        (Direction::East, 16),
        (Direction::South, 16),
        (Direction::West, 16),
        (Direction::North, 15),
    ];
    for (direction, ticks) in legs {
        let events = run(&mut world, HeldDirections::only(direction), ticks);
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, Event::RoundEnded { .. })),
            "round ended early while heading {direction:?}"
        );
    }

    let mut events = Vec::new();
    assert!(world.tick(&HeldDirections::only(Direction::North), &mut events));
    assert_eq!(
        events,
        vec![
            Event::TileCrossed {
                from: TileCoord::new(6, 4),
                to: TileCoord::new(6, 3),
            },
            Event::RoundEnded {
                cause: EndCause::SelfCollision,
                score: 0,
            },
        ]
    );
    assert_eq!(query::tick_count(&world), 75);
    assert_eq!(query::end_cause(&world), Some(EndCause::SelfCollision));
}

#[test]
fn seeded_worlds_replay_identically() {
    let replay = |seed: u64| {
        let mut world = World::new(Config::new(Grid::standard(), seed));
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::BeginRound {
                heading: Direction::West,
            },
            &mut events,
        );
        let turns = [Direction::North, Direction::East, Direction::South];
        let mut tick = 0;
        while !query::round_ended(&world) && tick < 2_000 {
            let held = HeldDirections::only(turns[(tick / 40) % turns.len()]);
            let _ = world.tick(&held, &mut events);
            tick += 1;
        }
        (events, query::food(&world), query::creature(&world))
    };

    assert_eq!(replay(42), replay(42));
}

#[test]
fn food_may_respawn_under_the_body_and_each_meal_adds_one_segment() {
    let grid = Grid::standard();
    let occupied = TileCoord::new(0, 0);
    let mut world = world_with(Snake::new(&grid, occupied, Direction::West), parked_food(&grid));
    begin(&mut world, Direction::West);
    assert_eq!(tile_history(&world)[0], occupied);

    for meal in 1..=7 {
        let events = run(&mut world, HeldDirections::default(), 1);
        assert_eq!(
            events,
            vec![Event::FoodConsumed {
                count: meal,
                relocated_to: occupied,
            }]
        );
        assert_eq!(query::food(&world).tile, occupied);
        assert!(tile_history(&world).contains(&occupied));
        assert_eq!(query::creature(&world).segments.len(), 2 + meal as usize);
        assert_eq!(query::phase(&world), RoundPhase::Running);
    }

    let events = run(&mut world, HeldDirections::default(), 1);
    assert_eq!(
        events,
        vec![Event::TileCrossed {
            from: TileCoord::new(-1, -1),
            to: TileCoord::new(0, -1),
        }]
    );
    assert_eq!(query::score(&world), 7);
    assert_eq!(query::creature(&world).segments.len(), 9);
}
