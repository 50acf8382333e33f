use std::time::Duration;

use snake_arena_core::Event;
use snake_arena_rendering::{
    cues::{cues_from_events, Cue},
    sprites::DeathAnimation,
    FrameInput, Overlay, Scene,
};
use snake_arena_system_round::{RoundFlow, RoundInput, Screen};
use snake_arena_world::{self as world, query, World};

/// Simulation steps per second.
pub(crate) const TICK_RATE: u32 = 60;

const MAX_STEPS_PER_FRAME: u32 = 8;

/// Couples the world with the round flow and advances both at a fixed rate.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    flow: RoundFlow,
    pending: Vec<Event>,
    death: Option<DeathAnimation>,
    accumulator: Duration,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            flow: RoundFlow::new(),
            pending: Vec::new(),
            death: None,
            accumulator: Duration::ZERO,
        }
    }

    pub(crate) fn step_duration() -> Duration {
        Duration::from_secs(1) / TICK_RATE
    }

    /// Advances by as many whole steps as `dt` covers and refreshes `scene`.
    ///
    /// A long stall is capped so the game does not race to catch up.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        let step = Self::step_duration();
        self.accumulator = (self.accumulator + dt).min(step * MAX_STEPS_PER_FRAME);

        let mut cues = Vec::new();
        while self.accumulator >= step {
            self.accumulator -= step;
            self.step(input, &mut cues);
        }

        scene.populate(
            &query::creature(&self.world),
            &query::food(&self.world),
            self.death.as_ref(),
            overlay_for(self.flow.screen()),
            cues,
        );
    }

    fn step(&mut self, input: FrameInput, cues: &mut Vec<Cue>) {
        let mut commands = Vec::new();
        self.flow.handle(
            &self.pending,
            &RoundInput::new(input.held, input.restart),
            &mut commands,
        );

        self.pending.clear();
        for command in commands {
            world::apply(&mut self.world, command, &mut self.pending);
        }
        cues.extend(cues_from_events(&self.pending));

        match self.flow.screen() {
            Screen::GameOver { .. } => self.death.get_or_insert_with(DeathAnimation::new).advance(),
            Screen::Title | Screen::Playing => self.death = None,
        }
    }

    pub(crate) fn screen(&self) -> Screen {
        self.flow.screen()
    }
}

fn overlay_for(screen: Screen) -> Overlay {
    match screen {
        Screen::Title => Overlay::Title,
        Screen::Playing => Overlay::None,
        Screen::GameOver { score } => Overlay::GameOver { score },
    }
}
