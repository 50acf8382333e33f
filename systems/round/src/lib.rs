#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure round-flow system that moves the game between its title, playing and
//! game over screens.

use snake_arena_core::{Command, Event, HeldDirections};
use snake_arena_system_steering::Steering;

/// Screen the game is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Waiting for the first direction key.
    Title,
    /// The round is running; one tick per frame.
    Playing,
    /// The round ended; waiting for the restart key.
    GameOver {
        /// Meals eaten during the finished round.
        score: i32,
    },
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundInput {
    /// Direction keys held during the frame.
    pub held: HeldDirections,
    /// Indicates whether the restart key was pressed on this frame.
    pub restart: bool,
}

impl RoundInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(held: HeldDirections, restart: bool) -> Self {
        Self { held, restart }
    }
}

/// Drives the screen sequence and emits the world commands each screen needs.
#[derive(Debug)]
pub struct RoundFlow {
    screen: Screen,
    steering: Steering,
}

impl Default for RoundFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundFlow {
    /// Creates the system on the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Title,
            steering: Steering,
        }
    }

    /// Screen to present for the current frame.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Consumes the events of the previous frame and this frame's input.
    ///
    /// On the title screen the first held key in polling order begins the round.
    /// While playing, held keys become steer commands followed by a single tick.
    /// The game over screen waits for the restart key and resets the world.
    pub fn handle(&mut self, events: &[Event], input: &RoundInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::RoundEnded { cause, score } if self.screen == Screen::Playing => {
                    tracing::debug!(?cause, score, "switching to game over screen");
                    self.screen = Screen::GameOver { score: *score };
                }
                Event::RoundReset => self.screen = Screen::Title,
                _ => {}
            }
        }

        match self.screen {
            Screen::Title => {
                if let Some(heading) = input.held.first() {
                    out.push(Command::BeginRound { heading });
                    self.screen = Screen::Playing;
                }
            }
            Screen::Playing => {
                self.steering.handle(&input.held, out);
                out.push(Command::Tick);
            }
            Screen::GameOver { .. } => {
                if input.restart {
                    out.push(Command::ResetRound);
                    self.screen = Screen::Title;
                }
            }
        }
    }
}
