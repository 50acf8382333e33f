#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure steering system that turns held direction keys into steer commands.

use snake_arena_core::{Command, HeldDirections};

/// Translates a frame's held keys into ordered steer requests.
///
/// Every held key produces one request, in North, South, East, West order. The
/// world judges each request against the heading left by the previous one, so
/// holding Up and Left while heading South ends up heading East.
#[derive(Debug, Default)]
pub struct Steering;

impl Steering {
    /// Emits one [`Command::Steer`] per held key.
    pub fn handle(&self, held: &HeldDirections, out: &mut Vec<Command>) {
        out.extend(held.iter().map(|direction| Command::Steer { direction }));
    }
}
