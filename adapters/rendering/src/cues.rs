//! Audio cues derived from world events.

use snake_arena_core::Event;

/// Short sound effect requested by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The creature ate and grew.
    Growth,
    /// The round ended in a collision.
    Collision,
}

impl Cue {
    /// Cue triggered by `event`, if any.
    #[must_use]
    pub const fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::FoodConsumed { .. } => Some(Self::Growth),
            Event::RoundEnded { .. } => Some(Self::Collision),
            _ => None,
        }
    }

    /// Sound channel the cue plays on.
    #[must_use]
    pub const fn channel(self) -> u8 {
        0
    }

    /// Sound slot in the resource bundle.
    #[must_use]
    pub const fn sound(self) -> u8 {
        match self {
            Self::Growth => 0,
            Self::Collision => 1,
        }
    }
}

/// Collects the cues for `events`, preserving their order.
#[must_use]
pub fn cues_from_events(events: &[Event]) -> Vec<Cue> {
    events.iter().filter_map(Cue::for_event).collect()
}
