#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation layers react to. Geometry lives in [`Grid`],
//! which every other component receives explicitly at construction.

mod grid;

use serde::{Deserialize, Serialize};

pub use grid::{
    Grid, GridError, PixelBounds, ARENA_HEIGHT, ARENA_WIDTH, BORDER_WEIGHT_H, BORDER_WEIGHT_W,
    MENU_HEIGHT, TILE_SIZE,
};

/// Pixel displacement applied per tick for each heading, indexed in
/// [`Direction::ALL`] order.
///
/// East moves towards decreasing x and West towards increasing x. The compass
/// names are swapped relative to the screen, and the sprite sheet is authored
/// against this table, so the mapping is preserved as-is.
pub const HEADING_PIXEL_DELTAS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Headings available to the creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x (see [`HEADING_PIXEL_DELTAS`]).
    East,
    /// Movement toward increasing x (see [`HEADING_PIXEL_DELTAS`]).
    West,
}

impl Direction {
    /// Every heading in the order input is polled.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Heading that points the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Reports whether the heading moves along the y axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Per-tick pixel displacement `(dx, dy)` for the heading.
    #[must_use]
    pub const fn pixel_delta(self) -> (i32, i32) {
        HEADING_PIXEL_DELTAS[self.index()]
    }

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// Derives the orientation of a body segment from two consecutive history
/// entries, `newer` being the one closer to the head.
///
/// A vertical difference takes precedence over a horizontal one. Identical
/// positions carry no orientation.
#[must_use]
pub fn orientation_between(newer: PixelCoord, older: PixelCoord) -> Option<Direction> {
    if newer.y() < older.y() {
        Some(Direction::North)
    } else if newer.y() > older.y() {
        Some(Direction::South)
    } else if newer.x() < older.x() {
        Some(Direction::East)
    } else if newer.x() > older.x() {
        Some(Direction::West)
    } else {
        None
    }
}

/// Screen position measured in arena pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelCoord {
    x: i32,
    y: i32,
}

impl PixelCoord {
    /// Creates a new pixel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate shifted by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Location of a tile expressed as column and row indices.
///
/// Indices are signed: converting a pixel that lies in the border bands yields
/// coordinates outside the grid, including negative ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: i32,
    row: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the coordinate shifted by whole tiles.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self::new(self.column + columns, self.row + rows)
    }
}

/// Snapshot of which direction keys are held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    /// Up key.
    pub north: bool,
    /// Down key.
    pub south: bool,
    /// Left key; moves the creature East (towards decreasing x).
    pub east: bool,
    /// Right key; moves the creature West (towards increasing x).
    pub west: bool,
}

impl HeldDirections {
    /// Snapshot with only the provided heading held.
    #[must_use]
    pub fn only(direction: Direction) -> Self {
        Self {
            north: direction == Direction::North,
            south: direction == Direction::South,
            east: direction == Direction::East,
            west: direction == Direction::West,
        }
    }

    /// Reports whether the key for the provided heading is held.
    #[must_use]
    pub const fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Held headings in polling order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.is_held(*direction))
    }

    /// First held heading in polling order, if any.
    #[must_use]
    pub fn first(&self) -> Option<Direction> {
        self.iter().next()
    }
}

/// Lifecycle of a single round inside the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The creature waits at its spawn point for the first heading.
    Ready,
    /// Ticks advance the simulation.
    Running,
    /// A collision ended the round; ticks are ignored.
    Ended,
}

/// Collision that ended a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndCause {
    /// The head entered a tile already present in the body history.
    SelfCollision,
    /// The head left the area enclosed by the border bands.
    OutOfBounds,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Starts a ready round with the provided heading.
    ///
    /// The heading is applied as-is, without the reversal rule.
    BeginRound {
        /// Heading the creature takes on the first tick.
        heading: Direction,
    },
    /// Requests a heading change; reversals are dropped silently.
    Steer {
        /// Requested heading.
        direction: Direction,
    },
    /// Advances the simulation by exactly one step.
    Tick,
    /// Discards the current round and prepares a fresh one.
    ResetRound,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A round left the ready phase.
    RoundStarted {
        /// Heading applied at the start of the round.
        heading: Direction,
    },
    /// A steer request was accepted.
    HeadingChanged {
        /// Heading before the change.
        from: Direction,
        /// Heading after the change.
        to: Direction,
    },
    /// The head crossed a tile boundary and the body history shifted.
    TileCrossed {
        /// Tile recorded before the crossing.
        from: TileCoord,
        /// Tile recorded after the crossing.
        to: TileCoord,
    },
    /// The creature reached the food, grew, and the food moved.
    FoodConsumed {
        /// Consumption count after this meal.
        count: i32,
        /// Tile the food relocated to.
        relocated_to: TileCoord,
    },
    /// A collision ended the round.
    RoundEnded {
        /// Collision responsible for the end of the round.
        cause: EndCause,
        /// Consumption count at the end of the round.
        score: i32,
    },
    /// The world discarded the previous round and is ready for a new one.
    RoundReset,
}

/// Immutable view of one body segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentSnapshot {
    /// Pixel position recorded for the segment.
    pub pixel: PixelCoord,
    /// Tile position recorded for the segment.
    pub tile: TileCoord,
    /// Orientation derived from the neighbouring history entries.
    pub orientation: Direction,
}

/// Immutable view of the creature used for queries and presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureSnapshot {
    /// Current heading.
    pub heading: Direction,
    /// Head position in pixels.
    pub head_pixel: PixelCoord,
    /// Tile recorded at the most recent boundary crossing.
    pub head_tile: TileCoord,
    /// Whether the creature survived every tick so far.
    pub alive: bool,
    /// Body history, most recent entry first.
    pub segments: Vec<SegmentSnapshot>,
}

/// Immutable view of the food.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodSnapshot {
    /// Tile the food occupies.
    pub tile: TileCoord,
    /// Pixel position of the food sprite.
    pub pixel: PixelCoord,
    /// Number of meals eaten this round.
    pub consumed_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn east_and_west_move_against_their_compass_names() {
        assert_eq!(Direction::North.pixel_delta(), (0, -1));
        assert_eq!(Direction::South.pixel_delta(), (0, 1));
        assert_eq!(Direction::East.pixel_delta(), (-1, 0));
        assert_eq!(Direction::West.pixel_delta(), (1, 0));
    }

    #[test]
    fn every_heading_has_a_distinct_opposite() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
            let (dx, dy) = direction.pixel_delta();
            assert_eq!(direction.opposite().pixel_delta(), (-dx, -dy));
        }
    }

    #[test]
    fn orientation_prefers_vertical_difference() {
        let newer = PixelCoord::new(10, 10);
        assert_eq!(
            orientation_between(newer, PixelCoord::new(20, 30)),
            Some(Direction::North)
        );
        assert_eq!(
            orientation_between(newer, PixelCoord::new(0, 0)),
            Some(Direction::South)
        );
        assert_eq!(
            orientation_between(newer, PixelCoord::new(26, 10)),
            Some(Direction::East)
        );
        assert_eq!(
            orientation_between(newer, PixelCoord::new(-6, 10)),
            Some(Direction::West)
        );
        assert_eq!(orientation_between(newer, newer), None);
    }

    #[test]
    fn held_directions_iterate_in_polling_order() {
        let held = HeldDirections {
            north: false,
            south: true,
            east: true,
            west: true,
        };
        let order: Vec<_> = held.iter().collect();
        assert_eq!(order, vec![Direction::South, Direction::East, Direction::West]);
        assert_eq!(held.first(), Some(Direction::South));
        assert_eq!(HeldDirections::default().first(), None);
        assert!(HeldDirections::only(Direction::West).is_held(Direction::West));
    }

    #[test]
    fn end_cause_round_trips_through_bincode() {
        assert_round_trip(&EndCause::SelfCollision);
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        assert_round_trip(&Grid::standard());
    }
}
