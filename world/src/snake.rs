use snake_arena_core::{CreatureSnapshot, Direction, Grid, PixelCoord, SegmentSnapshot, TileCoord};

use crate::history::SegmentHistory;

/// The player-controlled creature.
///
/// The head glides one pixel per tick while the body history only changes
/// when the head crosses into a new tile. The head tile is stored rather than
/// recomputed so the world can detect the exact tick of each crossing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    heading: Direction,
    head_pixel: PixelCoord,
    head_tile: TileCoord,
    history: SegmentHistory,
    alive: bool,
}

impl Snake {
    /// Places a new creature on the grid's spawn tile, facing North.
    #[must_use]
    pub fn spawn(grid: &Grid) -> Self {
        Self::new(grid, grid.spawn_tile(), Direction::North)
    }

    /// Places a new creature with its head on `tile`.
    ///
    /// The head tile is taken from the pixel position, so it follows the grid's
    /// conversion offsets rather than echoing `tile`.
    #[must_use]
    pub fn new(grid: &Grid, tile: TileCoord, heading: Direction) -> Self {
        let head_pixel = grid.tile_to_pixel(tile);
        Self {
            heading,
            head_pixel,
            head_tile: grid.pixel_to_tile(head_pixel),
            history: SegmentHistory::trailing(head_pixel, tile, grid.tile_size()),
            alive: true,
        }
    }

    /// Current heading.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Head position in pixels.
    #[must_use]
    pub const fn head_pixel(&self) -> PixelCoord {
        self.head_pixel
    }

    /// Tile recorded at the most recent boundary crossing.
    #[must_use]
    pub const fn head_tile(&self) -> TileCoord {
        self.head_tile
    }

    /// Body history.
    #[must_use]
    pub const fn history(&self) -> &SegmentHistory {
        &self.history
    }

    /// Number of body segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Reports whether the body history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether the creature survived every tick so far.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Requests a new heading. Returns `false` and keeps the current heading
    /// when `requested` points straight back.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == self.heading.opposite() {
            return false;
        }
        self.heading = requested;
        true
    }

    /// Moves the head one pixel along the current heading.
    pub fn tick(&mut self) {
        let (dx, dy) = self.heading.pixel_delta();
        self.head_pixel = self.head_pixel.offset(dx, dy);
    }

    /// Records a crossing into `new_tile` and reports a self-collision.
    ///
    /// The current head pixel and `new_tile` are pushed onto the history,
    /// dropping the oldest entries, before the head tile is updated and the
    /// body is scanned for the new tile.
    pub fn on_tile_boundary_crossed(&mut self, new_tile: TileCoord) -> bool {
        self.history.shift(self.head_pixel, new_tile);
        self.head_tile = new_tile;
        self.history.head_overlaps_body()
    }

    /// Lengthens the body by one segment.
    pub fn grow(&mut self) {
        self.history.grow();
    }

    pub(crate) fn force_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// Captures an immutable view including per-segment orientation.
    #[must_use]
    pub fn snapshot(&self) -> CreatureSnapshot {
        let segments = self
            .history
            .pixels()
            .zip(self.history.tiles())
            .enumerate()
            .map(|(index, (pixel, tile))| SegmentSnapshot {
                pixel,
                tile,
                orientation: self
                    .history
                    .orientation(index, self.head_pixel)
                    .unwrap_or(self.heading),
            })
            .collect();

        CreatureSnapshot {
            heading: self.heading,
            head_pixel: self.head_pixel,
            head_tile: self.head_tile,
            alive: self.alive,
            segments,
        }
    }
}
