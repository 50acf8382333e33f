use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PixelCoord, TileCoord};

/// Width of the arena window in pixels.
pub const ARENA_WIDTH: i32 = 256;

/// Height of the arena window in pixels.
pub const ARENA_HEIGHT: i32 = 192;

/// Edge length of a square tile in pixels.
pub const TILE_SIZE: i32 = 16;

/// Thickness of the left and right border bands in pixels.
pub const BORDER_WEIGHT_W: i32 = 8;

/// Thickness of the top and bottom border bands in pixels.
pub const BORDER_WEIGHT_H: i32 = 6;

/// Height of the status bar reserved above the play area.
pub const MENU_HEIGHT: i32 = 8;

/// Static geometry of the arena: tile dimensions, border bands and the menu bar.
///
/// The grid is immutable for the duration of a round. Conversions between pixel
/// and tile space are pure. Note that [`Grid::pixel_to_tile`] subtracts the border
/// offsets twice while [`Grid::tile_to_pixel`] adds them once; collision timing
/// depends on that asymmetry, so a tile round-trip lands one tile up and to the
/// left of where it started on the standard grid.
///
/// Only the window and tile sizes are serialised; deserialising runs the same
/// validation as [`Grid::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "GridDimensions", try_from = "GridDimensions")]
pub struct Grid {
    arena_width: i32,
    arena_height: i32,
    tile_size: i32,
    tiles_wide: i32,
    tiles_high: i32,
    border_weight_w: i32,
    border_weight_h: i32,
    menu_height: i32,
}

impl Grid {
    /// Grid for the 256×192 arena with 16 pixel tiles.
    #[must_use]
    pub const fn standard() -> Self {
        Self::derive(ARENA_WIDTH, ARENA_HEIGHT, TILE_SIZE)
    }

    /// Builds the grid for an arena of the provided pixel dimensions.
    ///
    /// Border weights and the menu height are fixed; only the window size and the
    /// tile size vary. Fails when no whole tile fits inside the borders.
    pub fn new(arena_width: i32, arena_height: i32, tile_size: i32) -> Result<Self, GridError> {
        if tile_size <= 0 {
            return Err(GridError::NonPositiveTileSize { tile_size });
        }

        let grid = Self::derive(arena_width, arena_height, tile_size);
        if grid.tiles_wide <= 0 || grid.tiles_high <= 0 {
            return Err(GridError::ArenaTooSmall {
                arena_width,
                arena_height,
                tile_size,
            });
        }

        Ok(grid)
    }

    const fn derive(arena_width: i32, arena_height: i32, tile_size: i32) -> Self {
        Self {
            arena_width,
            arena_height,
            tile_size,
            tiles_wide: (arena_width - BORDER_WEIGHT_W).div_euclid(tile_size),
            tiles_high: (arena_height - BORDER_WEIGHT_H - MENU_HEIGHT).div_euclid(tile_size),
            border_weight_w: BORDER_WEIGHT_W,
            border_weight_h: BORDER_WEIGHT_H,
            menu_height: MENU_HEIGHT,
        }
    }

    /// Width of the arena window in pixels.
    #[must_use]
    pub const fn arena_width(&self) -> i32 {
        self.arena_width
    }

    /// Height of the arena window in pixels.
    #[must_use]
    pub const fn arena_height(&self) -> i32 {
        self.arena_height
    }

    /// Edge length of a tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Number of whole tile columns inside the borders.
    #[must_use]
    pub const fn tiles_wide(&self) -> i32 {
        self.tiles_wide
    }

    /// Number of whole tile rows between the menu bar and the bottom border.
    #[must_use]
    pub const fn tiles_high(&self) -> i32 {
        self.tiles_high
    }

    /// Thickness of the vertical border bands.
    #[must_use]
    pub const fn border_weight_w(&self) -> i32 {
        self.border_weight_w
    }

    /// Thickness of the horizontal border bands.
    #[must_use]
    pub const fn border_weight_h(&self) -> i32 {
        self.border_weight_h
    }

    /// Height of the status bar above the play area.
    #[must_use]
    pub const fn menu_height(&self) -> i32 {
        self.menu_height
    }

    /// Pixel origin of the provided tile.
    #[must_use]
    pub const fn tile_to_pixel(&self, tile: TileCoord) -> PixelCoord {
        PixelCoord::new(
            tile.column() * self.tile_size + self.border_weight_w,
            tile.row() * self.tile_size + self.border_weight_h + self.menu_height,
        )
    }

    /// Tile containing the provided pixel, using floor division.
    #[must_use]
    pub const fn pixel_to_tile(&self, pixel: PixelCoord) -> TileCoord {
        TileCoord::new(
            (pixel.x() - 2 * self.border_weight_w).div_euclid(self.tile_size),
            (pixel.y() - 2 * self.border_weight_h - self.menu_height).div_euclid(self.tile_size),
        )
    }

    /// Reports whether the tile lies within `[0, tiles_wide) × [0, tiles_high)`.
    #[must_use]
    pub const fn contains_tile(&self, tile: TileCoord) -> bool {
        tile.column() >= 0
            && tile.row() >= 0
            && tile.column() < self.tiles_wide
            && tile.row() < self.tiles_high
    }

    /// Tile at the middle of the play area where a new creature appears.
    #[must_use]
    pub const fn spawn_tile(&self) -> TileCoord {
        TileCoord::new(self.tiles_wide / 2, self.tiles_high / 2)
    }

    /// Centre of a tile-sized sprite whose top-left corner sits at `origin`.
    #[must_use]
    pub const fn sprite_center(&self, origin: PixelCoord) -> PixelCoord {
        origin.offset(self.tile_size / 2, self.tile_size / 2)
    }

    /// Range of head pixel positions that keep a sprite inside the border bands.
    #[must_use]
    pub const fn play_bounds(&self) -> PixelBounds {
        PixelBounds {
            left: self.border_weight_w,
            top: self.menu_height + self.border_weight_h,
            right: self.arena_width - self.border_weight_w - self.tile_size,
            bottom: self.arena_height - self.border_weight_h - self.tile_size,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

/// Inclusive pixel rectangle in which a head position is considered in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    /// Smallest permitted x coordinate.
    pub left: i32,
    /// Smallest permitted y coordinate.
    pub top: i32,
    /// Largest permitted x coordinate.
    pub right: i32,
    /// Largest permitted y coordinate.
    pub bottom: i32,
}

impl PixelBounds {
    /// Reports whether the pixel lies inside the bounds, edges included.
    #[must_use]
    pub const fn contains(&self, pixel: PixelCoord) -> bool {
        pixel.x() >= self.left
            && pixel.y() >= self.top
            && pixel.x() <= self.right
            && pixel.y() <= self.bottom
    }
}

#[derive(Serialize, Deserialize)]
struct GridDimensions {
    arena_width: i32,
    arena_height: i32,
    tile_size: i32,
}

impl From<Grid> for GridDimensions {
    fn from(grid: Grid) -> Self {
        Self {
            arena_width: grid.arena_width,
            arena_height: grid.arena_height,
            tile_size: grid.tile_size,
        }
    }
}

impl TryFrom<GridDimensions> for Grid {
    type Error = GridError;

    fn try_from(dimensions: GridDimensions) -> Result<Self, Self::Error> {
        Self::new(
            dimensions.arena_width,
            dimensions.arena_height,
            dimensions.tile_size,
        )
    }
}

/// Reasons a grid cannot be built from the requested arena dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Tiles must have a positive edge length.
    #[error("tile size must be positive (received {tile_size})")]
    NonPositiveTileSize {
        /// Tile size that failed validation.
        tile_size: i32,
    },
    /// The arena leaves no room for a single tile once borders are removed.
    #[error("a {arena_width}x{arena_height} arena holds no {tile_size}px tile inside its borders")]
    ArenaTooSmall {
        /// Requested arena width in pixels.
        arena_width: i32,
        /// Requested arena height in pixels.
        arena_height: i32,
        /// Requested tile size in pixels.
        tile_size: i32,
    },
}
