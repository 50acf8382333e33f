use rand::Rng;
use rand_chacha::ChaCha8Rng;
use snake_arena_core::{FoodSnapshot, Grid, PixelCoord, TileCoord};

/// Offset from a tile's origin to where the food sprite is drawn.
pub const FOOD_SPRITE_OFFSET: (i32, i32) = (8, 12);

const UNPLACED_COUNT: i32 = -1;

/// The single food item in the arena.
///
/// Every placement, including the first one, increments the consumption
/// count, so a freshly placed item reads zero.
#[derive(Clone, Debug)]
pub struct Food<R = ChaCha8Rng> {
    tile: TileCoord,
    pixel: PixelCoord,
    consumed_count: i32,
    tile_size: i32,
    rng: R,
}

impl<R: Rng> Food<R> {
    /// Creates the food and performs its first placement on `grid`.
    #[must_use]
    pub fn new(grid: &Grid, rng: R) -> Self {
        let mut food = Self {
            tile: TileCoord::new(0, 0),
            pixel: PixelCoord::new(0, 0),
            consumed_count: UNPLACED_COUNT,
            tile_size: grid.tile_size(),
            rng,
        };
        let _ = food.relocate(grid.tiles_wide(), grid.tiles_high());
        food
    }

    /// Counts a meal and moves the food to a uniformly random tile.
    ///
    /// The creature's body is not excluded; the food may land underneath it.
    pub fn relocate(&mut self, tiles_wide: i32, tiles_high: i32) -> TileCoord {
        self.consumed_count += 1;
        let tile = TileCoord::new(
            self.rng.gen_range(0..tiles_wide.max(1)),
            self.rng.gen_range(0..tiles_high.max(1)),
        );
        self.place(tile);
        tile
    }

    /// Starts a new round: the count returns to zero and the food moves.
    pub fn reset(&mut self, grid: &Grid) {
        self.consumed_count = UNPLACED_COUNT;
        let _ = self.relocate(grid.tiles_wide(), grid.tiles_high());
    }
}

impl<R> Food<R> {
    /// Moves the food onto `tile` without counting a meal.
    pub fn place(&mut self, tile: TileCoord) {
        let (dx, dy) = FOOD_SPRITE_OFFSET;
        self.tile = tile;
        self.pixel = PixelCoord::new(
            tile.column() * self.tile_size + dx,
            tile.row() * self.tile_size + dy,
        );
    }

    /// Tile the food occupies.
    #[must_use]
    pub const fn tile(&self) -> TileCoord {
        self.tile
    }

    /// Pixel position of the food sprite.
    #[must_use]
    pub const fn pixel(&self) -> PixelCoord {
        self.pixel
    }

    /// Number of meals eaten this round.
    #[must_use]
    pub const fn consumed_count(&self) -> i32 {
        self.consumed_count
    }

    /// Reports whether `center` lies within the sprite footprint
    /// `[x, x + tile) × [y, y + tile)`.
    #[must_use]
    pub const fn is_consumed(&self, center: PixelCoord) -> bool {
        center.x() >= self.pixel.x()
            && center.x() < self.pixel.x() + self.tile_size
            && center.y() >= self.pixel.y()
            && center.y() < self.pixel.y() + self.tile_size
    }

    /// Captures an immutable view of the food.
    #[must_use]
    pub const fn snapshot(&self) -> FoodSnapshot {
        FoodSnapshot {
            tile: self.tile,
            pixel: self.pixel,
            consumed_count: self.consumed_count,
        }
    }
}
