//! Sprite sheet layout shared by every backend.
//!
//! The sheet is a single image of 16 pixel cells. Vertical headings use the
//! first column and horizontal headings the second; West and South reuse the
//! East and North cells mirrored through a negative source width or height.

use snake_arena_core::{CreatureSnapshot, Direction, FoodSnapshot, PixelCoord};

use crate::{palette, Color};

/// Image bank holding every sprite.
pub const SPRITE_IMAGE: u8 = 0;

/// Palette index treated as transparent when blitting sprites.
pub const TRANSPARENT_KEY: u8 = 0;

/// Edge length of one sprite sheet cell in pixels.
pub const SPRITE_CELL: i32 = 16;

/// Source rectangle of the food sprite.
pub const FOOD_SOURCE: SourceRect = SourceRect::new(0, 4 * SPRITE_CELL, SPRITE_CELL, SPRITE_CELL);

/// Source rectangle of the small food icon shown in the menu bar.
pub const FOOD_ICON_SOURCE: SourceRect = SourceRect::new(SPRITE_CELL, 4 * SPRITE_CELL, 8, 8);

/// Menu bar position of the food icon.
pub const FOOD_ICON_POSITION: PixelCoord = PixelCoord::new(2, 0);

const DEATH_ROW: i32 = 5 * SPRITE_CELL;
const DEATH_FRAMES: u8 = 6;
const DEATH_MIRROR_FROM: u8 = 3;
const DEATH_FRAME_PERIOD: u64 = 5;

/// Region of the sprite sheet to copy.
///
/// A negative width mirrors the region horizontally, a negative height
/// mirrors it vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRect {
    /// Left edge within the sheet.
    pub u: i32,
    /// Top edge within the sheet.
    pub v: i32,
    /// Signed width in pixels.
    pub width: i32,
    /// Signed height in pixels.
    pub height: i32,
}

impl SourceRect {
    /// Creates a new source rectangle.
    #[must_use]
    pub const fn new(u: i32, v: i32, width: i32, height: i32) -> Self {
        Self {
            u,
            v,
            width,
            height,
        }
    }

    /// Reports whether the region is mirrored horizontally.
    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.width < 0
    }

    /// Reports whether the region is mirrored vertically.
    #[must_use]
    pub const fn flip_y(&self) -> bool {
        self.height < 0
    }

    /// Unsigned size of the region.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (self.width.abs(), self.height.abs())
    }
}

/// Part of the creature a sprite depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpritePart {
    /// Leading segment drawn at the live head position.
    Head,
    /// Any segment between head and tail.
    Body,
    /// Oldest history entry.
    Tail,
}

impl SpritePart {
    const fn row(self) -> i32 {
        match self {
            Self::Head => 0,
            Self::Body => SPRITE_CELL,
            Self::Tail => 2 * SPRITE_CELL,
        }
    }

    const fn fallback(self) -> Color {
        match self {
            Self::Head => palette(9),
            Self::Body | Self::Tail => palette(10),
        }
    }
}

/// Source rectangle for a creature part facing `orientation`.
#[must_use]
pub const fn oriented_source(part: SpritePart, orientation: Direction) -> SourceRect {
    let u = if orientation.is_vertical() {
        0
    } else {
        SPRITE_CELL
    };
    let width = match orientation {
        Direction::West => -SPRITE_CELL,
        _ => SPRITE_CELL,
    };
    let height = match orientation {
        Direction::South => -SPRITE_CELL,
        _ => SPRITE_CELL,
    };
    SourceRect::new(u, part.row(), width, height)
}

/// One blit from the sprite sheet onto the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Image bank to copy from.
    pub image: u8,
    /// Region of the image to copy.
    pub source: SourceRect,
    /// Arena pixel receiving the region's top-left corner.
    pub position: PixelCoord,
    /// Palette index skipped while copying.
    pub transparent: Option<u8>,
    /// Colour used by backends that have no texture for `image`.
    pub fallback: Color,
}

impl SpriteInstance {
    /// Creates a sprite from the shared sheet keyed on [`TRANSPARENT_KEY`].
    #[must_use]
    pub const fn new(source: SourceRect, position: PixelCoord, fallback: Color) -> Self {
        Self {
            image: SPRITE_IMAGE,
            source,
            position,
            transparent: Some(TRANSPARENT_KEY),
            fallback,
        }
    }
}

/// Sprites for the creature in draw order: body, tail, then head.
///
/// When `death` is provided the head is replaced by the current frame of the
/// death animation.
#[must_use]
pub fn creature_sprites(
    creature: &CreatureSnapshot,
    death: Option<&DeathAnimation>,
) -> Vec<SpriteInstance> {
    let mut sprites = Vec::with_capacity(creature.segments.len() + 1);
    if let Some((tail, body)) = creature.segments.split_last() {
        sprites.extend(body.iter().map(|segment| {
            SpriteInstance::new(
                oriented_source(SpritePart::Body, segment.orientation),
                segment.pixel,
                SpritePart::Body.fallback(),
            )
        }));
        sprites.push(SpriteInstance::new(
            oriented_source(SpritePart::Tail, tail.orientation),
            tail.pixel,
            SpritePart::Tail.fallback(),
        ));
    }

    sprites.push(match death {
        Some(animation) => animation.sprite(creature.head_pixel),
        None => SpriteInstance::new(
            oriented_source(SpritePart::Head, creature.heading),
            creature.head_pixel,
            SpritePart::Head.fallback(),
        ),
    });
    sprites
}

/// Sprite for the food item.
#[must_use]
pub const fn food_sprite(food: &FoodSnapshot) -> SpriteInstance {
    SpriteInstance::new(FOOD_SOURCE, food.pixel, palette(8))
}

/// Sprite for the menu bar food icon.
#[must_use]
pub const fn food_icon_sprite() -> SpriteInstance {
    SpriteInstance::new(FOOD_ICON_SOURCE, FOOD_ICON_POSITION, palette(8))
}

/// Looping animation drawn over the head once a round has ended.
///
/// The frame advances on every fifth call to [`DeathAnimation::advance`],
/// starting with the first, and cycles through six cells; the last three
/// reuse the first three mirrored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeathAnimation {
    frame: Option<u8>,
    frame_count: u64,
}

impl DeathAnimation {
    /// Creates an animation that has not shown any frame yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: None,
            frame_count: 0,
        }
    }

    /// Accounts for one rendered frame.
    pub fn advance(&mut self) {
        if self.frame_count % DEATH_FRAME_PERIOD == 0 {
            self.frame = Some(match self.frame {
                Some(frame) if frame + 1 < DEATH_FRAMES => frame + 1,
                Some(_) | None => 0,
            });
        }
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    /// Current animation frame, if one has been shown.
    #[must_use]
    pub const fn frame(&self) -> Option<u8> {
        self.frame
    }

    /// Source rectangle of the current frame.
    ///
    /// Before the first frame the head's North cell is shown.
    #[must_use]
    pub const fn source(&self) -> SourceRect {
        let Some(frame) = self.frame else {
            return oriented_source(SpritePart::Head, Direction::North);
        };
        if frame < DEATH_MIRROR_FROM {
            SourceRect::new(frame as i32 * SPRITE_CELL, DEATH_ROW, SPRITE_CELL, SPRITE_CELL)
        } else {
            SourceRect::new(
                (frame - DEATH_MIRROR_FROM) as i32 * SPRITE_CELL,
                DEATH_ROW,
                -SPRITE_CELL,
                SPRITE_CELL,
            )
        }
    }

    /// Sprite for the current frame placed at `head`.
    #[must_use]
    pub const fn sprite(&self, head: PixelCoord) -> SpriteInstance {
        SpriteInstance::new(self.source(), head, palette(14))
    }
}
