#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Arena adapters.

pub mod cues;
pub mod sprites;

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_arena_core::{
    CreatureSnapshot, FoodSnapshot, Grid, HeldDirections, PixelCoord, TileCoord,
};
use std::time::Duration;
use thiserror::Error;

use self::cues::Cue;
use self::sprites::{
    creature_sprites, food_icon_sprite, food_sprite, DeathAnimation, SpriteInstance,
};

const PALETTE_RGB: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x1d, 0x2b, 0x53),
    (0x7e, 0x25, 0x53),
    (0x00, 0x87, 0x51),
    (0xab, 0x52, 0x36),
    (0x5f, 0x57, 0x4f),
    (0xc2, 0xc3, 0xc7),
    (0xff, 0xf1, 0xe8),
    (0xff, 0x00, 0x4d),
    (0xff, 0xa3, 0x00),
    (0xff, 0xec, 0x27),
    (0x00, 0xe4, 0x36),
    (0x29, 0xad, 0xff),
    (0x83, 0x76, 0x9c),
    (0xff, 0x77, 0xa8),
    (0xff, 0xcc, 0xaa),
];

/// Palette index of the darker checkerboard tile.
pub const BOARD_DARK: u8 = 3;
/// Palette index of the lighter checkerboard tile.
pub const BOARD_LIGHT: u8 = 11;
/// Palette index of the border bands.
pub const BORDER_COLOR: u8 = 8;
/// Palette index of the menu bar background.
pub const MENU_COLOR: u8 = 2;
/// Palette index of all text.
pub const TEXT_COLOR: u8 = 7;

/// Menu bar position of the score.
pub const SCORE_POSITION: PixelCoord = PixelCoord::new(12, 1);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Entry of the 16-colour palette; indices wrap.
#[must_use]
pub const fn palette(index: u8) -> Color {
    let (red, green, blue) = PALETTE_RGB[(index % 16) as usize];
    Color::from_rgb_u8(red, green, blue)
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction keys held during the frame.
    pub held: HeldDirections,
    /// Whether the restart key was pressed on this frame.
    pub restart: bool,
}

/// Axis-aligned rectangle in arena pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Static arena background: menu bar, checkerboard and border bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaPresentation {
    /// Geometry the background is laid out from.
    pub grid: Grid,
    /// Checkerboard colours; the first fills tiles whose column and row sum is even.
    pub board_colors: [Color; 2],
    /// Border band colour.
    pub border_color: Color,
    /// Menu bar background colour.
    pub menu_color: Color,
    /// Text colour.
    pub text_color: Color,
}

impl ArenaPresentation {
    /// Creates the standard background for `grid`.
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self {
            grid,
            board_colors: [palette(BOARD_DARK), palette(BOARD_LIGHT)],
            border_color: palette(BORDER_COLOR),
            menu_color: palette(MENU_COLOR),
            text_color: palette(TEXT_COLOR),
        }
    }

    /// Menu bar rectangle spanning the top of the window.
    #[must_use]
    pub const fn menu_bar(&self) -> PixelRect {
        PixelRect::new(0, 0, self.grid.arena_width(), self.grid.menu_height())
    }

    /// Checkerboard tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (PixelRect, Color)> + '_ {
        let grid = self.grid;
        let size = grid.tile_size();
        (0..grid.tiles_high()).flat_map(move |row| {
            (0..grid.tiles_wide()).map(move |column| {
                let origin = grid.tile_to_pixel(TileCoord::new(column, row));
                let color = self.board_colors[((row + column) % 2) as usize];
                (PixelRect::new(origin.x(), origin.y(), size, size), color)
            })
        })
    }

    /// Border bands: top and bottom first, then left and right.
    ///
    /// The top band starts below the menu bar; the side bands run from the
    /// menu bar to the bottom of the window.
    #[must_use]
    pub const fn border_bands(&self) -> [PixelRect; 4] {
        let width = self.grid.arena_width();
        let height = self.grid.arena_height();
        let weight_w = self.grid.border_weight_w();
        let weight_h = self.grid.border_weight_h();
        let menu = self.grid.menu_height();
        [
            PixelRect::new(0, menu, width, weight_h),
            PixelRect::new(0, height - weight_h, width, weight_h),
            PixelRect::new(0, menu, weight_w, height - menu),
            PixelRect::new(width - weight_w, menu, weight_w, height - menu),
        ]
    }
}

/// Text drawn over the arena for the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// No text beyond the score.
    None,
    /// Prompt asking for the first direction key.
    Title,
    /// Final score and restart prompt.
    GameOver {
        /// Meals eaten during the finished round.
        score: i32,
    },
}

impl Overlay {
    /// Position and contents of the overlay text; lines are separated by `\n`.
    #[must_use]
    pub fn text(&self) -> Option<(PixelCoord, String)> {
        match self {
            Self::None => None,
            Self::Title => Some((
                PixelCoord::new(24, 1),
                "Press UP,DOWN,LEFT,RIGHT key".to_owned(),
            )),
            Self::GameOver { score } => Some((
                PixelCoord::new(100, 80),
                format!("GameOver\n\npoint: {score}\n\nPress SPACE key"),
            )),
        }
    }
}

/// Scene description combining the arena, its inhabitants and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Arena background.
    pub arena: ArenaPresentation,
    /// Sprites in draw order.
    pub sprites: Vec<SpriteInstance>,
    /// Score shown in the menu bar.
    pub score: i32,
    /// Screen-specific text.
    pub overlay: Overlay,
    /// Cues raised since the previous frame.
    pub cues: Vec<Cue>,
}

impl Scene {
    /// Creates an empty scene over the provided arena.
    #[must_use]
    pub fn new(arena: ArenaPresentation) -> Self {
        Self {
            arena,
            sprites: Vec::new(),
            score: 0,
            overlay: Overlay::None,
            cues: Vec::new(),
        }
    }

    /// Replaces the dynamic content from fresh world snapshots.
    ///
    /// Sprites are ordered menu icon, creature, food. Cues accumulate until a
    /// backend drains them.
    pub fn populate(
        &mut self,
        creature: &CreatureSnapshot,
        food: &FoodSnapshot,
        death: Option<&DeathAnimation>,
        overlay: Overlay,
        cues: impl IntoIterator<Item = Cue>,
    ) {
        self.sprites.clear();
        self.sprites.push(food_icon_sprite());
        self.sprites.extend(creature_sprites(creature, death));
        self.sprites.push(food_sprite(food));
        self.score = food.consumed_count;
        self.overlay = overlay;
        self.cues.extend(cues);
    }

    /// Menu bar score label.
    #[must_use]
    pub fn score_label(&self) -> String {
        self.score.to_string()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake Arena scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and mutates the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Integer scaling of the arena into a window, centred with letterboxing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLayout {
    /// Window pixels per arena pixel.
    pub scale: f32,
    /// Window position of the arena origin.
    pub offset: Vec2,
}

impl ScreenLayout {
    /// Fits an arena into a window of `screen` pixels.
    ///
    /// The scale is a whole number whenever the window holds at least one
    /// full-size arena, so sprite pixels stay square and crisp.
    pub fn fit(grid: &Grid, screen: Vec2) -> Result<Self, RenderingError> {
        if screen.x <= 0.0 || screen.y <= 0.0 || !screen.is_finite() {
            return Err(RenderingError::EmptyScreen {
                width: screen.x,
                height: screen.y,
            });
        }

        let arena = Vec2::new(grid.arena_width() as f32, grid.arena_height() as f32);
        let fitted = (screen / arena).min_element();
        let scale = if fitted >= 1.0 { fitted.floor() } else { fitted };
        let offset = ((screen - arena * scale) * 0.5).max(Vec2::ZERO);
        Ok(Self { scale, offset })
    }

    /// Window position of an arena pixel.
    #[must_use]
    pub fn to_screen(&self, pixel: PixelCoord) -> Vec2 {
        self.offset + Vec2::new(pixel.x() as f32, pixel.y() as f32) * self.scale
    }

    /// Window extent of an arena length.
    #[must_use]
    pub fn length(&self, pixels: i32) -> f32 {
        pixels as f32 * self.scale
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// The window has no drawable area.
    #[error("cannot lay out the arena in a {width}x{height} window")]
    EmptyScreen {
        /// Reported window width.
        width: f32,
        /// Reported window height.
        height: f32,
    },
}
