#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake Arena.
//!
//! Opens a window three times the arena size, polls the arrow keys and space
//! once per frame, and draws the scene from the sprite sheet listed in an
//! optional TOML manifest. Without a manifest every sprite becomes a flat
//! coloured rectangle. Growth and collision cues are logged at `info` level
//! with their channel and sound slot; macroquad is built without sound output.

mod sprites;

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use snake_arena_core::{HeldDirections, PixelCoord};
use snake_arena_rendering::{
    sprites::SpriteInstance, Color, FrameInput, PixelRect, Presentation, RenderingBackend, Scene,
    ScreenLayout, SCORE_POSITION,
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};

use self::sprites::SpriteAtlas;

const DEFAULT_WINDOW_SCALE: i32 = 3;
const TEXT_LINE_HEIGHT: i32 = 6;
const TEXT_FONT_SIZE: f32 = 8.0;
const TEXT_BASELINE: f32 = 5.0;

/// Keys observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// `Up` arrow held.
    pub up: bool,
    /// `Down` arrow held.
    pub down: bool,
    /// `Left` arrow held.
    pub left: bool,
    /// `Right` arrow held.
    pub right: bool,
    /// `Space` held.
    pub space: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
            space: is_key_down(KeyCode::Space),
        }
    }
}

/// Maps raw key observations onto the frame input contract.
///
/// The left arrow requests East and the right arrow West, matching the
/// heading table the creature moves by.
#[doc(hidden)]
#[must_use]
pub fn frame_input_from_observations(keys: KeyObservations) -> FrameInput {
    FrameInput {
        held: HeldDirections {
            north: keys.up,
            south: keys.down,
            east: keys.left,
            west: keys.right,
        },
        restart: keys.space,
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Loads sprite sheets from the manifest at `path`; without one, sprites are
    /// drawn as flat coloured rectangles.
    #[must_use]
    pub fn with_sprite_manifest(mut self, path: Option<PathBuf>) -> Self {
        self.sprite_manifest = path;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            sprite_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.arena.grid.arena_width() * DEFAULT_WINDOW_SCALE,
            window_height: scene.arena.grid.arena_height() * DEFAULT_WINDOW_SCALE,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = match sprite_manifest {
                Some(path) => match SpriteAtlas::from_manifest_path(&path)
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => {
                        tracing::info!(images = atlas.len(), path = %path.display(), "sprite atlas loaded");
                        Some(atlas)
                    }
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                },
                None => None,
            };
            let _ = atlas_init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = frame_input_from_observations(KeyObservations::poll());

                update_scene(frame_dt, frame_input, &mut scene);

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                match ScreenLayout::fit(&scene.arena.grid, screen) {
                    Ok(layout) => draw_scene(&scene, &layout, sprite_atlas.as_ref()),
                    Err(error) => tracing::warn!(%error, "skipping frame"),
                }

                for cue in scene.cues.drain(..) {
                    tracing::info!(?cue, channel = cue.channel(), sound = cue.sound(), "cue");
                }

                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame_dt)
                {
                    if show_fps {
                        tracing::info!(
                            fps = format_args!("{per_second:.2}"),
                            trailing = format_args!("{trailing_ten_seconds:.2}"),
                            "frame rate"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn draw_scene(scene: &Scene, layout: &ScreenLayout, sprite_atlas: Option<&SpriteAtlas>) {
    let arena = &scene.arena;
    draw_pixel_rect(arena.menu_bar(), arena.menu_color, layout);
    for (tile, color) in arena.tiles() {
        draw_pixel_rect(tile, color, layout);
    }
    for band in arena.border_bands() {
        draw_pixel_rect(band, arena.border_color, layout);
    }

    draw_text_block(&scene.score_label(), SCORE_POSITION, arena.text_color, layout);

    for sprite in &scene.sprites {
        draw_sprite(sprite, layout, sprite_atlas);
    }

    if let Some((position, text)) = scene.overlay.text() {
        draw_text_block(&text, position, arena.text_color, layout);
    }
}

fn draw_pixel_rect(rect: PixelRect, color: Color, layout: &ScreenLayout) {
    let origin = layout.to_screen(PixelCoord::new(rect.x, rect.y));
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        layout.length(rect.width),
        layout.length(rect.height),
        to_macroquad_color(color),
    );
}

fn draw_sprite(sprite: &SpriteInstance, layout: &ScreenLayout, sprite_atlas: Option<&SpriteAtlas>) {
    let origin = layout.to_screen(sprite.position);
    let drawn = sprite_atlas.map_or(false, |atlas| {
        atlas.draw(sprite, MacroquadVec2::new(origin.x, origin.y), layout.scale)
    });
    if !drawn {
        let (width, height) = sprite.source.size();
        draw_pixel_rect(
            PixelRect::new(sprite.position.x(), sprite.position.y(), width, height),
            sprite.fallback,
            layout,
        );
    }
}

fn draw_text_block(text: &str, position: PixelCoord, color: Color, layout: &ScreenLayout) {
    let color = to_macroquad_color(color);
    for (index, line) in text.lines().enumerate() {
        let top = layout.to_screen(position.offset(0, index as i32 * TEXT_LINE_HEIGHT));
        let _ = macroquad::text::draw_text(
            line,
            top.x,
            top.y + TEXT_BASELINE * layout.scale,
            TEXT_FONT_SIZE * layout.scale,
            color,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arena_core::Direction;

    #[test]
    fn arrow_keys_map_onto_the_heading_table() {
        let input = frame_input_from_observations(KeyObservations {
            left: true,
            ..KeyObservations::default()
        });
        assert_eq!(input.held.first(), Some(Direction::East));
        assert!(!input.restart);

        let input = frame_input_from_observations(KeyObservations {
            right: true,
            space: true,
            ..KeyObservations::default()
        });
        assert_eq!(input.held.first(), Some(Direction::West));
        assert!(input.restart);
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(250);

        assert_eq!(counter.record_frame(frame), None);
        assert_eq!(counter.record_frame(frame), None);
        assert_eq!(counter.record_frame(frame), None);
        let metrics = counter.record_frame(frame).expect("one second elapsed");

        assert!((metrics.per_second - 4.0).abs() < 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() < 1e-3);
        assert_eq!(counter.record_frame(frame), None);
    }

    #[test]
    fn fps_counter_trims_trailing_window() {
        let mut counter = FpsCounter::default();
        let mut last = None;
        for _ in 0..12 {
            last = counter.record_frame(Duration::from_secs(1));
        }
        let metrics = last.expect("every frame spans a second");
        assert!((metrics.trailing_ten_seconds - 1.0).abs() < 1e-3);
        assert_eq!(counter.frame_times.len(), 10);
    }
}
