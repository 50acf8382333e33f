#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake Arena experience.

mod headless;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use snake_arena_core::{Direction, Grid};
use snake_arena_rendering::{palette, ArenaPresentation, Presentation, RenderingBackend, Scene};
use snake_arena_rendering_macroquad::MacroquadBackend;
use snake_arena_world::{query, Config, World};

use self::session::Session;

const WINDOW_TITLE: &str = "Snake Arena";

#[derive(Parser, Debug)]
#[command(
    name = "snake-arena",
    version,
    about = "Steer a growing snake around a tiled arena"
)]
struct Cli {
    /// Seed for food placement; defaults to a fixed seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,

    /// Sprite manifest (TOML) describing the sprite sheet images.
    #[arg(long, value_name = "MANIFEST")]
    sprites: Option<PathBuf>,

    /// Simulate a single round without opening a window and print a JSON summary.
    #[arg(long)]
    headless: bool,

    /// Maximum number of simulation steps in headless mode.
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Starting heading in headless mode.
    #[arg(long, value_enum, default_value_t = HeadingArg::North)]
    heading: HeadingArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeadingArg {
    North,
    South,
    East,
    West,
}

impl From<HeadingArg> for Direction {
    fn from(value: HeadingArg) -> Self {
        match value {
            HeadingArg::North => Direction::North,
            HeadingArg::South => Direction::South,
            HeadingArg::East => Direction::East,
            HeadingArg::West => Direction::West,
        }
    }
}

impl Cli {
    fn world_config(&self) -> Config {
        let defaults = Config::default();
        Config::new(defaults.grid(), self.seed.unwrap_or(defaults.seed()))
    }
}

/// Entry point for the Snake Arena command-line interface.
fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cli = Cli::parse();
    let config = cli.world_config();

    if cli.headless {
        let summary = headless::run(config, cli.heading.into(), cli.ticks);
        let json =
            serde_json::to_string_pretty(&summary).context("failed to serialise round summary")?;
        println!("{json}");
        return Ok(());
    }

    run_windowed(&cli, config)
}

fn run_windowed(cli: &Cli, config: Config) -> Result<()> {
    let world = World::new(config);
    tracing::info!(seed = config.seed(), "opening arena window");

    let grid: Grid = *query::grid(&world);
    let scene = Scene::new(ArenaPresentation::new(grid));
    let presentation = Presentation::new(WINDOW_TITLE, palette(0), scene);

    let backend = MacroquadBackend::new()
        .with_vsync(cli.vsync)
        .with_show_fps(cli.show_fps)
        .with_sprite_manifest(cli.sprites.clone());

    let mut session = Session::new(world);
    let mut screen = session.screen();
    backend
        .run(presentation, move |dt, input, scene| {
            session.frame(dt, input, scene);
            let next = session.screen();
            if next != screen {
                tracing::debug!(from = ?screen, to = ?next, "screen changed");
                screen = next;
            }
        })
        .context("rendering backend failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_game() {
        let cli = Cli::parse_from(["snake-arena"]);
        assert!(cli.vsync);
        assert!(!cli.headless);
        assert_eq!(cli.heading, HeadingArg::North);
        assert_eq!(cli.world_config(), Config::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "snake-arena",
            "--seed",
            "9",
            "--vsync",
            "false",
            "--headless",
            "--ticks",
            "40",
            "--heading",
            "west",
            "--sprites",
            "assets/manifest.toml",
        ]);
        assert!(!cli.vsync);
        assert!(cli.headless);
        assert_eq!(cli.ticks, 40);
        assert_eq!(Direction::from(cli.heading), Direction::West);
        assert_eq!(cli.world_config().seed(), 9);
        assert_eq!(cli.sprites, Some(PathBuf::from("assets/manifest.toml")));
    }
}
