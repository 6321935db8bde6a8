#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate derive_new;

pub mod config;
pub mod dispose;
pub mod effects;
pub mod error;
pub mod input;
pub mod overlay;
pub mod render;
pub mod timer;

use crate::{
    config::{load, logger_setup, LoggerConfig, ViewerConfig, LOGGER_CONFIG, VIEWER_CONFIG},
    effects::LogAudio,
    error::ViewerError,
    input::{InputSource, ScriptedInput, TerminalInput},
    overlay::{Overlay, RunSummary},
};
use gridsnake_core::{food::DEFAULT_SEED, game::GameConfig};
use log::info;
use rand::Rng;
use std::path::PathBuf;
use structopt::StructOpt;

const SCRIPTED_MAX_TICKS: u64 = 1000;

#[derive(StructOpt, Debug)]
struct Options {
    /// Seed of the food allocator.
    #[structopt(long, default_value = "25")]
    seed: u64,
    /// Draws a fresh seed instead of using `--seed`.
    #[structopt(long)]
    random_seed: bool,
    /// Replays commands from a YAML script on a virtual clock instead of reading stdin.
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>,
    /// Stops after this many ticks. Scripted runs default to 1000.
    #[structopt(long)]
    max_ticks: Option<u64>,
    #[structopt(long, parse(from_os_str))]
    logger_config: Option<PathBuf>,
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Skips drawing frames.
    #[structopt(long)]
    no_render: bool,
}

fn run<I: InputSource>(
    viewer_config: ViewerConfig,
    game_config: GameConfig,
    input: I,
    max_ticks: Option<u64>,
) -> Result<RunSummary, ViewerError> {
    let audio = LogAudio::new(viewer_config.mute);
    Overlay::new(viewer_config, game_config, input, audio, max_ticks).run()
}

fn main() -> Result<(), ViewerError> {
    let options = Options::from_args();

    logger_setup(load::<LoggerConfig>(options.logger_config, LOGGER_CONFIG)?)?;

    let mut viewer_config = load::<ViewerConfig>(options.config, VIEWER_CONFIG)?.validate()?;
    if options.no_render {
        viewer_config.render = false;
    }

    let seed = if options.random_seed {
        rand::thread_rng().gen()
    } else {
        options.seed
    };
    if seed != DEFAULT_SEED {
        info!("using seed {}", seed);
    }
    let game_config = GameConfig {
        seed,
        ..GameConfig::default()
    };

    let summary = match options.script {
        Some(script) => {
            let input = ScriptedInput::from_file(&script)?;
            let max_ticks = options.max_ticks.unwrap_or(SCRIPTED_MAX_TICKS);
            run(viewer_config, game_config, input, Some(max_ticks))?
        }
        None => run(
            viewer_config,
            game_config,
            TerminalInput::enter()?,
            options.max_ticks,
        )?,
    };

    info!(
        "{} game(s), {} tick(s), {} food eaten, {} game over(s), final length {}",
        summary.games,
        summary.ticks,
        summary.food_eaten,
        summary.game_overs,
        summary
            .final_length
            .map_or_else(|| "unknown".to_owned(), |length| length.to_string())
    );
    Ok(())
}
