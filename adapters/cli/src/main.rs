#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Maze Chase.
//!
//! `maze-chase play` opens a window for a person, `maze-chase train` evolves
//! a network policy and `maze-chase replay` plays the saved champion. Without
//! a subcommand a numbered menu is shown on the terminal.

mod config;
mod menu;
mod play;
mod presenter;
mod replay;
mod train;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", about = "Pac-Man with pluggable pilots")]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = "maze-chase.toml")]
    config: PathBuf,
    /// What to run; a menu is shown when omitted.
    #[command(subcommand)]
    mode: Option<Mode>,
}

/// Top-level modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
enum Mode {
    /// Play with the arrow keys; P or Space pauses, Escape quits.
    Play,
    /// Evolve a network policy and save the champion.
    Train {
        /// How games are run while training.
        #[arg(long, value_enum, default_value_t = TrainMode::Headless)]
        mode: TrainMode,
    },
    /// Play the saved champion.
    Replay {
        /// Watch the game in a window instead of printing the score.
        #[arg(long)]
        visual: bool,
    },
}

/// Ways of running training games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TrainMode {
    /// One game at a time, drawn in real time.
    Visual,
    /// One game at a time, as fast as possible.
    Headless,
    /// Every game of a generation at once on a worker pool.
    Parallel,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mode = match cli.mode {
        Some(mode) => mode,
        None => match menu::choose(&mut io::stdin().lock(), &mut io::stdout()) {
            Ok(mode) => mode,
            Err(error) => {
                tracing::error!(%error, "no mode selected");
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    match mode {
        Mode::Play => {
            let config = Config::load_or_default(&cli.config)?;
            play::play(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Train { mode } => {
            let config = Config::load(&cli.config)?;
            train::train(&config, mode)?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Replay { visual } => {
            let config = Config::load(&cli.config)?;
            replay::replay(&config, visual)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["maze-chase", "train", "--mode", "parallel"])
            .expect("train parses");
        assert_eq!(
            cli.mode,
            Some(Mode::Train {
                mode: TrainMode::Parallel
            })
        );
        assert_eq!(cli.config, PathBuf::from("maze-chase.toml"));

        let cli = Cli::try_parse_from(["maze-chase", "--config", "alt.toml", "replay", "--visual"])
            .expect("replay parses");
        assert_eq!(cli.mode, Some(Mode::Replay { visual: true }));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn training_defaults_to_headless_and_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["maze-chase", "train"]).expect("train parses");
        assert_eq!(
            cli.mode,
            Some(Mode::Train {
                mode: TrainMode::Headless
            })
        );
        assert_eq!(Cli::try_parse_from(["maze-chase"]).expect("bare").mode, None);
        assert!(Cli::try_parse_from(["maze-chase", "train", "--mode", "gpu"]).is_err());
    }
}
