//! TOML configuration shared by every mode.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_chase_system_game_loop::{ClockStrategy, LoopConfig};
use maze_chase_system_training::EvolutionSettings;
use serde::Deserialize;
use thiserror::Error;

/// Problems reading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// No file at the path.
    #[error("configuration file {} not found", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("configuration file {} is invalid", path.display())]
    Invalid {
        /// File being parsed.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Clock and randomness.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationSection {
    /// Ticks per second for every clock strategy.
    pub(crate) tick_rate: u32,
    /// Ticks per step of the batched strategy.
    pub(crate) batch_ticks: u32,
    /// Seed for ghosts and breeding.
    pub(crate) seed: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            batch_ticks: 20,
            seed: 7,
        }
    }
}

/// Rules of a single game.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameSection {
    /// Lives when a person plays.
    pub(crate) interactive_lives: u32,
    /// Lives when a policy is scored.
    pub(crate) training_lives: u32,
    /// Tick budget of a training game.
    pub(crate) max_training_ticks: u64,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            interactive_lives: 5,
            training_lives: 1,
            max_training_ticks: 36_000,
        }
    }
}

/// Evolutionary search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TrainingSection {
    /// Rounds of evaluation and breeding.
    pub(crate) generations: u32,
    /// Networks per generation.
    pub(crate) population: usize,
    /// Networks carried over unchanged.
    pub(crate) elite: usize,
    /// Hidden layer width.
    pub(crate) hidden: usize,
    /// Probability of perturbing a parameter.
    pub(crate) mutation_rate: f64,
    /// Deviation of a perturbation.
    pub(crate) mutation_scale: f64,
    /// Parallel workers; zero picks one per core.
    pub(crate) workers: usize,
    /// Where the champion is saved and replayed from.
    pub(crate) policy_path: PathBuf,
}

impl Default for TrainingSection {
    fn default() -> Self {
        Self {
            generations: 100,
            population: 48,
            elite: 6,
            hidden: 16,
            mutation_rate: 0.15,
            mutation_scale: 0.4,
            workers: 0,
            policy_path: PathBuf::from("winner.json"),
        }
    }
}

/// Complete configuration file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// `[simulation]` table.
    pub(crate) simulation: SimulationSection,
    /// `[game]` table.
    pub(crate) game: GameSection,
    /// `[training]` table.
    pub(crate) training: TrainingSection,
}

impl Config {
    /// Reads and parses a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Reads the file if it exists, otherwise falls back to defaults.
    pub(crate) fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound { .. }) => {
                tracing::info!(path = %path.display(), "no configuration file; using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Settings for a person at the keyboard.
    pub(crate) fn interactive(&self) -> LoopConfig {
        LoopConfig {
            lives: self.game.interactive_lives,
            seed: self.simulation.seed,
            max_ticks: None,
        }
    }

    /// Settings for scoring a policy.
    pub(crate) fn training(&self) -> LoopConfig {
        LoopConfig {
            lives: self.game.training_lives,
            seed: self.simulation.seed,
            max_ticks: Some(self.game.max_training_ticks),
        }
    }

    /// Real-time pacing used whenever a window is open.
    pub(crate) fn wall_clock(&self) -> ClockStrategy {
        ClockStrategy::WallClockCapped {
            tick_rate: self.simulation.tick_rate,
        }
    }

    /// Search settings.
    pub(crate) fn evolution(&self) -> EvolutionSettings {
        EvolutionSettings {
            population: self.training.population,
            elite: self.training.elite,
            hidden: self.training.hidden,
            mutation_rate: self.training.mutation_rate,
            mutation_scale: self.training.mutation_scale,
            seed: self.simulation.seed,
        }
    }
}
