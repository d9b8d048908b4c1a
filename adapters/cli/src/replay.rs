//! Replaying the saved champion.

use std::{io, process::ExitCode};

use anyhow::Result;
use maze_chase_system_control::Autonomous;
use maze_chase_system_game_loop::{ClockStrategy, Headless};
use maze_chase_system_training::{EvaluationSettings, Network, PolicyStoreError, SavedPolicy};
use maze_chase_world::MazeBlueprint;

use crate::config::Config;
use crate::menu;
use crate::play::watch;

/// Policy that owns its network, for games that outlive any borrow.
pub(crate) fn owned_policy(network: Network) -> Autonomous {
    Autonomous::new(move |observation| network.decide(observation))
}

/// Plays the policy saved at the configured path once.
pub(crate) fn replay(config: &Config, visual: bool) -> Result<ExitCode> {
    let path = &config.training.policy_path;
    let saved = match SavedPolicy::load(path) {
        Ok(saved) => saved,
        Err(PolicyStoreError::NotFound { path }) => {
            tracing::error!(path = %path.display(), "no saved policy to replay");
            menu::wait_for_enter(
                &mut io::stdin().lock(),
                &mut io::stdout(),
                &format!("No winner found at {}. Train a policy first.", path.display()),
            )?;
            return Ok(ExitCode::FAILURE);
        }
        Err(error) => {
            return Err(anyhow::Error::new(error).context("cannot replay the saved policy"));
        }
    };
    tracing::info!(
        generation = saved.generation,
        fitness = saved.fitness,
        "replaying saved policy"
    );

    let settings = EvaluationSettings::new(MazeBlueprint::classic(), config.training())?;
    if visual {
        let game = settings.game_with(owned_policy(saved.network), config.wall_clock())?;
        watch(game, "Maze Chase: replay", |_: &mut Autonomous, _| {})?;
    } else {
        let strategy = ClockStrategy::BatchedFixedStep {
            tick_rate: config.simulation.tick_rate,
            batch: config.simulation.batch_ticks,
        };
        let mut game = settings.game(&saved.network, strategy)?;
        let score = game.run_to_end(&mut Headless);
        println!("score: {score} (level {}, {} ticks)", game.level() + 1, game.ticks());
    }
    Ok(ExitCode::SUCCESS)
}
