//! Training entry points.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use maze_chase_core::Event;
use maze_chase_rendering::{
    palette, FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_system_control::Autonomous;
use maze_chase_system_game_loop::{ClockStrategy, GameLoop, TickInput};
use maze_chase_system_training::{
    EvaluationSettings, Evaluator, GenerationReport, ParallelEvaluator, Population, SavedPolicy,
    SequentialEvaluator, Trainer,
};
use maze_chase_world::MazeBlueprint;

use crate::config::Config;
use crate::play::{log_events, WINDOW_SCALE};
use crate::presenter::ScenePresenter;
use crate::replay::owned_policy;
use crate::TrainMode;

/// Runs training in the requested mode and saves the champion.
pub(crate) fn train(config: &Config, mode: TrainMode) -> Result<()> {
    let settings = EvaluationSettings::new(MazeBlueprint::classic(), config.training())?
        .with_clock(config.simulation.tick_rate, config.simulation.batch_ticks);
    tracing::info!(
        ?mode,
        generations = config.training.generations,
        population = config.training.population,
        "training started"
    );

    match mode {
        TrainMode::Headless => train_with(config, SequentialEvaluator::new(settings)),
        TrainMode::Parallel => {
            let evaluator = ParallelEvaluator::new(settings, config.training.workers)?;
            train_with(config, evaluator)
        }
        TrainMode::Visual => train_visual(config, settings),
    }
}

fn train_with<E: Evaluator>(config: &Config, evaluator: E) -> Result<()> {
    let mut trainer = Trainer::new(Population::new(config.evolution()), evaluator);
    let champion = trainer.run(config.training.generations, print_report)?;
    match champion {
        Some(champion) => SavedPolicy::from(champion)
            .save(&config.training.policy_path)
            .context("failed to save the champion"),
        None => {
            tracing::warn!("no generations ran; nothing saved");
            Ok(())
        }
    }
}

fn print_report(report: &GenerationReport) {
    println!(
        "generation {:>4}: best {:>6}  mean {:>9.1}  worst {:>6}",
        report.generation + 1,
        report.best,
        report.mean,
        report.worst
    );
}

fn train_visual(config: &Config, settings: EvaluationSettings) -> Result<()> {
    let mut training = VisualTraining::new(
        settings,
        config.wall_clock(),
        Population::new(config.evolution()),
        config.training.generations,
        config.training.policy_path.clone(),
    )?;
    let presentation = Presentation::new(
        "Maze Chase: training",
        palette::BACKGROUND,
        WINDOW_SCALE,
        training.presenter.scene().clone(),
    )?;

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |_dt, input, scene| {
            match training.frame(input, scene) {
                Ok(control) => control,
                Err(error) => {
                    tracing::error!("{error:#}");
                    FrameControl::Exit
                }
            }
        })
}

/// Sequential training that plays one drawn step per frame.
///
/// Each frame advances the current member's game. When it ends the score is
/// recorded and the next member's game starts; after the last member the
/// generation is bred, and after the last generation the champion is saved.
struct VisualTraining {
    settings: EvaluationSettings,
    strategy: ClockStrategy,
    population: Population,
    generations: u32,
    scores: Vec<u32>,
    game: GameLoop<Autonomous>,
    presenter: ScenePresenter,
    events: Vec<Event>,
    policy_path: PathBuf,
}

impl VisualTraining {
    fn new(
        settings: EvaluationSettings,
        strategy: ClockStrategy,
        population: Population,
        generations: u32,
        policy_path: PathBuf,
    ) -> Result<Self> {
        let game = start_game(&settings, &population, 0, strategy)?;
        let presenter = ScenePresenter::new(game.maze());
        Ok(Self {
            settings,
            strategy,
            population,
            generations,
            scores: Vec::new(),
            game,
            presenter,
            events: Vec::new(),
            policy_path,
        })
    }

    fn frame(&mut self, input: FrameInput, scene: &mut Scene) -> Result<FrameControl> {
        if input.quit {
            tracing::info!("training aborted");
            save_champion(&self.population, &self.policy_path)?;
            return Ok(FrameControl::Exit);
        }

        self.events.clear();
        let _ = self
            .game
            .step(TickInput::default(), &mut self.presenter, &mut self.events);
        log_events(&self.events);
        scene.clone_from(self.presenter.scene());
        if !self.game.is_over() {
            return Ok(FrameControl::Continue);
        }

        self.scores.push(self.game.score());
        if self.scores.len() >= self.population.members().len() {
            let report = self.population.advance(&self.scores);
            print_report(&report);
            self.scores.clear();
            if self.population.generation() >= self.generations {
                save_champion(&self.population, &self.policy_path)?;
                return Ok(FrameControl::Exit);
            }
        }

        self.game = start_game(
            &self.settings,
            &self.population,
            self.scores.len(),
            self.strategy,
        )?;
        Ok(FrameControl::Continue)
    }
}

fn start_game(
    settings: &EvaluationSettings,
    population: &Population,
    member: usize,
    strategy: ClockStrategy,
) -> Result<GameLoop<Autonomous>> {
    let network = population
        .members()
        .get(member)
        .cloned()
        .context("population has no member to evaluate")?;
    Ok(settings.game_with(owned_policy(network), strategy)?)
}

fn save_champion(population: &Population, path: &Path) -> Result<()> {
    if let Some(champion) = population.champion() {
        SavedPolicy::from(champion.clone())
            .save(path)
            .context("failed to save the champion")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use maze_chase_system_game_loop::LoopConfig;
    use maze_chase_system_training::EvolutionSettings;
    use maze_chase_world::TilePosition;

    fn corridor() -> EvaluationSettings {
        let blueprint = MazeBlueprint::open("+ . . . . . . +\n", TilePosition::new(0.0, 0.0));
        let config = LoopConfig {
            lives: 1,
            seed: 3,
            max_ticks: Some(120),
        };
        EvaluationSettings::new(blueprint, config).expect("corridor is a valid maze")
    }

    #[test]
    fn visual_training_breeds_every_generation_then_saves() {
        let path = std::env::temp_dir().join(format!(
            "maze-chase-visual-training-{}.json",
            std::process::id()
        ));
        let population = Population::new(EvolutionSettings {
            population: 3,
            elite: 1,
            hidden: 4,
            ..EvolutionSettings::default()
        });
        let strategy = ClockStrategy::BatchedFixedStep {
            tick_rate: 60,
            batch: 10,
        };
        let mut training = VisualTraining::new(corridor(), strategy, population, 2, path.clone())
            .expect("first game starts");

        let mut scene = Scene::empty(Vec2::ZERO);
        let mut frames = 0;
        while training
            .frame(FrameInput::default(), &mut scene)
            .expect("frame")
            == FrameControl::Continue
        {
            frames += 1;
            assert!(frames < 1_000, "training never finished");
        }

        assert_eq!(training.population.generation(), 2);
        assert!(training.scores.is_empty());
        let saved = SavedPolicy::load(&path).expect("champion saved");
        assert_eq!(
            Some(saved.fitness),
            training.population.champion().map(|champion| champion.fitness)
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn quitting_stops_before_any_generation_is_bred() {
        let path = std::env::temp_dir().join(format!(
            "maze-chase-visual-quit-{}.json",
            std::process::id()
        ));
        let strategy = ClockStrategy::FixedStep { tick_rate: 60 };
        let population = Population::new(EvolutionSettings {
            population: 2,
            elite: 1,
            hidden: 4,
            ..EvolutionSettings::default()
        });
        let mut training = VisualTraining::new(corridor(), strategy, population, 5, path.clone())
            .expect("first game starts");
        let quit = FrameInput {
            quit: true,
            ..FrameInput::default()
        };

        let control = training
            .frame(quit, &mut Scene::empty(Vec2::ZERO))
            .expect("frame");
        assert_eq!(control, FrameControl::Exit);
        assert_eq!(training.population.generation(), 0);
        assert!(!path.exists());
    }
}
