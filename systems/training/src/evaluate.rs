//! Scoring networks by playing headless games.

use std::num::NonZeroUsize;

use maze_chase_system_control::DirectionPolicy;
use maze_chase_system_game_loop::{
    ClockStrategy, GameLoop, GameMode, Headless, LoopConfig, SimulationClock, DEFAULT_TICK_RATE,
};
use maze_chase_world::{LayoutError, Maze, MazeBlueprint};
use rayon::prelude::*;
use thiserror::Error;

use crate::network::{Network, NetworkPolicy};

/// Failures while preparing or running evaluations.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The training maze could not be built.
    #[error("training maze is invalid")]
    Layout(#[from] LayoutError),
    /// The worker pool could not be started.
    #[error("failed to start {workers} evaluation workers")]
    ThreadPool {
        /// Requested worker count.
        workers: usize,
        /// Underlying failure.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Everything needed to set up one training game.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationSettings {
    blueprint: MazeBlueprint,
    tick_rate: u32,
    batch: u32,
    config: LoopConfig,
}

impl EvaluationSettings {
    /// Validates the blueprint once so that evaluations cannot fail on it.
    pub fn new(blueprint: MazeBlueprint, config: LoopConfig) -> Result<Self, EvaluationError> {
        let _ = Maze::build(&blueprint)?;
        Ok(Self {
            blueprint,
            tick_rate: DEFAULT_TICK_RATE,
            batch: 20,
            config,
        })
    }

    /// Overrides the fixed tick rate and batch size of headless games.
    #[must_use]
    pub fn with_clock(mut self, tick_rate: u32, batch: u32) -> Self {
        self.tick_rate = tick_rate;
        self.batch = batch;
        self
    }

    /// Training game settings.
    #[must_use]
    pub const fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Fixed tick rate of headless games.
    #[must_use]
    pub const fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Training game steered by `network` and paced by `strategy`.
    pub fn game<'n>(
        &self,
        network: &'n Network,
        strategy: ClockStrategy,
    ) -> Result<GameLoop<NetworkPolicy<'n>>, EvaluationError> {
        self.game_with(NetworkPolicy::new(network), strategy)
    }

    /// Training game steered by any policy, e.g. one that owns its network.
    pub fn game_with<P: DirectionPolicy>(
        &self,
        policy: P,
        strategy: ClockStrategy,
    ) -> Result<GameLoop<P>, EvaluationError> {
        Ok(GameLoop::new(
            &self.blueprint,
            GameMode::Training,
            policy,
            SimulationClock::system(strategy),
            self.config.clone(),
        )?)
    }

    fn headless(&self) -> ClockStrategy {
        ClockStrategy::BatchedFixedStep {
            tick_rate: self.tick_rate,
            batch: self.batch,
        }
    }
}

/// Plays one headless game with `network` and returns its score.
pub fn evaluate(network: &Network, settings: &EvaluationSettings) -> Result<u32, EvaluationError> {
    let mut game = settings.game(network, settings.headless())?;
    Ok(game.run_to_end(&mut Headless))
}

/// Scores a whole generation.
pub trait Evaluator {
    /// Returns one score per network, in order.
    fn evaluate_all(&mut self, networks: &[Network]) -> Result<Vec<u32>, EvaluationError>;
}

/// Plays the games one after another on the calling thread.
#[derive(Clone, Debug)]
pub struct SequentialEvaluator {
    settings: EvaluationSettings,
}

impl SequentialEvaluator {
    /// Evaluator for the provided settings.
    #[must_use]
    pub const fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }
}

impl Evaluator for SequentialEvaluator {
    fn evaluate_all(&mut self, networks: &[Network]) -> Result<Vec<u32>, EvaluationError> {
        networks
            .iter()
            .map(|network| evaluate(network, &self.settings))
            .collect()
    }
}

/// Plays every game of a generation on its own pool worker. Each game owns
/// its maze, entities and random state; only networks and scores are shared.
#[derive(Debug)]
pub struct ParallelEvaluator {
    settings: EvaluationSettings,
    pool: rayon::ThreadPool,
}

impl ParallelEvaluator {
    /// Starts a pool of `workers` threads, or one per available core when
    /// `workers` is zero.
    pub fn new(settings: EvaluationSettings, workers: usize) -> Result<Self, EvaluationError> {
        let workers = if workers == 0 {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            workers
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("maze-chase-eval-{index}"))
            .build()
            .map_err(|source| EvaluationError::ThreadPool { workers, source })?;
        tracing::info!(workers, "parallel evaluator ready");
        Ok(Self { settings, pool })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Evaluator for ParallelEvaluator {
    fn evaluate_all(&mut self, networks: &[Network]) -> Result<Vec<u32>, EvaluationError> {
        let settings = &self.settings;
        self.pool.install(|| {
            networks
                .par_iter()
                .map(|network| evaluate(network, settings))
                .collect()
        })
    }
}
