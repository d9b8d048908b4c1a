#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mode-orthogonal game loop.
//!
//! A [`GameLoop`] owns one complete simulation: the maze, Pac-Man, the ghosts,
//! a [`DirectionPolicy`] and a [`SimulationClock`]. Every clock strategy runs
//! the same per-tick pipeline:
//!
//! 1. cosmetic timers (power pellet blink, background flash);
//! 2. ghosts and fruit advance unless paused;
//! 3. pellet, ghost and fruit contacts are resolved unless paused;
//! 4. Pac-Man moves when alive and unpaused, or plays his death animation;
//! 5. an expired timed pause applies its action;
//! 6. input is honoured: pause toggle and quit interactively, only quit in
//!    training;
//! 7. the frame is handed to the [`Presenter`].
//!
//! Tick outcomes are broadcast as [`Event`] values into a caller-owned buffer.

mod clock;
mod pacman;
mod pause;

use std::time::Duration;

use maze_chase_core::{collide, Actor, Event, GhostMode, GhostSighting, Observation, PelletKind};
use maze_chase_system_control::DirectionPolicy;
use maze_chase_system_ghosts::{GhostGroup, Quarry};
use maze_chase_world::{query, Fruit, LayoutError, Maze, MazeBlueprint};

pub use clock::{
    ClockStrategy, ManualTimeSource, SimulationClock, SystemTimeSource, TimeSource,
    DEFAULT_TICK_RATE,
};
pub use pacman::{Pacman, PACMAN_COLLIDE_RADIUS, PACMAN_SPEED};
pub use pause::{PauseAction, PauseController};

const DEATH_PAUSE: Duration = Duration::from_secs(3);
const GHOST_EATEN_PAUSE: Duration = Duration::from_secs(1);
const LEVEL_CLEARED_PAUSE: Duration = Duration::from_secs(3);
const BACKGROUND_FLASH_PERIOD: Duration = Duration::from_millis(200);
const FRUIT_THRESHOLDS: [usize; 2] = [50, 140];

/// Who is playing, which decides how terminal events are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// A person plays; losing the last life restarts the game and clearing a
    /// level loads the next one.
    Interactive,
    /// A policy is being scored; the run ends when the lives run out, the
    /// level is cleared or the tick budget is spent.
    Training,
}

/// Coarse state of a loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// Built but never ticked.
    Idle,
    /// Simulation advancing.
    Playing,
    /// Simulation frozen by the player or a timed pause.
    Paused,
    /// Terminal; further ticks do nothing.
    GameOver,
}

/// Per-run tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopConfig {
    /// Lives at the start of a game.
    pub lives: u32,
    /// Seed for the ghosts' random steering.
    pub seed: u64,
    /// Training runs end after this many ticks.
    pub max_ticks: Option<u64>,
}

impl LoopConfig {
    /// Defaults for a person at the keyboard.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            lives: 5,
            seed: 0,
            max_ticks: None,
        }
    }

    /// Defaults for scoring a policy: one life and a ten minute budget.
    #[must_use]
    pub const fn training() -> Self {
        Self {
            lives: 1,
            seed: 0,
            max_ticks: Some(36_000),
        }
    }
}

/// Input sampled by the host for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Player asked to pause or unpause.
    pub toggle_pause: bool,
    /// Player or host asked the loop to stop.
    pub quit: bool,
}

/// Borrowed view of everything a presenter may draw.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Current level layout and pellets.
    pub maze: &'a Maze,
    /// Pac-Man.
    pub pacman: &'a Pacman,
    /// Ghosts.
    pub ghosts: &'a GhostGroup,
    /// Fruit on the board, if any.
    pub fruit: Option<&'a Fruit>,
    /// Levels whose fruit has been collected.
    pub captured_fruit: &'a [u32],
    /// Score.
    pub score: u32,
    /// Lives left.
    pub lives: u32,
    /// Zero-based level.
    pub level: u32,
    /// Coarse loop state.
    pub state: PlayState,
    /// Whether the background is in the bright half of its post-level flash.
    pub background_flash: bool,
}

/// Receives a view of the game after every tick.
pub trait Presenter {
    /// Draws or records the frame.
    fn present(&mut self, frame: &Frame<'_>);
}

/// Presenter that ignores every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Presenter for Headless {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// One isolated simulation.
#[derive(Debug)]
pub struct GameLoop<P, T = SystemTimeSource> {
    template: Maze,
    maze: Maze,
    pacman: Pacman,
    ghosts: GhostGroup,
    fruit: Option<Fruit>,
    fruit_spawned_at: Option<usize>,
    captured_fruit: Vec<u32>,
    policy: P,
    clock: SimulationClock<T>,
    pause: PauseController,
    mode: GameMode,
    config: LoopConfig,
    started: bool,
    over: bool,
    score: u32,
    lives: u32,
    level: u32,
    ticks: u64,
    flashing: bool,
    flash_on: bool,
    flash_timer: Duration,
}

impl<P, T> GameLoop<P, T>
where
    P: DirectionPolicy,
    T: TimeSource,
{
    /// Builds the first level from `blueprint`.
    pub fn new(
        blueprint: &MazeBlueprint,
        mode: GameMode,
        policy: P,
        clock: SimulationClock<T>,
        config: LoopConfig,
    ) -> Result<Self, LayoutError> {
        let template = Maze::build(blueprint)?;
        let maze = template.clone();
        let pacman = Pacman::new(&maze);
        let ghosts = GhostGroup::new(&maze, config.seed);

        Ok(Self {
            template,
            maze,
            pacman,
            ghosts,
            fruit: None,
            fruit_spawned_at: None,
            captured_fruit: Vec::new(),
            policy,
            clock,
            pause: PauseController::new(),
            mode,
            lives: config.lives,
            config,
            started: false,
            over: false,
            score: 0,
            level: 0,
            ticks: 0,
            flashing: false,
            flash_on: false,
            flash_timer: Duration::ZERO,
        })
    }

    /// Score so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Lives left.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Zero-based level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mode the loop runs in.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether the run reached its terminal state.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    /// Coarse loop state.
    #[must_use]
    pub const fn play_state(&self) -> PlayState {
        if self.over {
            PlayState::GameOver
        } else if !self.started {
            PlayState::Idle
        } else if self.pause.is_paused() {
            PlayState::Paused
        } else {
            PlayState::Playing
        }
    }

    /// Pac-Man.
    #[must_use]
    pub const fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    /// Ghosts.
    #[must_use]
    pub const fn ghosts(&self) -> &GhostGroup {
        &self.ghosts
    }

    /// Current maze.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Pause state.
    #[must_use]
    pub const fn pause(&self) -> &PauseController {
        &self.pause
    }

    /// Policy steering Pac-Man, e.g. to feed it fresh key state.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Snapshot for presenters.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            maze: &self.maze,
            pacman: &self.pacman,
            ghosts: &self.ghosts,
            fruit: self.fruit.as_ref(),
            captured_fruit: &self.captured_fruit,
            score: self.score,
            lives: self.lives,
            level: self.level,
            state: self.play_state(),
            background_flash: self.flashing && self.flash_on,
        }
    }

    /// What the policy sees right now.
    #[must_use]
    pub fn observe(&self) -> Observation {
        let mover = self.pacman.mover();
        let ghosts = self
            .ghosts
            .iter()
            .filter(|ghost| ghost.is_visible())
            .map(|ghost| GhostSighting {
                ghost: ghost.name(),
                position: ghost.position(),
                mode: ghost.mode(),
            })
            .collect();

        Observation {
            position: mover.position(),
            heading: self.pacman.heading(),
            open: query::open_directions(&self.maze, mover.target(), Actor::Pacman),
            nearest_pellet: query::nearest_pellet(&self.maze, mover.position()),
            ghosts,
            pellets_remaining: self.maze.pellets().len(),
            score: self.score,
        }
    }

    /// Runs the ticks of one clock step. Returns the number of ticks run.
    pub fn step<R>(
        &mut self,
        input: TickInput,
        presenter: &mut R,
        events: &mut Vec<Event>,
    ) -> u32
    where
        R: Presenter + ?Sized,
    {
        let mut input = input;
        let mut ran = 0;
        for _ in 0..self.clock.ticks_per_step() {
            if self.over {
                break;
            }
            let dt = self.clock.next_dt();
            self.tick(dt, input, presenter, events);
            input = TickInput::default();
            ran += 1;
        }
        ran
    }

    /// Steps until the run is over and returns the final score.
    ///
    /// Interactive loops only end on quit, so this is meant for training runs.
    pub fn run_to_end<R>(&mut self, presenter: &mut R) -> u32
    where
        R: Presenter + ?Sized,
    {
        let mut events = Vec::new();
        while !self.over {
            let _ = self.step(TickInput::default(), presenter, &mut events);
            events.clear();
        }
        self.score
    }

    /// Runs a single tick of `dt`.
    pub fn tick<R>(
        &mut self,
        dt: Duration,
        input: TickInput,
        presenter: &mut R,
        events: &mut Vec<Event>,
    ) where
        R: Presenter + ?Sized,
    {
        if self.over {
            return;
        }
        if !self.started {
            self.start(events);
        }
        self.ticks += 1;

        self.maze.pellets_mut().update(dt);
        if self.flashing {
            self.flash_timer += dt;
            while self.flash_timer >= BACKGROUND_FLASH_PERIOD {
                self.flash_timer -= BACKGROUND_FLASH_PERIOD;
                self.flash_on = !self.flash_on;
            }
        }

        if !self.pause.is_paused() {
            let quarry = Quarry {
                position: self.pacman.position(),
                heading: self.pacman.heading(),
            };
            self.ghosts.update(self.maze.graph_mut(), dt, quarry);
            if let Some(fruit) = self.fruit.as_mut() {
                fruit.update(dt);
            }

            self.check_pellets(events);
            self.check_ghosts(events);
            self.check_fruit(events);
        }

        if self.pacman.is_alive() {
            if !self.pause.is_paused() && !self.over {
                let observation = self.observe();
                let desired = self.policy.decide(&observation);
                self.pacman.advance(self.maze.graph(), dt, desired);
            }
        } else {
            self.pacman.animate_death(dt);
        }

        if let Some(action) = self.pause.update(dt) {
            self.apply(action, events);
        }

        if input.quit && !self.over {
            events.push(Event::QuitRequested);
            self.finish(events);
        }
        if self.mode == GameMode::Interactive && input.toggle_pause && self.pacman.is_alive() {
            match self.pause.toggle() {
                Some(true) => events.push(Event::Paused {
                    player_initiated: true,
                }),
                Some(false) => {
                    self.show_entities();
                    events.push(Event::Resumed);
                }
                None => {}
            }
        }
        if self.mode == GameMode::Training
            && !self.over
            && self.config.max_ticks.is_some_and(|limit| self.ticks >= limit)
        {
            tracing::debug!(ticks = self.ticks, "training tick budget spent");
            self.finish(events);
        }

        presenter.present(&self.frame());
    }

    fn start(&mut self, events: &mut Vec<Event>) {
        self.started = true;
        events.push(Event::LevelStarted { level: self.level });
        if self.mode == GameMode::Interactive {
            self.pause.hold();
            events.push(Event::Paused {
                player_initiated: false,
            });
        }
    }

    fn finish(&mut self, events: &mut Vec<Event>) {
        self.over = true;
        events.push(Event::GameOver { score: self.score });
        tracing::info!(score = self.score, level = self.level, ticks = self.ticks, "game over");
    }

    fn check_pellets(&mut self, events: &mut Vec<Event>) {
        let Some(index) = self.maze.pellets().first_colliding(&self.pacman) else {
            return;
        };
        let Some(pellet) = self.maze.pellets_mut().remove(index) else {
            return;
        };
        self.score += pellet.points();
        events.push(Event::PelletEaten {
            kind: pellet.kind(),
            points: pellet.points(),
            remaining: self.maze.pellets().len(),
        });

        let eaten = self.maze.pellets().eaten();
        let released: Vec<_> = self
            .maze
            .ghosts()
            .map(|layout| {
                layout
                    .releases
                    .iter()
                    .filter(|release| release.after_pellets == eaten)
                    .filter_map(|release| {
                        layout
                            .start_of(release.ghost)
                            .map(|node| (node, release.direction, release.ghost))
                    })
                    .collect()
            })
            .unwrap_or_default();
        for (node, direction, ghost) in released {
            self.maze.graph_mut().allow_access(node, direction, ghost);
            events.push(Event::GhostReleased { ghost });
        }

        if pellet.kind() == PelletKind::Power {
            self.ghosts.start_freight();
            events.push(Event::FreightStarted);
        }

        if self.maze.pellets().is_empty() {
            events.push(Event::LevelCompleted { level: self.level });
            tracing::info!(level = self.level, score = self.score, "level cleared");
            match self.mode {
                GameMode::Training => self.finish(events),
                GameMode::Interactive => {
                    self.hide_entities();
                    self.flashing = true;
                    self.pause.arm(LEVEL_CLEARED_PAUSE, PauseAction::NextLevel);
                    events.push(Event::Paused {
                        player_initiated: false,
                    });
                }
            }
        }
    }

    fn check_ghosts(&mut self, events: &mut Vec<Event>) {
        for index in 0..self.ghosts.len() {
            if self.over || !self.pacman.is_alive() {
                return;
            }
            let Some(ghost) = self.ghosts.get_mut(index) else {
                continue;
            };
            if !collide(&self.pacman, &*ghost) {
                continue;
            }

            match ghost.mode() {
                GhostMode::Freight => {
                    let points = ghost.points();
                    let name = ghost.name();
                    ghost.set_visible(false);
                    ghost.start_spawn(self.maze.graph_mut());
                    self.pacman.set_visible(false);
                    self.score += points;
                    self.ghosts.update_points();
                    self.pause.arm(GHOST_EATEN_PAUSE, PauseAction::ShowEntities);
                    events.push(Event::GhostEaten {
                        ghost: name,
                        points,
                    });
                    events.push(Event::Paused {
                        player_initiated: false,
                    });
                }
                GhostMode::Spawn => {}
                GhostMode::Scatter | GhostMode::Chase => {
                    self.lives = self.lives.saturating_sub(1);
                    self.pacman.die();
                    self.ghosts.hide();
                    events.push(Event::PacmanDied {
                        lives_remaining: self.lives,
                    });
                    tracing::debug!(lives = self.lives, "pacman died");

                    if self.lives > 0 {
                        self.pause.arm(DEATH_PAUSE, PauseAction::ResetLevel);
                        events.push(Event::Paused {
                            player_initiated: false,
                        });
                    } else if self.mode == GameMode::Training {
                        self.finish(events);
                    } else {
                        self.pause.arm(DEATH_PAUSE, PauseAction::RestartGame);
                        events.push(Event::Paused {
                            player_initiated: false,
                        });
                    }
                }
            }
        }
    }

    fn check_fruit(&mut self, events: &mut Vec<Event>) {
        let eaten = self.maze.pellets().eaten();
        if FRUIT_THRESHOLDS.contains(&eaten)
            && self.fruit.is_none()
            && self.fruit_spawned_at != Some(eaten)
        {
            if let Some(anchor) = self.maze.fruit_start() {
                let fruit = Fruit::new(self.maze.graph(), anchor, self.level);
                events.push(Event::FruitSpawned {
                    position: fruit.position(),
                });
                self.fruit = Some(fruit);
                self.fruit_spawned_at = Some(eaten);
            }
        }

        let Some(fruit) = self.fruit.as_ref() else {
            return;
        };
        if collide(&self.pacman, fruit) {
            let points = fruit.points();
            if !self.captured_fruit.contains(&fruit.level()) {
                self.captured_fruit.push(fruit.level());
            }
            self.score += points;
            self.fruit = None;
            events.push(Event::FruitCollected { points });
        } else if fruit.is_expired() {
            self.fruit = None;
            events.push(Event::FruitExpired);
        }
    }

    fn apply(&mut self, action: PauseAction, events: &mut Vec<Event>) {
        match action {
            PauseAction::ShowEntities => {
                self.show_entities();
                events.push(Event::Resumed);
            }
            PauseAction::ResetLevel => {
                self.pacman.reset(&self.maze);
                self.ghosts.reset(self.maze.graph_mut());
                self.fruit = None;
                self.wait_or_resume(events);
            }
            PauseAction::RestartGame => {
                self.lives = self.config.lives;
                self.level = 0;
                self.score = 0;
                self.captured_fruit.clear();
                events.push(Event::GameRestarted);
                self.load_level(events);
                self.wait_or_resume(events);
            }
            PauseAction::NextLevel => {
                self.level += 1;
                self.load_level(events);
                self.wait_or_resume(events);
            }
        }
    }

    fn wait_or_resume(&mut self, events: &mut Vec<Event>) {
        match self.mode {
            GameMode::Interactive => {
                self.pause.hold();
                events.push(Event::Paused {
                    player_initiated: false,
                });
            }
            GameMode::Training => {
                self.pause.resume();
                events.push(Event::Resumed);
            }
        }
    }

    fn load_level(&mut self, events: &mut Vec<Event>) {
        self.maze = self.template.clone();
        self.pacman = Pacman::new(&self.maze);
        self.ghosts = GhostGroup::new(&self.maze, self.config.seed ^ u64::from(self.level));
        self.fruit = None;
        self.fruit_spawned_at = None;
        self.flashing = false;
        self.flash_on = false;
        self.flash_timer = Duration::ZERO;
        events.push(Event::LevelStarted { level: self.level });
        tracing::info!(level = self.level, "level loaded");
    }

    fn show_entities(&mut self) {
        self.pacman.set_visible(true);
        self.ghosts.show();
    }

    fn hide_entities(&mut self) {
        self.pacman.set_visible(false);
        self.ghosts.hide();
    }
}
