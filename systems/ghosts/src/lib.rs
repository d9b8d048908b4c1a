#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The four ghosts: mode timing, target selection and home access.
//!
//! Ghosts move with the same engine as Pac-Man. Each one picks a goal point
//! from its mode and personality and steers toward it at junctions; while
//! frightened it wanders at random instead.

mod mode;
mod steering;

use std::time::Duration;

use maze_chase_core::{Actor, Circle, DVec2, Direction, GhostMode, NodeId, TILE_WIDTH};
use maze_chase_system_movement::{advance_steered, Mover};
use maze_chase_world::{Maze, MazeGraph};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use mode::{ModeController, CHASE_TIME, FREIGHT_TIME, SCATTER_TIME};

use steering::{GoalSteering, WanderSteering};

/// Normal ghost speed in pixels per second.
pub const GHOST_SPEED: f64 = 100.0;

/// Speed while frightened.
pub const FREIGHT_SPEED: f64 = 50.0;

/// Speed while returning to the spawn node.
pub const SPAWN_SPEED: f64 = 150.0;

/// Collision radius of a ghost.
pub const GHOST_COLLIDE_RADIUS: f64 = 5.0;

/// Points for the first ghost eaten during one freight period.
pub const BASE_GHOST_POINTS: u32 = 200;

/// What the ghosts know about Pac-Man when choosing goals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quarry {
    /// Pac-Man position in pixels.
    pub position: DVec2,
    /// Pac-Man heading.
    pub heading: Direction,
}

/// A single ghost.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    mover: Mover,
    modes: ModeController,
    start: NodeId,
    home: NodeId,
    spawn: NodeId,
    points: u32,
    visible: bool,
    corner: DVec2,
}

impl Ghost {
    fn new(graph: &MazeGraph, name: Actor, start: NodeId, home: NodeId, spawn: NodeId) -> Self {
        Self {
            mover: Mover::at_node(graph, name, start, GHOST_SPEED, GHOST_COLLIDE_RADIUS),
            modes: ModeController::default(),
            start,
            home,
            spawn,
            points: BASE_GHOST_POINTS,
            visible: true,
            corner: scatter_corner(name),
        }
    }

    /// Which ghost this is.
    #[must_use]
    pub const fn name(&self) -> Actor {
        self.mover.actor()
    }

    /// Motion state.
    #[must_use]
    pub const fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Pixel position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.mover.position()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> GhostMode {
        self.modes.current()
    }

    /// Points awarded if eaten now.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Whether the ghost should be drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the ghost.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Sends a frightened ghost back to the spawn node through the home door.
    pub fn start_spawn(&mut self, graph: &mut MazeGraph) {
        if self.modes.start_spawn() {
            self.mover.set_speed(SPAWN_SPEED);
            graph.allow_access(self.home, Direction::Down, self.name());
            tracing::debug!(ghost = ?self.name(), "ghost returning to spawn");
        }
    }

    fn start_freight(&mut self) {
        if self.modes.start_freight() {
            self.mover.set_speed(FREIGHT_SPEED);
        }
    }

    fn normal_mode(&mut self, graph: &mut MazeGraph) {
        self.mover.set_speed(GHOST_SPEED);
        graph.deny_access(self.home, Direction::Down, self.name());
    }

    fn reset(&mut self, graph: &mut MazeGraph) {
        self.mover = Mover::at_node(
            graph,
            self.name(),
            self.start,
            GHOST_SPEED,
            GHOST_COLLIDE_RADIUS,
        );
        self.modes = ModeController::default();
        self.points = BASE_GHOST_POINTS;
        self.visible = true;
        graph.deny_access(self.home, Direction::Down, self.name());
    }

    fn goal(&self, graph: &MazeGraph, quarry: &Quarry, blinky: DVec2) -> DVec2 {
        match self.modes.current() {
            GhostMode::Spawn => graph.position(self.spawn),
            GhostMode::Scatter | GhostMode::Freight => self.corner,
            GhostMode::Chase => self.chase_goal(quarry, blinky),
        }
    }

    fn chase_goal(&self, quarry: &Quarry, blinky: DVec2) -> DVec2 {
        let ahead = |tiles: f64| quarry.position + quarry.heading.vector() * TILE_WIDTH * tiles;
        match self.name() {
            Actor::Pinky => ahead(4.0),
            Actor::Inky => blinky + (ahead(2.0) - blinky) * 2.0,
            Actor::Clyde => {
                let reach = TILE_WIDTH * 8.0;
                if quarry.position.distance_squared(self.position()) <= reach * reach {
                    self.corner
                } else {
                    ahead(4.0)
                }
            }
            _ => quarry.position,
        }
    }

    fn update(
        &mut self,
        graph: &mut MazeGraph,
        dt: Duration,
        quarry: &Quarry,
        blinky: DVec2,
        rng: &mut ChaCha8Rng,
    ) {
        if self.modes.update(dt) {
            self.normal_mode(graph);
        }
        if self.modes.current() == GhostMode::Spawn && self.mover.node() == self.spawn {
            self.modes.finish_spawn();
            self.normal_mode(graph);
            tracing::debug!(ghost = ?self.name(), "ghost respawned");
        }

        if self.modes.current() == GhostMode::Freight {
            advance_steered(
                graph,
                &mut self.mover,
                dt,
                Direction::Stop,
                &mut WanderSteering { rng },
            );
        } else {
            let goal = self.goal(graph, quarry, blinky);
            advance_steered(
                graph,
                &mut self.mover,
                dt,
                Direction::Stop,
                &mut GoalSteering { goal },
            );
        }
    }
}

impl Circle for Ghost {
    fn centre(&self) -> DVec2 {
        self.mover.position()
    }

    fn collide_radius(&self) -> f64 {
        GHOST_COLLIDE_RADIUS
    }
}

fn scatter_corner(name: Actor) -> DVec2 {
    let width = TILE_WIDTH * f64::from(maze_chase_core::MAZE_COLUMNS);
    let height = maze_chase_core::TILE_HEIGHT * f64::from(maze_chase_core::MAZE_ROWS);
    match name {
        Actor::Pinky => DVec2::new(width, 0.0),
        Actor::Inky => DVec2::new(width, height),
        Actor::Clyde => DVec2::new(0.0, height),
        _ => DVec2::ZERO,
    }
}

/// All ghosts of a level plus the random source used while frightened.
#[derive(Clone, Debug)]
pub struct GhostGroup {
    ghosts: Vec<Ghost>,
    rng: ChaCha8Rng,
}

impl GhostGroup {
    /// Places the maze's ghosts on their start nodes. A maze without a ghost
    /// layout yields an empty group.
    #[must_use]
    pub fn new(maze: &Maze, seed: u64) -> Self {
        let ghosts = maze
            .ghosts()
            .map(|layout| {
                layout
                    .starts
                    .iter()
                    .map(|(name, start)| {
                        Ghost::new(maze.graph(), *name, *start, layout.home, layout.spawn)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            ghosts,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of ghosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    /// Reports whether the group has no ghosts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    /// Iterates ghosts in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Ghost> {
        self.ghosts.iter()
    }

    /// Mutably iterates ghosts in spawn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ghost> {
        self.ghosts.iter_mut()
    }

    /// Looks up a ghost by name.
    #[must_use]
    pub fn get(&self, name: Actor) -> Option<&Ghost> {
        self.ghosts.iter().find(|ghost| ghost.name() == name)
    }

    /// Ghost at the provided position in spawn order.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Ghost> {
        self.ghosts.get_mut(index)
    }

    /// Advances every ghost by `dt`.
    pub fn update(&mut self, graph: &mut MazeGraph, dt: Duration, quarry: Quarry) {
        let blinky = self
            .get(Actor::Blinky)
            .map_or(quarry.position, Ghost::position);
        for ghost in &mut self.ghosts {
            ghost.update(graph, dt, &quarry, blinky, &mut self.rng);
        }
    }

    /// Frightens every ghost and restarts the point ladder.
    pub fn start_freight(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.start_freight();
        }
        self.reset_points();
    }

    /// Doubles the points of every ghost after one is eaten.
    pub fn update_points(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.points *= 2;
        }
    }

    /// Restores the base ghost points.
    pub fn reset_points(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.points = BASE_GHOST_POINTS;
        }
    }

    /// Makes every ghost visible.
    pub fn show(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.visible = true;
        }
    }

    /// Hides every ghost.
    pub fn hide(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.visible = false;
        }
    }

    /// Returns every ghost to its start node in its initial state.
    pub fn reset(&mut self, graph: &mut MazeGraph) {
        for ghost in &mut self.ghosts {
            ghost.reset(graph);
        }
    }
}
