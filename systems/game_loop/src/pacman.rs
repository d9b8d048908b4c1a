use std::time::Duration;

use maze_chase_core::{Actor, Circle, DVec2, Direction};
use maze_chase_system_movement::{advance, Mover};
use maze_chase_world::{Maze, MazeGraph};

/// Pac-Man's speed in pixels per second.
pub const PACMAN_SPEED: f64 = 100.0;

/// Pac-Man's collision radius.
pub const PACMAN_COLLIDE_RADIUS: f64 = 5.0;

/// The player-controlled agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Pacman {
    mover: Mover,
    pending: Direction,
    alive: bool,
    visible: bool,
    animation: Duration,
}

impl Pacman {
    /// Places Pac-Man at rest on the maze's start node. He leaves along the
    /// start heading unless the policy asks for another way first.
    #[must_use]
    pub fn new(maze: &Maze) -> Self {
        Self {
            mover: Mover::at_node(
                maze.graph(),
                Actor::Pacman,
                maze.pacman_start(),
                PACMAN_SPEED,
                PACMAN_COLLIDE_RADIUS,
            ),
            pending: maze.pacman_heading(),
            alive: true,
            visible: true,
            animation: Duration::ZERO,
        }
    }

    /// Returns to the start position, alive and visible.
    pub fn reset(&mut self, maze: &Maze) {
        *self = Self::new(maze);
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

    /// Current heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        if self.mover.is_resting() && !self.pending.is_stop() {
            self.pending
        } else {
            self.mover.direction()
        }
    }

    /// Whether Pac-Man is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether Pac-Man should be drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Time spent in the current animation: chomping while alive, dying after a death.
    #[must_use]
    pub const fn animation(&self) -> Duration {
        self.animation
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn die(&mut self) {
        self.alive = false;
        self.animation = Duration::ZERO;
    }

    pub(crate) fn advance(&mut self, graph: &MazeGraph, dt: Duration, desired: Direction) {
        let desired = if self.mover.is_resting()
            && !graph.is_valid(self.mover.node(), desired, Actor::Pacman)
        {
            self.pending
        } else {
            desired
        };
        advance(graph, &mut self.mover, dt, desired);
        if !self.mover.is_resting() {
            self.pending = Direction::Stop;
            self.animation += dt;
        }
    }

    pub(crate) fn animate_death(&mut self, dt: Duration) {
        self.animation += dt;
    }
}

impl Circle for Pacman {
    fn centre(&self) -> DVec2 {
        self.mover.position()
    }

    fn collide_radius(&self) -> f64 {
        PACMAN_COLLIDE_RADIUS
    }
}
