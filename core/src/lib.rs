#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the vocabulary every other crate speaks: headings,
//! the capability tags that gate maze edges, ghost modes, circle collision,
//! the [`Event`] values a game loop broadcasts after each tick, and the
//! [`Observation`] handed to direction policies. Nothing in here owns state
//! that changes over time.

use serde::{Deserialize, Serialize};

pub use glam::DVec2;

/// Side length of a single maze tile in pixels.
pub const TILE_WIDTH: f64 = 16.0;

/// Height of a single maze tile in pixels.
pub const TILE_HEIGHT: f64 = 16.0;

/// Number of tile columns in a classic maze.
pub const MAZE_COLUMNS: u32 = 28;

/// Number of tile rows in a classic maze.
pub const MAZE_ROWS: u32 = 36;

/// Distance under which a mover counts as having reached its target.
pub const ARRIVAL_EPSILON: f64 = 1e-4;

/// Converts fractional tile coordinates into a pixel position.
#[must_use]
pub fn tile_to_pixel(column: f64, row: f64) -> DVec2 {
    DVec2::new(column * TILE_WIDTH, row * TILE_HEIGHT)
}

/// Heading requested by a policy or held by a mover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// No movement; the zero vector.
    #[default]
    Stop,
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// The four headings that correspond to maze edges, in canonical order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Every direction a policy may emit, including [`Direction::Stop`].
    pub const ALL: [Direction; 5] = [
        Direction::Stop,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Heading pointing the other way. Stop is its own opposite.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Stop => Direction::Stop,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in screen space.
    #[must_use]
    pub const fn vector(self) -> DVec2 {
        match self {
            Direction::Stop => DVec2::ZERO,
            Direction::Up => DVec2::new(0.0, -1.0),
            Direction::Down => DVec2::new(0.0, 1.0),
            Direction::Left => DVec2::new(-1.0, 0.0),
            Direction::Right => DVec2::new(1.0, 0.0),
        }
    }

    /// Reports whether the direction is [`Direction::Stop`].
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Direction::Stop)
    }

    /// Position of the heading inside [`Direction::CARDINAL`].
    #[must_use]
    pub const fn cardinal_index(self) -> Option<usize> {
        match self {
            Direction::Stop => None,
            Direction::Up => Some(0),
            Direction::Down => Some(1),
            Direction::Left => Some(2),
            Direction::Right => Some(3),
        }
    }
}

/// Neighbour slot of a maze node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// Neighbour above.
    Up,
    /// Neighbour below.
    Down,
    /// Neighbour to the left.
    Left,
    /// Neighbour to the right.
    Right,
    /// Paired node on the far side of a portal.
    Portal,
}

impl Link {
    /// Maps a heading onto its neighbour slot. Stop has none.
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Option<Self> {
        match direction {
            Direction::Stop => None,
            Direction::Up => Some(Link::Up),
            Direction::Down => Some(Link::Down),
            Direction::Left => Some(Link::Left),
            Direction::Right => Some(Link::Right),
        }
    }

    /// Index of the slot inside a node's neighbour table.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Link::Up => 0,
            Link::Down => 1,
            Link::Left => 2,
            Link::Right => 3,
            Link::Portal => 4,
        }
    }
}

/// Capability tag used to gate which entities may traverse an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Actor {
    /// The player-controlled agent.
    Pacman,
    /// Red ghost.
    Blinky,
    /// Pink ghost.
    Pinky,
    /// Cyan ghost.
    Inky,
    /// Orange ghost.
    Clyde,
    /// Bonus fruit.
    Fruit,
}

impl Actor {
    /// Ghost tags in spawn order.
    pub const GHOSTS: [Actor; 4] = [Actor::Blinky, Actor::Pinky, Actor::Inky, Actor::Clyde];

    const fn bit(self) -> u8 {
        match self {
            Actor::Pacman => 1 << 0,
            Actor::Blinky => 1 << 1,
            Actor::Pinky => 1 << 2,
            Actor::Inky => 1 << 3,
            Actor::Clyde => 1 << 4,
            Actor::Fruit => 1 << 5,
        }
    }

    /// Reports whether the tag names one of the four ghosts.
    #[must_use]
    pub const fn is_ghost(self) -> bool {
        matches!(
            self,
            Actor::Blinky | Actor::Pinky | Actor::Inky | Actor::Clyde
        )
    }
}

/// Set of actors allowed to traverse a single directed edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessSet(u8);

impl AccessSet {
    /// Set containing every actor.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b0011_1111)
    }

    /// Set containing no actor.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Reports whether the actor belongs to the set.
    #[must_use]
    pub const fn contains(self, actor: Actor) -> bool {
        self.0 & actor.bit() != 0
    }

    /// Adds the actor to the set.
    pub fn insert(&mut self, actor: Actor) {
        self.0 |= actor.bit();
    }

    /// Removes the actor from the set.
    pub fn remove(&mut self, actor: Actor) {
        self.0 &= !actor.bit();
    }
}

impl Default for AccessSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Behavioural mode of a single ghost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostMode {
    /// Retreat toward the ghost's home corner.
    #[default]
    Scatter,
    /// Pursue the ghost's chase target.
    Chase,
    /// Frightened; can be eaten by Pac-Man.
    Freight,
    /// Eaten; returning to the spawn node.
    Spawn,
}

/// Kind of collectible dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PelletKind {
    /// Ordinary dot.
    Regular,
    /// Energiser that frightens the ghosts.
    Power,
}

/// Index of a node inside a maze graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Arena slot addressed by the identifier.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Anything with a circular collision footprint.
pub trait Circle {
    /// Centre of the footprint in pixels.
    fn centre(&self) -> DVec2;

    /// Radius of the footprint in pixels.
    fn collide_radius(&self) -> f64;
}

/// Free-standing circle, handy for probes and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    /// Centre in pixels.
    pub centre: DVec2,
    /// Radius in pixels.
    pub radius: f64,
}

impl Disc {
    /// Creates a disc from its centre and radius.
    #[must_use]
    pub const fn new(centre: DVec2, radius: f64) -> Self {
        Self { centre, radius }
    }
}

impl Circle for Disc {
    fn centre(&self) -> DVec2 {
        self.centre
    }

    fn collide_radius(&self) -> f64 {
        self.radius
    }
}

/// Reports whether two circular footprints overlap or touch.
#[must_use]
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Circle + ?Sized,
    B: Circle + ?Sized,
{
    let reach = a.collide_radius() + b.collide_radius();
    a.centre().distance_squared(b.centre()) <= reach * reach
}

/// Events broadcast by a game loop while it processes a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Pac-Man ate a pellet.
    PelletEaten {
        /// Whether the pellet was an energiser.
        kind: PelletKind,
        /// Points awarded.
        points: u32,
        /// Pellets left in the maze afterwards.
        remaining: usize,
    },
    /// A ghost was released from the home by the pellet counter.
    GhostReleased {
        /// Ghost whose door opened.
        ghost: Actor,
    },
    /// Every ghost not respawning turned frightened.
    FreightStarted,
    /// Pac-Man ate a frightened ghost.
    GhostEaten {
        /// Ghost that was eaten.
        ghost: Actor,
        /// Points awarded for the ghost.
        points: u32,
    },
    /// Pac-Man touched a dangerous ghost.
    PacmanDied {
        /// Lives left after the loss.
        lives_remaining: u32,
    },
    /// A fruit appeared.
    FruitSpawned {
        /// Location of the fruit.
        position: DVec2,
    },
    /// Pac-Man ate the fruit.
    FruitCollected {
        /// Points awarded for the fruit.
        points: u32,
    },
    /// The fruit disappeared before it was eaten.
    FruitExpired,
    /// The last pellet of a level was eaten.
    LevelCompleted {
        /// Level that was cleared.
        level: u32,
    },
    /// A level was (re)loaded.
    LevelStarted {
        /// Level that is now active.
        level: u32,
    },
    /// Score, lives and level were reset after the last life was lost.
    GameRestarted,
    /// The loop entered a pause.
    Paused {
        /// Whether the player requested the pause.
        player_initiated: bool,
    },
    /// The loop left a pause.
    Resumed,
    /// The run reached its terminal state.
    GameOver {
        /// Final score.
        score: u32,
    },
    /// The player or the host asked the loop to stop.
    QuitRequested,
}

/// Ghost information visible to a direction policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostSighting {
    /// Ghost identity.
    pub ghost: Actor,
    /// Position in pixels.
    pub position: DVec2,
    /// Current behaviour mode.
    pub mode: GhostMode,
}

/// Everything a direction policy may inspect before choosing a heading.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Pac-Man position in pixels.
    pub position: DVec2,
    /// Heading Pac-Man currently travels in.
    pub heading: Direction,
    /// Open edges from Pac-Man's current node, indexed like [`Direction::CARDINAL`].
    pub open: [bool; 4],
    /// Closest remaining pellet, if any.
    pub nearest_pellet: Option<DVec2>,
    /// Ghosts currently on the board.
    pub ghosts: Vec<GhostSighting>,
    /// Number of pellets still in the maze.
    pub pellets_remaining: usize,
    /// Score accumulated so far.
    pub score: u32,
}

impl Observation {
    /// Builds an observation with no ghosts, no pellets and every edge closed.
    #[must_use]
    pub fn at(position: DVec2, heading: Direction) -> Self {
        Self {
            position,
            heading,
            open: [false; 4],
            nearest_pellet: None,
            ghosts: Vec::new(),
            pellets_remaining: 0,
            score: 0,
        }
    }

    /// Reports whether the given heading leads along an open edge.
    #[must_use]
    pub fn is_open(&self, direction: Direction) -> bool {
        direction
            .cardinal_index()
            .map_or(false, |index| self.open[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{collide, tile_to_pixel, AccessSet, Actor, Direction, Disc, DVec2, Link};

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Stop.opposite(), Direction::Stop);
    }

    #[test]
    fn opposite_vectors_cancel() {
        for direction in Direction::CARDINAL {
            let sum = direction.vector() + direction.opposite().vector();
            assert_eq!(sum, DVec2::ZERO);
            assert!((direction.vector().length() - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn link_indices_match_cardinal_order() {
        for direction in Direction::CARDINAL {
            let link = Link::from_direction(direction).expect("cardinal link");
            assert_eq!(Some(link.index()), direction.cardinal_index());
        }
        assert!(Link::from_direction(Direction::Stop).is_none());
    }

    #[test]
    fn access_set_tracks_individual_actors() {
        let mut set = AccessSet::all();
        assert!(set.contains(Actor::Clyde));
        set.remove(Actor::Clyde);
        assert!(!set.contains(Actor::Clyde));
        assert!(set.contains(Actor::Inky));
        set.insert(Actor::Clyde);
        assert_eq!(set, AccessSet::all());
        assert!(!AccessSet::empty().contains(Actor::Pacman));
    }

    #[test]
    fn touching_circles_collide() {
        let a = Disc::new(DVec2::ZERO, 5.0);
        let b = Disc::new(DVec2::new(7.0, 0.0), 2.0);
        let c = Disc::new(DVec2::new(7.01, 0.0), 2.0);
        assert!(collide(&a, &b));
        assert!(!collide(&a, &c));
    }

    #[test]
    fn tile_coordinates_scale_by_tile_size() {
        assert_eq!(tile_to_pixel(15.0, 26.0), DVec2::new(240.0, 416.0));
        assert_eq!(tile_to_pixel(13.5, 14.0), DVec2::new(216.0, 224.0));
    }
}
