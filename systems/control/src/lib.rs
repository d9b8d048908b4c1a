#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Direction policies that steer Pac-Man.
//!
//! The game loop never reads a keyboard. It hands an [`Observation`] to a
//! [`DirectionPolicy`] once per tick and applies the answer in the same tick,
//! so a human, a scripted function and a trained network all drive the exact
//! same simulation.

use maze_chase_core::{Direction, Observation};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses the heading Pac-Man should attempt this tick.
pub trait DirectionPolicy {
    /// Returns the desired heading; [`Direction::Stop`] means no request.
    fn decide(&mut self, observation: &Observation) -> Direction;
}

impl<P: DirectionPolicy + ?Sized> DirectionPolicy for &mut P {
    fn decide(&mut self, observation: &Observation) -> Direction {
        (**self).decide(observation)
    }
}

impl<P: DirectionPolicy + ?Sized> DirectionPolicy for Box<P> {
    fn decide(&mut self, observation: &Observation) -> Direction {
        (**self).decide(observation)
    }
}

/// Arrow keys held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Up arrow held.
    pub up: bool,
    /// Down arrow held.
    pub down: bool,
    /// Left arrow held.
    pub left: bool,
    /// Right arrow held.
    pub right: bool,
}

impl KeyState {
    /// Heading for the held keys; up wins over down over left over right.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.up {
            Direction::Up
        } else if self.down {
            Direction::Down
        } else if self.left {
            Direction::Left
        } else if self.right {
            Direction::Right
        } else {
            Direction::Stop
        }
    }
}

/// Policy fed by whatever keys the adapter reports each frame.
#[derive(Clone, Debug, Default)]
pub struct HumanInput {
    keys: KeyState,
}

impl HumanInput {
    /// Replaces the held keys. Nothing is buffered between frames.
    pub fn set_keys(&mut self, keys: KeyState) {
        self.keys = keys;
    }
}

impl DirectionPolicy for HumanInput {
    fn decide(&mut self, _observation: &Observation) -> Direction {
        self.keys.direction()
    }
}

type Decision = Box<dyn FnMut(&Observation) -> Direction + Send>;

/// Policy backed by a decision function, or by a seeded coin when none is given.
pub struct Autonomous {
    decision: Option<Decision>,
    rng: ChaCha8Rng,
}

impl Autonomous {
    /// Wraps a decision function.
    pub fn new<F>(decision: F) -> Self
    where
        F: FnMut(&Observation) -> Direction + Send + 'static,
    {
        Self {
            decision: Some(Box::new(decision)),
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Policy with no decision function that picks uniformly among all five
    /// directions.
    #[must_use]
    pub fn random(seed: u64) -> Self {
        tracing::info!(seed, "autonomous policy has no decision function; moving at random");
        Self {
            decision: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Whether a decision function is installed.
    #[must_use]
    pub fn has_decision(&self) -> bool {
        self.decision.is_some()
    }
}

impl std::fmt::Debug for Autonomous {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autonomous")
            .field("has_decision", &self.has_decision())
            .finish_non_exhaustive()
    }
}

impl DirectionPolicy for Autonomous {
    fn decide(&mut self, observation: &Observation) -> Direction {
        match self.decision.as_mut() {
            Some(decision) => decision(observation),
            None => Direction::ALL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Direction::Stop),
        }
    }
}
