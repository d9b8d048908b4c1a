//! Bonus fruit that appears for a limited time.

use std::time::Duration;

use maze_chase_core::{Circle, DVec2, Link, NodeId};

use crate::graph::MazeGraph;

/// How long a fruit stays on the board.
pub const FRUIT_LIFESPAN: Duration = Duration::from_secs(5);

const FRUIT_COLLIDE_RADIUS: f64 = 5.0;

/// Fruit sitting between its anchor node and the node to its right.
#[derive(Clone, Debug, PartialEq)]
pub struct Fruit {
    position: DVec2,
    points: u32,
    level: u32,
    age: Duration,
}

impl Fruit {
    /// Places a fruit for the provided level next to `node`.
    #[must_use]
    pub fn new(graph: &MazeGraph, node: NodeId, level: u32) -> Self {
        let anchor = graph.position(node);
        let position = graph
            .neighbor(node, Link::Right)
            .map_or(anchor, |right| (anchor + graph.position(right)) / 2.0);

        Self {
            position,
            points: 100 + level * 20,
            level,
            age: Duration::ZERO,
        }
    }

    /// Points awarded when eaten.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Level the fruit was spawned on; identifies its kind.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Pixel position of the fruit.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Ages the fruit.
    pub fn update(&mut self, dt: Duration) {
        self.age += dt;
    }

    /// Whether the fruit outlived its lifespan.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age >= FRUIT_LIFESPAN
    }
}

impl Circle for Fruit {
    fn centre(&self) -> DVec2 {
        self.position
    }

    fn collide_radius(&self) -> f64 {
        FRUIT_COLLIDE_RADIUS
    }
}
