#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Node-to-node motion with continuous interpolation between junctions.
//!
//! A [`Mover`] always sits on the segment between its `node` and its `target`.
//! Each call to [`advance`] converts `speed * dt` into distance and spends it
//! along the graph, possibly crossing several junctions and portals in one
//! tick. Which way to leave a junction is decided by a [`Steering`] strategy;
//! Pac-Man uses [`Held`], the ghosts supply their own.

use std::time::Duration;

use maze_chase_core::{Actor, Circle, DVec2, Direction, Link, NodeId, ARRIVAL_EPSILON};
use maze_chase_world::MazeGraph;

/// Chooses the heading a mover leaves a junction with.
pub trait Steering {
    /// Heading to take from `mover.node()`. Invalid headings stop the mover.
    fn heading_at(&mut self, graph: &MazeGraph, mover: &Mover) -> Direction;
}

/// Keeps the requested heading when it is open, otherwise keeps going straight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Held(pub Direction);

impl Steering for Held {
    fn heading_at(&mut self, graph: &MazeGraph, mover: &Mover) -> Direction {
        if !self.0.is_stop() && graph.is_valid(mover.node, self.0, mover.actor) {
            self.0
        } else {
            mover.direction
        }
    }
}

/// Continuous position on the maze graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Mover {
    actor: Actor,
    node: NodeId,
    target: NodeId,
    position: DVec2,
    direction: Direction,
    speed: f64,
    collide_radius: f64,
}

impl Mover {
    /// Creates a mover resting on `node`.
    #[must_use]
    pub fn at_node(
        graph: &MazeGraph,
        actor: Actor,
        node: NodeId,
        speed: f64,
        collide_radius: f64,
    ) -> Self {
        Self {
            actor,
            node,
            target: node,
            position: graph.position(node),
            direction: Direction::Stop,
            speed,
            collide_radius,
        }
    }

    /// Creates a mover halfway between `node` and its neighbour in `direction`,
    /// heading toward that neighbour. Falls back to resting on `node`.
    #[must_use]
    pub fn between(
        graph: &MazeGraph,
        actor: Actor,
        node: NodeId,
        direction: Direction,
        speed: f64,
        collide_radius: f64,
    ) -> Self {
        let mut mover = Self::at_node(graph, actor, node, speed, collide_radius);
        if let Some(target) = graph.step(node, direction, actor) {
            mover.target = target;
            mover.direction = direction;
            mover.position = (graph.position(node) + graph.position(target)) / 2.0;
        }
        mover
    }

    /// Capability tag used for access checks.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.actor
    }

    /// Node most recently departed from.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Node currently travelled toward.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Pixel position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Current heading; [`Direction::Stop`] when resting on a node.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Travel speed in pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Changes the travel speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Whether the mover rests on its node with nowhere to go.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.node == self.target
    }

    /// Turns around mid-segment when the way back is open.
    ///
    /// Returns `true` if the mover reversed.
    pub fn reverse(&mut self, graph: &MazeGraph) -> bool {
        if self.is_resting() {
            return false;
        }
        let back = self.direction.opposite();
        if !graph.is_valid(self.target, back, self.actor) {
            return false;
        }
        std::mem::swap(&mut self.node, &mut self.target);
        self.direction = back;
        true
    }
}

impl Circle for Mover {
    fn centre(&self) -> DVec2 {
        self.position
    }

    fn collide_radius(&self) -> f64 {
        self.collide_radius
    }
}

/// Advances a mover steered by the held `desired` heading.
pub fn advance(graph: &MazeGraph, mover: &mut Mover, dt: Duration, desired: Direction) {
    advance_steered(graph, mover, dt, desired, &mut Held(desired));
}

/// Advances a mover by `speed * dt`, consulting `steering` at every junction.
///
/// A non-stop `desired` heading takes effect immediately when the mover rests
/// on its node, or when it asks to turn around mid-segment. Every other
/// change of heading happens on arrival at a node.
pub fn advance_steered<S>(
    graph: &MazeGraph,
    mover: &mut Mover,
    dt: Duration,
    desired: Direction,
    steering: &mut S,
) where
    S: Steering + ?Sized,
{
    if dt.is_zero() {
        return;
    }

    if !desired.is_stop() {
        if mover.is_resting() {
            if let Some(next) = graph.step(mover.node, desired, mover.actor) {
                mover.target = next;
                mover.direction = desired;
            }
        } else if desired == mover.direction.opposite() {
            let _ = mover.reverse(graph);
        }
    }

    // A snap that spends the budget exactly still arrives on the next pass.
    let mut distance = mover.speed * dt.as_secs_f64();
    loop {
        let goal = graph.position(mover.target);
        let remaining = mover.position.distance(goal);

        if remaining <= ARRIVAL_EPSILON {
            arrive(graph, mover);
            let heading = steering.heading_at(graph, mover);
            match graph.step(mover.node, heading, mover.actor) {
                Some(next) => {
                    mover.target = next;
                    mover.direction = heading;
                }
                None => {
                    mover.target = mover.node;
                    mover.direction = Direction::Stop;
                    break;
                }
            }
            if distance <= 0.0 {
                break;
            }
        } else if remaining <= distance + ARRIVAL_EPSILON {
            mover.position = goal;
            distance = (distance - remaining).max(0.0);
        } else {
            mover.position += (goal - mover.position) / remaining * distance;
            break;
        }
    }
}

fn arrive(graph: &MazeGraph, mover: &mut Mover) {
    mover.node = mover.target;
    if let Some(paired) = graph.neighbor(mover.node, Link::Portal) {
        mover.node = paired;
    }
    mover.target = mover.node;
    mover.position = graph.position(mover.node);
}
