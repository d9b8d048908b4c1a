use maze_chase_core::{DVec2, Direction, TILE_WIDTH};
use maze_chase_system_movement::{Mover, Steering};
use maze_chase_world::MazeGraph;
use rand::Rng;

/// Open headings at the mover's node, never turning back unless cornered.
pub(crate) fn candidates(graph: &MazeGraph, mover: &Mover) -> Vec<Direction> {
    let back = mover.direction().opposite();
    let mut options: Vec<_> = graph
        .valid_directions(mover.node(), mover.actor())
        .filter(|direction| *direction != back)
        .collect();
    if options.is_empty() && graph.is_valid(mover.node(), back, mover.actor()) {
        options.push(back);
    }
    options
}

/// Picks the candidate whose next tile lies closest to a goal point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GoalSteering {
    pub(crate) goal: DVec2,
}

impl Steering for GoalSteering {
    fn heading_at(&mut self, graph: &MazeGraph, mover: &Mover) -> Direction {
        let origin = graph.position(mover.node());
        let mut best = Direction::Stop;
        let mut best_distance = f64::INFINITY;
        for direction in candidates(graph, mover) {
            let probe = origin + direction.vector() * TILE_WIDTH;
            let distance = probe.distance_squared(self.goal);
            if distance < best_distance {
                best = direction;
                best_distance = distance;
            }
        }
        best
    }
}

/// Picks a uniformly random candidate.
pub(crate) struct WanderSteering<'a, R> {
    pub(crate) rng: &'a mut R,
}

impl<R: Rng> Steering for WanderSteering<'_, R> {
    fn heading_at(&mut self, graph: &MazeGraph, mover: &Mover) -> Direction {
        let options = candidates(graph, mover);
        if options.is_empty() {
            return Direction::Stop;
        }
        options[self.rng.gen_range(0..options.len())]
    }
}
