use std::time::Duration;

use maze_chase_core::{Direction, ARRIVAL_EPSILON};
use maze_chase_system_movement::{advance, Mover};
use maze_chase_world::{Maze, MazeBlueprint};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn assert_on_segment(maze: &Maze, mover: &Mover) -> Result<(), TestCaseError> {
    let graph = maze.graph();
    let from = graph.position(mover.node());
    let to = graph.position(mover.target());
    let detour =
        from.distance(mover.position()) + mover.position().distance(to) - from.distance(to);
    prop_assert!(detour.abs() < 1e-6, "mover left its segment by {detour}");

    if mover.is_resting() {
        prop_assert_eq!(mover.direction(), Direction::Stop);
        prop_assert!(mover.position().distance(from) <= ARRIVAL_EPSILON);
    } else {
        let heading = (to - from).normalize();
        prop_assert!(heading.distance(mover.direction().vector()) < 1e-9);
        prop_assert!(graph.is_valid(mover.node(), mover.direction(), mover.actor()));
    }
    Ok(())
}

proptest! {
    #[test]
    fn movers_stay_on_open_segments(
        steps in prop::collection::vec((direction(), 0u64..400), 1..120)
    ) {
        let maze = Maze::build(&MazeBlueprint::classic()).expect("classic maze");
        let mut mover = Mover::at_node(
            maze.graph(),
            maze_chase_core::Actor::Pacman,
            maze.pacman_start(),
            100.0,
            5.0,
        );

        for (desired, millis) in steps {
            advance(maze.graph(), &mut mover, Duration::from_millis(millis), desired);
            assert_on_segment(&maze, &mover)?;
        }
    }
}
