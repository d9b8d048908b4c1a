use maze_chase_core::{Actor, Direction, Link, PelletKind};
use maze_chase_world::{Maze, MazeBlueprint};

fn classic() -> Maze {
    Maze::build(&MazeBlueprint::classic()).expect("classic maze builds")
}

#[test]
fn classic_maze_has_expected_shape() {
    let maze = classic();
    assert_eq!(maze.dimensions(), (28, 36));
    assert_eq!(maze.graph().len(), 74);

    let power = maze
        .pellets()
        .pellets()
        .iter()
        .filter(|pellet| pellet.kind() == PelletKind::Power)
        .count();
    assert_eq!(power, 4);
    assert_eq!(maze.pellets().len(), 248);
}

#[test]
fn tunnel_ends_are_portal_pairs() {
    let maze = classic();
    let graph = maze.graph();
    let west = graph.node_from_tiles(0.0, 17.0).expect("west tunnel");
    let east = graph.node_from_tiles(27.0, 17.0).expect("east tunnel");
    assert_eq!(graph.neighbor(west, Link::Portal), Some(east));
    assert_eq!(graph.neighbor(east, Link::Portal), Some(west));
}

#[test]
fn home_door_is_closed_to_pacman_and_idle_ghosts() {
    let maze = classic();
    let graph = maze.graph();
    let ghosts = maze.ghosts().expect("ghost layout");
    let door = ghosts.home;

    assert_eq!(graph.position(door), maze_chase_core::tile_to_pixel(13.5, 14.0));
    assert!(!graph.is_valid(door, Direction::Down, Actor::Pacman));
    for ghost in Actor::GHOSTS {
        assert!(!graph.is_valid(door, Direction::Down, ghost));
        assert!(graph.is_valid(door, Direction::Left, ghost));
        assert!(graph.is_valid(door, Direction::Right, ghost));
    }
    assert!(graph.is_valid(ghosts.spawn, Direction::Up, Actor::Pinky));
    assert!(!graph.is_valid(ghosts.spawn, Direction::Left, Actor::Pinky));
}

#[test]
fn ghosts_cannot_turn_up_at_restricted_junctions() {
    let maze = classic();
    let graph = maze.graph();
    for (column, row) in [(12.0, 14.0), (15.0, 14.0), (12.0, 26.0), (15.0, 26.0)] {
        let node = graph.node_from_tiles(column, row).expect("junction");
        assert!(graph.is_valid(node, Direction::Up, Actor::Pacman));
        for ghost in Actor::GHOSTS {
            assert!(!graph.is_valid(node, Direction::Up, ghost));
        }
    }
}

#[test]
fn inky_and_clyde_start_locked_in() {
    let maze = classic();
    let ghosts = maze.ghosts().expect("ghost layout");
    let graph = maze.graph();
    let inky = ghosts.start_of(Actor::Inky).expect("inky start");
    let clyde = ghosts.start_of(Actor::Clyde).expect("clyde start");

    assert!(!graph.is_valid(inky, Direction::Right, Actor::Inky));
    assert!(!graph.is_valid(clyde, Direction::Left, Actor::Clyde));
    assert_eq!(ghosts.releases.len(), 2);
}

#[test]
fn pacman_start_and_fruit_anchor_resolve() {
    let maze = classic();
    let graph = maze.graph();
    assert_eq!(
        graph.position(maze.pacman_start()),
        maze_chase_core::tile_to_pixel(15.0, 26.0)
    );
    assert_eq!(maze.pacman_heading(), Direction::Left);
    assert!(maze.fruit_start().is_some());
}
