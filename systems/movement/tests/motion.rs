use std::time::Duration;

use maze_chase_core::{tile_to_pixel, Actor, Direction, NodeId};
use maze_chase_system_movement::{advance, Mover};
use maze_chase_world::{Maze, MazeBlueprint, MazeGraph};

const SPEED: f64 = 100.0;

fn straight_line(stops: &[f64]) -> (MazeGraph, Vec<NodeId>) {
    let mut graph = MazeGraph::new();
    let nodes: Vec<_> = stops
        .iter()
        .map(|column| graph.insert(tile_to_pixel(*column, 0.0)))
        .collect();
    for pair in nodes.windows(2) {
        graph.connect(pair[0], Direction::Right, pair[1]);
    }
    (graph, nodes)
}

fn pacman_at(graph: &MazeGraph, node: NodeId) -> Mover {
    Mover::at_node(graph, Actor::Pacman, node, SPEED, 5.0)
}

#[test]
fn zero_dt_leaves_the_mover_untouched() {
    let (graph, nodes) = straight_line(&[0.0, 4.0]);
    let mut mover = Mover::between(&graph, Actor::Pacman, nodes[0], Direction::Right, SPEED, 5.0);
    let before = mover.clone();

    advance(&graph, &mut mover, Duration::ZERO, Direction::Left);

    assert_eq!(mover, before);
}

#[test]
fn one_tick_of_exact_length_reaches_the_neighbour() {
    let (graph, nodes) = straight_line(&[0.0, 4.0]);
    let mut mover = pacman_at(&graph, nodes[0]);
    let edge = graph.position(nodes[0]).distance(graph.position(nodes[1]));

    advance(
        &graph,
        &mut mover,
        Duration::from_secs_f64(edge / SPEED),
        Direction::Right,
    );

    assert_eq!(mover.node(), nodes[1]);
    assert!(mover.position().distance(graph.position(nodes[1])) <= 1e-4);
}

#[test]
fn exact_arrival_mid_line_picks_the_next_segment() {
    let (graph, nodes) = straight_line(&[0.0, 4.0, 8.0]);
    let mut mover = pacman_at(&graph, nodes[0]);

    advance(&graph, &mut mover, Duration::from_secs_f64(0.64), Direction::Right);

    assert_eq!(mover.node(), nodes[1]);
    assert_eq!(mover.target(), nodes[2]);
    assert_eq!(mover.direction(), Direction::Right);
    assert!(mover.position().distance(graph.position(nodes[1])) <= 1e-4);
}

#[test]
fn long_ticks_cross_several_junctions() {
    let (graph, nodes) = straight_line(&[0.0, 2.0, 4.0, 8.0]);
    let mut mover = pacman_at(&graph, nodes[0]);

    // 80 px: past the junctions at 32 px and 64 px.
    advance(&graph, &mut mover, Duration::from_millis(800), Direction::Right);

    assert_eq!(mover.node(), nodes[2]);
    assert_eq!(mover.target(), nodes[3]);
    assert!((mover.position().x - 80.0).abs() < 1e-9);
    assert_eq!(mover.direction(), Direction::Right);
}

#[test]
fn blocked_heading_stops_on_the_node() {
    let (graph, nodes) = straight_line(&[0.0, 2.0]);
    let mut mover = pacman_at(&graph, nodes[0]);

    advance(&graph, &mut mover, Duration::from_secs(1), Direction::Right);

    assert_eq!(mover.node(), nodes[1]);
    assert_eq!(mover.target(), nodes[1]);
    assert_eq!(mover.direction(), Direction::Stop);
    assert_eq!(mover.position(), graph.position(nodes[1]));
}

#[test]
fn portal_crossing_costs_no_distance() {
    let mut graph = MazeGraph::new();
    let west = graph.insert(tile_to_pixel(0.0, 0.0));
    let west_inner = graph.insert(tile_to_pixel(4.0, 0.0));
    let east_inner = graph.insert(tile_to_pixel(12.0, 0.0));
    let east = graph.insert(tile_to_pixel(16.0, 0.0));
    graph.connect(west, Direction::Right, west_inner);
    graph.connect(east_inner, Direction::Right, east);
    graph.set_portal_pair(west, east);

    let mut mover = Mover::between(&graph, Actor::Pacman, east_inner, Direction::Right, SPEED, 5.0);
    assert!((mover.position().x - 224.0).abs() < 1e-9);

    // 32 px to reach the east portal, then 16 px beyond the west one.
    advance(&graph, &mut mover, Duration::from_millis(480), Direction::Stop);

    assert_eq!(mover.node(), west);
    assert_eq!(mover.target(), west_inner);
    assert!((mover.position().x - 16.0).abs() < 1e-9);
}

#[test]
fn opposite_request_reverses_mid_segment() {
    let (graph, nodes) = straight_line(&[0.0, 4.0]);
    let mut mover = Mover::between(&graph, Actor::Pacman, nodes[0], Direction::Right, SPEED, 5.0);

    advance(&graph, &mut mover, Duration::from_millis(100), Direction::Left);

    assert_eq!(mover.direction(), Direction::Left);
    assert_eq!(mover.node(), nodes[1]);
    assert_eq!(mover.target(), nodes[0]);
    assert!((mover.position().x - 22.0).abs() < 1e-9);
}

#[test]
fn perpendicular_request_waits_for_the_junction() {
    let mut graph = MazeGraph::new();
    let start = graph.insert(tile_to_pixel(0.0, 0.0));
    let junction = graph.insert(tile_to_pixel(2.0, 0.0));
    let ahead = graph.insert(tile_to_pixel(6.0, 0.0));
    let below = graph.insert(tile_to_pixel(2.0, 4.0));
    graph.connect(start, Direction::Right, junction);
    graph.connect(junction, Direction::Right, ahead);
    graph.connect(junction, Direction::Down, below);

    let mut mover = pacman_at(&graph, start);
    advance(&graph, &mut mover, Duration::from_millis(100), Direction::Right);
    assert_eq!(mover.direction(), Direction::Right);

    // Mid-segment the turn is not possible yet.
    advance(&graph, &mut mover, Duration::from_millis(100), Direction::Down);
    assert_eq!(mover.direction(), Direction::Right);
    assert_eq!(mover.target(), junction);

    // 12 px to the junction, then 8 px down.
    advance(&graph, &mut mover, Duration::from_millis(200), Direction::Down);
    assert_eq!(mover.node(), junction);
    assert_eq!(mover.target(), below);
    assert_eq!(mover.direction(), Direction::Down);
    assert!((mover.position().y - 8.0).abs() < 1e-9);
}

#[test]
fn closed_edges_are_never_entered() {
    let (mut graph, nodes) = straight_line(&[0.0, 4.0]);
    graph.deny_access(nodes[0], Direction::Right, Actor::Pacman);
    let mut mover = pacman_at(&graph, nodes[0]);

    advance(&graph, &mut mover, Duration::from_millis(500), Direction::Right);

    assert!(mover.is_resting());
    assert_eq!(mover.position(), graph.position(nodes[0]));

    let mut ghost = Mover::at_node(&graph, Actor::Blinky, nodes[0], SPEED, 5.0);
    advance(&graph, &mut ghost, Duration::from_millis(500), Direction::Right);
    assert_eq!(ghost.target(), nodes[1]);
}

#[test]
fn classic_start_reaches_its_left_neighbour_in_one_exact_tick() {
    let maze = Maze::build(&MazeBlueprint::classic()).expect("classic maze");
    let graph = maze.graph();
    let start = maze.pacman_start();
    let neighbour = graph
        .step(start, Direction::Left, Actor::Pacman)
        .expect("start node opens to the left");
    let distance = graph.position(start).distance(graph.position(neighbour));
    let mut mover = pacman_at(graph, start);

    advance(graph, &mut mover, Duration::from_secs_f64(distance / SPEED), Direction::Left);

    assert_eq!(mover.node(), neighbour);
    assert!(mover.position().distance(graph.position(neighbour)) <= 1e-4);
}
