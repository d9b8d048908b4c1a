use std::time::Duration;

use maze_chase_core::{tile_to_pixel, Actor, Direction, Observation};
use maze_chase_system_control::Autonomous;
use maze_chase_system_game_loop::{
    ClockStrategy, GameLoop, GameMode, Headless, LoopConfig, ManualTimeSource, SimulationClock,
    TickInput,
};
use maze_chase_world::MazeBlueprint;

fn classic() -> GameLoop<Autonomous, ManualTimeSource> {
    GameLoop::new(
        &MazeBlueprint::classic(),
        GameMode::Training,
        Autonomous::new(|_: &Observation| Direction::Left),
        SimulationClock::new(
            ClockStrategy::FixedStep { tick_rate: 60 },
            ManualTimeSource::new(),
        ),
        LoopConfig::training(),
    )
    .expect("classic maze builds")
}

#[test]
fn pacman_starts_on_the_start_tile() {
    let game = classic();
    let start = game.maze().pacman_start();

    assert_eq!(game.pacman().mover().node(), start);
    assert_eq!(game.pacman().mover().target(), start);
    assert!(game.pacman().position().distance(tile_to_pixel(15.0, 26.0)) <= 1e-4);
}

#[test]
fn one_tick_of_exact_length_reaches_the_left_neighbour() {
    let mut game = classic();
    let graph = game.maze().graph();
    let start = game.maze().pacman_start();
    let neighbour = graph
        .step(start, Direction::Left, Actor::Pacman)
        .expect("start node opens to the left");
    let goal = graph.position(neighbour);
    let distance = graph.position(start).distance(goal);

    let mut events = Vec::new();
    game.tick(
        Duration::from_secs_f64(distance / 100.0),
        TickInput::default(),
        &mut Headless,
        &mut events,
    );

    assert_eq!(game.pacman().mover().node(), neighbour);
    assert!(game.pacman().position().distance(goal) <= 1e-4);
}
