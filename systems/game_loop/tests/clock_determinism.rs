use maze_chase_core::Event;
use maze_chase_system_control::Autonomous;
use maze_chase_system_game_loop::{
    ClockStrategy, GameLoop, GameMode, Headless, LoopConfig, ManualTimeSource, SimulationClock,
    TickInput,
};
use maze_chase_world::MazeBlueprint;

fn play(strategy: ClockStrategy) -> (u32, u64, Vec<Event>) {
    let mut game = GameLoop::new(
        &MazeBlueprint::classic(),
        GameMode::Training,
        Autonomous::random(11),
        SimulationClock::new(strategy, ManualTimeSource::new()),
        LoopConfig {
            lives: 3,
            seed: 4,
            max_ticks: Some(2_400),
        },
    )
    .expect("classic maze builds");

    let mut events = Vec::new();
    while !game.is_over() {
        let _ = game.step(TickInput::default(), &mut Headless, &mut events);
    }
    (game.score(), game.ticks(), events)
}

#[test]
fn every_clock_strategy_plays_the_same_game() {
    let paced = play(ClockStrategy::WallClockCapped { tick_rate: 60 });
    let fixed = play(ClockStrategy::FixedStep { tick_rate: 60 });
    let batched = play(ClockStrategy::BatchedFixedStep {
        tick_rate: 60,
        batch: 20,
    });

    assert_eq!(paced, fixed);
    assert_eq!(fixed, batched);
    assert!(fixed.1 <= 2_400);
}

#[test]
fn repeated_runs_are_identical() {
    let first = play(ClockStrategy::FixedStep { tick_rate: 60 });
    let second = play(ClockStrategy::FixedStep { tick_rate: 60 });
    assert_eq!(first, second);
}
