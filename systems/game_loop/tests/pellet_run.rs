use maze_chase_core::{Direction, Event, Observation};
use maze_chase_system_control::Autonomous;
use maze_chase_system_game_loop::{
    ClockStrategy, GameLoop, GameMode, Headless, LoopConfig, ManualTimeSource, PlayState,
    SimulationClock, TickInput,
};
use maze_chase_world::{MazeBlueprint, TilePosition};

fn corridor(pellets: usize) -> MazeBlueprint {
    let mut layout = String::from("+");
    for _ in 0..pellets - 2 {
        layout.push_str(" .");
    }
    layout.push_str(" +\n");
    MazeBlueprint::open(layout, TilePosition::new(0.0, 0.0))
}

fn run_right(mode: GameMode, config: LoopConfig) -> GameLoop<Autonomous, ManualTimeSource> {
    GameLoop::new(
        &corridor(244),
        mode,
        Autonomous::new(|_: &Observation| Direction::Right),
        SimulationClock::new(
            ClockStrategy::FixedStep { tick_rate: 60 },
            ManualTimeSource::new(),
        ),
        config,
    )
    .expect("corridor builds")
}

fn completions(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::LevelCompleted { .. }))
        .count()
}

#[test]
fn training_run_ends_when_the_last_pellet_goes() {
    let mut game = run_right(GameMode::Training, LoopConfig::training());
    let mut events = Vec::new();
    while !game.is_over() && game.ticks() < 5_000 {
        let _ = game.step(TickInput::default(), &mut Headless, &mut events);
    }

    assert!(game.is_over());
    assert_eq!(completions(&events), 1);
    assert_eq!(game.score(), 244 * 10);
    assert_eq!(game.maze().pellets().len(), 0);
    assert_eq!(game.play_state(), PlayState::GameOver);
    assert_eq!(events.last(), Some(&Event::GameOver { score: 2440 }));
}

#[test]
fn interactive_run_waits_then_loads_the_next_level() {
    let mut game = run_right(GameMode::Interactive, LoopConfig::interactive());
    let mut events = Vec::new();

    let _ = game.step(TickInput::default(), &mut Headless, &mut events);
    assert_eq!(game.play_state(), PlayState::Paused);
    assert_eq!(game.score(), 0);

    let _ = game.step(
        TickInput {
            toggle_pause: true,
            ..TickInput::default()
        },
        &mut Headless,
        &mut events,
    );
    assert_eq!(game.play_state(), PlayState::Playing);

    for _ in 0..5_000 {
        let _ = game.step(TickInput::default(), &mut Headless, &mut events);
    }

    assert!(!game.is_over());
    assert_eq!(completions(&events), 1);
    assert_eq!(game.level(), 1);
    assert_eq!(game.score(), 2440);
    assert_eq!(game.maze().pellets().len(), 244);
    assert_eq!(game.play_state(), PlayState::Paused);
    assert!(events.contains(&Event::LevelStarted { level: 1 }));
}

#[test]
fn training_budget_ends_an_idle_run() {
    let mut game = GameLoop::new(
        &corridor(10),
        GameMode::Training,
        Autonomous::new(|_: &Observation| Direction::Stop),
        SimulationClock::new(
            ClockStrategy::BatchedFixedStep {
                tick_rate: 60,
                batch: 7,
            },
            ManualTimeSource::new(),
        ),
        LoopConfig {
            max_ticks: Some(100),
            ..LoopConfig::training()
        },
    )
    .expect("corridor builds");

    assert_eq!(game.run_to_end(&mut Headless), 10);
    assert_eq!(game.ticks(), 100);
}

#[test]
fn quitting_ends_the_game_in_any_mode() {
    for mode in [GameMode::Interactive, GameMode::Training] {
        let mut game = run_right(mode, LoopConfig::interactive());
        let mut events = Vec::new();
        let _ = game.step(
            TickInput {
                quit: true,
                ..TickInput::default()
            },
            &mut Headless,
            &mut events,
        );
        assert!(game.is_over());
        assert!(events.contains(&Event::QuitRequested));
        assert_eq!(game.step(TickInput::default(), &mut Headless, &mut events), 0);
    }
}

#[test]
fn training_ignores_pause_requests() {
    let mut game = run_right(GameMode::Training, LoopConfig::training());
    let mut events = Vec::new();
    for _ in 0..10 {
        let _ = game.step(
            TickInput {
                toggle_pause: true,
                ..TickInput::default()
            },
            &mut Headless,
            &mut events,
        );
    }
    assert_eq!(game.play_state(), PlayState::Playing);
    assert!(game.score() > 0);
}
