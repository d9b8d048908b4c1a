//! Windowed games: a person playing, or a network being watched.

use anyhow::Result;
use maze_chase_core::Event;
use maze_chase_rendering::{palette, FrameControl, FrameInput, Presentation, RenderingBackend};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_system_control::{DirectionPolicy, HumanInput, KeyState};
use maze_chase_system_game_loop::{GameLoop, GameMode, SimulationClock, TickInput};
use maze_chase_world::MazeBlueprint;

use crate::config::Config;
use crate::presenter::ScenePresenter;

/// Window pixels per maze pixel.
pub(crate) const WINDOW_SCALE: f32 = 1.5;

/// Opens the classic maze for a person at the keyboard.
pub(crate) fn play(config: &Config) -> Result<()> {
    let game = GameLoop::new(
        &MazeBlueprint::classic(),
        GameMode::Interactive,
        HumanInput::default(),
        SimulationClock::system(config.wall_clock()),
        config.interactive(),
    )?;
    tracing::info!("press P or Space to start");
    watch(game, "Maze Chase", |policy: &mut HumanInput, input| {
        policy.set_keys(keys(input));
    })
}

/// Arrow keys of a frame as policy input.
pub(crate) const fn keys(input: &FrameInput) -> KeyState {
    KeyState {
        up: input.up,
        down: input.down,
        left: input.left,
        right: input.right,
    }
}

/// Runs `game` in a window, one step per drawn frame, until it ends or the
/// window is closed.
pub(crate) fn watch<P, F>(mut game: GameLoop<P>, title: &str, mut on_input: F) -> Result<()>
where
    P: DirectionPolicy + 'static,
    F: FnMut(&mut P, &FrameInput) + 'static,
{
    let mut presenter = ScenePresenter::new(game.maze());
    let presentation = Presentation::new(
        title,
        palette::BACKGROUND,
        WINDOW_SCALE,
        presenter.scene().clone(),
    )?;
    let mut events = Vec::new();

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |_dt, input, scene| {
            on_input(game.policy_mut(), &input);
            events.clear();
            let _ = game.step(
                TickInput {
                    toggle_pause: input.toggle_pause,
                    quit: input.quit,
                },
                &mut presenter,
                &mut events,
            );
            log_events(&events);
            scene.clone_from(presenter.scene());

            if game.is_over() {
                FrameControl::Exit
            } else {
                FrameControl::Continue
            }
        })
}

/// Reports notable events of a step.
pub(crate) fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::LevelCompleted { level } => tracing::info!(level, "level completed"),
            Event::GameRestarted => tracing::info!("out of lives; starting over"),
            Event::FruitCollected { points } => tracing::debug!(points, "fruit collected"),
            Event::GhostEaten { ghost, points } => {
                tracing::debug!(?ghost, points, "ghost eaten");
            }
            _ => tracing::trace!(?event, "game event"),
        }
    }
}
