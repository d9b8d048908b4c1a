//! Turns game loop frames into rendering scenes.

use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{GhostMode, PelletKind};
use maze_chase_rendering::{
    GhostLook, GhostPresentation, Hud, PacmanPresentation, PelletPresentation, Scene,
};
use maze_chase_system_game_loop::{Frame, PlayState, Presenter};
use maze_chase_world::{query, Maze};

const CHOMP_PERIOD: Duration = Duration::from_millis(250);
const DEATH_ANIMATION: Duration = Duration::from_millis(1500);

/// Keeps the latest frame as a [`Scene`].
#[derive(Clone, Debug)]
pub(crate) struct ScenePresenter {
    scene: Scene,
}

impl ScenePresenter {
    /// Presenter sized for `maze`, with its corridors laid out once.
    pub(crate) fn new(maze: &Maze) -> Self {
        let mut scene = Scene::empty(query::pixel_size(maze).as_vec2());
        scene.corridors = maze
            .graph()
            .edges()
            .into_iter()
            .map(|(from, to)| (from.as_vec2(), to.as_vec2()))
            .collect();
        Self { scene }
    }

    /// Scene of the most recent frame.
    pub(crate) const fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Presenter for ScenePresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        let scene = &mut self.scene;
        let pellets = frame.maze.pellets();
        let power_visible = pellets.power_visible();
        scene.pellets.clear();
        scene.pellets.extend(
            pellets
                .pellets()
                .iter()
                .filter(|pellet| power_visible || pellet.kind() != PelletKind::Power)
                .map(|pellet| PelletPresentation {
                    position: pellet.position().as_vec2(),
                    power: pellet.kind() == PelletKind::Power,
                }),
        );

        scene.pacman = frame.pacman.is_visible().then(|| {
            let animation = frame.pacman.animation();
            PacmanPresentation {
                position: frame.pacman.position().as_vec2(),
                heading: frame.pacman.heading(),
                mouth: chomp(animation),
                dying: (!frame.pacman.is_alive()).then(|| {
                    (animation.as_secs_f32() / DEATH_ANIMATION.as_secs_f32()).min(1.0)
                }),
            }
        });

        scene.ghosts.clear();
        scene.ghosts.extend(
            frame
                .ghosts
                .iter()
                .filter(|ghost| ghost.is_visible())
                .map(|ghost| GhostPresentation {
                    ghost: ghost.name(),
                    position: ghost.position().as_vec2(),
                    look: match ghost.mode() {
                        GhostMode::Freight => GhostLook::Frightened,
                        GhostMode::Spawn => GhostLook::Eyes,
                        GhostMode::Scatter | GhostMode::Chase => GhostLook::Normal,
                    },
                }),
        );

        scene.fruit = frame.fruit.map(|fruit| fruit.position().as_vec2());
        scene.flash = frame.background_flash;
        scene.hud = Hud {
            score: frame.score,
            lives: frame.lives,
            level: frame.level,
            captured_fruit: frame.captured_fruit.to_vec(),
            banner: match frame.state {
                PlayState::Paused if frame.pacman.is_alive() && frame.pacman.is_visible() => {
                    Some("PAUSED".to_owned())
                }
                PlayState::GameOver => Some("GAME OVER".to_owned()),
                _ => None,
            },
        };
    }
}

/// Mouth opening as a triangle wave over one chomp period.
fn chomp(animation: Duration) -> f32 {
    let period = CHOMP_PERIOD.as_secs_f32();
    let phase = (animation.as_secs_f32() % period) / period;
    1.0 - (phase * 2.0 - 1.0).abs()
}
