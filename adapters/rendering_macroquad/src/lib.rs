#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Everything is drawn from primitives; the adapter ships no textures.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use maze_chase_core::Direction;
use maze_chase_rendering::{
    palette, Color, FrameControl, FrameInput, GhostLook, GhostPresentation, Hud,
    PacmanPresentation, PelletPresentation, Presentation, RenderingBackend, Scene,
};
use std::{f32::consts::FRAC_PI_4, time::Duration};

const PACMAN_RADIUS: f32 = 7.0;
const GHOST_RADIUS: f32 = 7.0;
const PELLET_RADIUS: f32 = 1.5;
const POWER_PELLET_RADIUS: f32 = 4.0;
const FRUIT_RADIUS: f32 = 5.0;
const CORRIDOR_WIDTH: f32 = 14.0;
const HUD_FONT_SIZE: f32 = 20.0;

/// Keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardSnapshot {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    pause: bool,
    escape: bool,
    q: bool,
}

impl KeyboardSnapshot {
    fn poll() -> Self {
        Self {
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
            pause: is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Space),
            escape: is_key_pressed(KeyCode::Escape),
            q: is_key_pressed(KeyCode::Q),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            toggle_pause: self.pause,
            quit: self.escape || self.q,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let window_size = presentation.window_size();
        let Presentation {
            window_title,
            clear_color,
            scene,
            ..
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x.round() as i32,
            window_height: window_size.y.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                let input = KeyboardSnapshot::poll().frame_input();
                let dt = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if update_scene(dt, input, &mut scene) == FrameControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::fit(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_corridors(&scene, &metrics);
                draw_pellets(&scene.pellets, &metrics);
                if let Some(fruit) = scene.fruit {
                    draw_circle(
                        metrics.to_screen(fruit),
                        FRUIT_RADIUS * metrics.scale,
                        palette::FRUIT,
                    );
                }
                for ghost in &scene.ghosts {
                    draw_ghost(ghost, &metrics);
                }
                if let Some(pacman) = &scene.pacman {
                    draw_pacman(pacman, &metrics, clear_color);
                }
                draw_hud(&scene.hud, &scene, &metrics);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps maze pixels onto the window, preserving the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn fit(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let height = scene.total_height();
        let scale = if scene.size.x <= f32::EPSILON || height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / scene.size.x).min(screen_height / height)
        };
        let offset = Vec2::new(
            ((screen_width - scene.size.x * scale) * 0.5).max(0.0),
            ((screen_height - height * scale) * 0.5).max(0.0),
        );
        Self { scale, offset }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }
}

/// Corners of the wedge cut out of Pac-Man for his mouth.
fn mouth_wedge(centre: Vec2, radius: f32, heading: Direction, opening: f32) -> [Vec2; 3] {
    let facing = match heading {
        Direction::Up => Vec2::new(0.0, -1.0),
        Direction::Down => Vec2::new(0.0, 1.0),
        Direction::Left => Vec2::new(-1.0, 0.0),
        Direction::Right | Direction::Stop => Vec2::new(1.0, 0.0),
    };
    let half_angle = FRAC_PI_4 * opening.clamp(0.0, 1.0);
    let reach = radius * 1.5;
    let upper = Vec2::from_angle(half_angle).rotate(facing) * reach;
    let lower = Vec2::from_angle(-half_angle).rotate(facing) * reach;
    [centre, centre + upper, centre + lower]
}

fn draw_corridors(scene: &Scene, metrics: &SceneMetrics) {
    let color = scene.corridor_color();
    let width = CORRIDOR_WIDTH * metrics.scale;
    for (from, to) in &scene.corridors {
        let from = metrics.to_screen(*from);
        let to = metrics.to_screen(*to);
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, width, to_macroquad_color(color));
        draw_circle(from, width * 0.5, color);
        draw_circle(to, width * 0.5, color);
    }
}

fn draw_pellets(pellets: &[PelletPresentation], metrics: &SceneMetrics) {
    for pellet in pellets {
        let radius = if pellet.power {
            POWER_PELLET_RADIUS
        } else {
            PELLET_RADIUS
        };
        draw_circle(metrics.to_screen(pellet.position), radius * metrics.scale, palette::PELLET);
    }
}

fn draw_pacman(pacman: &PacmanPresentation, metrics: &SceneMetrics, background: Color) {
    let centre = metrics.to_screen(pacman.position);
    let shrink = pacman.dying.map_or(1.0, |progress| 1.0 - progress.clamp(0.0, 1.0));
    let radius = PACMAN_RADIUS * metrics.scale * shrink;
    if radius <= f32::EPSILON {
        return;
    }
    draw_circle(centre, radius, palette::PACMAN);

    let opening = if pacman.dying.is_some() { 1.0 } else { pacman.mouth };
    let [tip, upper, lower] = mouth_wedge(centre, radius, pacman.heading, opening);
    macroquad::shapes::draw_triangle(
        to_macroquad_vec(tip),
        to_macroquad_vec(upper),
        to_macroquad_vec(lower),
        to_macroquad_color(background),
    );
}

fn draw_ghost(ghost: &GhostPresentation, metrics: &SceneMetrics) {
    let centre = metrics.to_screen(ghost.position);
    let radius = GHOST_RADIUS * metrics.scale;
    if ghost.look != GhostLook::Eyes {
        let body = ghost.color();
        draw_circle(centre, radius, body);
        macroquad::shapes::draw_rectangle(
            centre.x - radius,
            centre.y,
            radius * 2.0,
            radius,
            to_macroquad_color(body),
        );
    }
    let eye = radius * 0.3;
    for side in [-1.0, 1.0] {
        let position = centre + Vec2::new(side * radius * 0.4, -radius * 0.2);
        draw_circle(position, eye, palette::EYES);
    }
}

fn draw_hud(hud: &Hud, scene: &Scene, metrics: &SceneMetrics) {
    let font_size = HUD_FONT_SIZE * metrics.scale;
    let baseline = metrics.to_screen(Vec2::new(8.0, scene.size.y + Scene::HUD_HEIGHT * 0.6));
    let fruit = if hud.captured_fruit.is_empty() {
        String::new()
    } else {
        format!("  FRUIT {}", hud.captured_fruit.len())
    };
    let line = format!(
        "SCORE {}  LIVES {}  LEVEL {}{}",
        hud.score,
        hud.lives,
        hud.level + 1,
        fruit
    );
    let _ = macroquad::text::draw_text(
        &line,
        baseline.x,
        baseline.y,
        font_size,
        to_macroquad_color(palette::TEXT),
    );

    if let Some(banner) = &hud.banner {
        let centre = metrics.to_screen(scene.size * 0.5);
        let _ = macroquad::text::draw_text(
            banner,
            centre.x - banner.len() as f32 * font_size * 0.25,
            centre.y,
            font_size * 1.5,
            to_macroquad_color(palette::PACMAN),
        );
    }
}

fn draw_circle(centre: Vec2, radius: f32, color: Color) {
    macroquad::shapes::draw_circle(centre.x, centre.y, radius, to_macroquad_color(color));
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
