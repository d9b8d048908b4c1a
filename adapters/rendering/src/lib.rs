#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.
//!
//! Scenes are plain data in maze pixel space. Backends scale them to the
//! window, draw them and report keyboard state back as [`FrameInput`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{Actor, Direction};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Colors used by every backend.
pub mod palette {
    use super::Color;
    use maze_chase_core::Actor;

    /// Window background.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);
    /// Maze corridors.
    pub const WALL: Color = Color::from_rgb_u8(33, 33, 222);
    /// Corridor color while the cleared-level flash is lit.
    pub const WALL_FLASH: Color = Color::from_rgb_u8(255, 255, 255);
    /// Pellets.
    pub const PELLET: Color = Color::from_rgb_u8(255, 184, 151);
    /// Pac-Man.
    pub const PACMAN: Color = Color::from_rgb_u8(255, 255, 0);
    /// Frightened ghosts.
    pub const FRIGHTENED: Color = Color::from_rgb_u8(33, 33, 255);
    /// Ghost eyes.
    pub const EYES: Color = Color::from_rgb_u8(255, 255, 255);
    /// Fruit.
    pub const FRUIT: Color = Color::from_rgb_u8(222, 0, 0);
    /// HUD text.
    pub const TEXT: Color = Color::from_rgb_u8(255, 255, 255);

    /// Body color of a ghost in its normal modes.
    #[must_use]
    pub const fn ghost(actor: Actor) -> Color {
        match actor {
            Actor::Blinky => Color::from_rgb_u8(255, 0, 0),
            Actor::Pinky => Color::from_rgb_u8(255, 184, 255),
            Actor::Inky => Color::from_rgb_u8(0, 255, 255),
            Actor::Clyde => Color::from_rgb_u8(255, 184, 82),
            Actor::Pacman | Actor::Fruit => PACMAN,
        }
    }
}

/// Keyboard snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Up arrow held.
    pub up: bool,
    /// Down arrow held.
    pub down: bool,
    /// Left arrow held.
    pub left: bool,
    /// Right arrow held.
    pub right: bool,
    /// Pause key pressed on this frame.
    pub toggle_pause: bool,
    /// Quit key pressed on this frame or the window asked to close.
    pub quit: bool,
}

/// Whether the backend should keep running after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Draw the scene and continue.
    Continue,
    /// Close the window.
    Exit,
}

/// A pellet to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PelletPresentation {
    /// Centre in maze pixels.
    pub position: Vec2,
    /// Power pellets are drawn larger.
    pub power: bool,
}

/// Pac-Man as drawn on this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacmanPresentation {
    /// Centre in maze pixels.
    pub position: Vec2,
    /// Heading the mouth faces; `Stop` faces right.
    pub heading: Direction,
    /// Mouth opening in `0.0..=1.0`.
    pub mouth: f32,
    /// Progress of the death animation in `0.0..=1.0`, if dying.
    pub dying: Option<f32>,
}

/// How a ghost is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostLook {
    /// Body in the ghost's own color.
    Normal,
    /// Blue body.
    Frightened,
    /// Only the eyes, travelling home.
    Eyes,
}

/// A ghost to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostPresentation {
    /// Which ghost.
    pub ghost: Actor,
    /// Centre in maze pixels.
    pub position: Vec2,
    /// Body style.
    pub look: GhostLook,
}

impl GhostPresentation {
    /// Body color for the ghost's look.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self.look {
            GhostLook::Normal => palette::ghost(self.ghost),
            GhostLook::Frightened => palette::FRIGHTENED,
            GhostLook::Eyes => palette::EYES,
        }
    }
}

/// Text and counters drawn below the maze.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Score.
    pub score: u32,
    /// Lives left.
    pub lives: u32,
    /// Zero-based level.
    pub level: u32,
    /// Levels whose fruit was collected.
    pub captured_fruit: Vec<u32>,
    /// Banner such as "PAUSED", if any.
    pub banner: Option<String>,
}

/// Scene description in maze pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze width and height in pixels.
    pub size: Vec2,
    /// Corridors as node-to-node segments.
    pub corridors: Vec<(Vec2, Vec2)>,
    /// Pellets still on the board. Power pellets are omitted while blinked off.
    pub pellets: Vec<PelletPresentation>,
    /// Pac-Man, when visible.
    pub pacman: Option<PacmanPresentation>,
    /// Visible ghosts.
    pub ghosts: Vec<GhostPresentation>,
    /// Fruit, when out.
    pub fruit: Option<Vec2>,
    /// Counters and banner.
    pub hud: Hud,
    /// Whether corridors use the flash color this frame.
    pub flash: bool,
}

impl Scene {
    /// Scene with nothing but its size.
    #[must_use]
    pub fn empty(size: Vec2) -> Self {
        Self {
            size,
            corridors: Vec::new(),
            pellets: Vec::new(),
            pacman: None,
            ghosts: Vec::new(),
            fruit: None,
            hud: Hud::default(),
            flash: false,
        }
    }

    /// Height reserved for the HUD below the maze.
    pub const HUD_HEIGHT: f32 = 48.0;

    /// Height of the entire scene including the HUD strip.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.size.y + Self::HUD_HEIGHT
    }

    /// Corridor color for this frame.
    #[must_use]
    pub const fn corridor_color(&self) -> Color {
        if self.flash {
            palette::WALL_FLASH
        } else {
            palette::WALL
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Window pixels per maze pixel at startup.
    pub scale: f32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        scale: f32,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RenderingError::InvalidScale { scale });
        }
        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            scale,
            scene,
        })
    }

    /// Initial window size in pixels.
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.scene.size.x, self.scene.total_height()) * self.scale
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the window closes or `update_scene`
    /// returns [`FrameControl::Exit`].
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the input captured by the adapter, and rewrites the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The window scale must be a positive finite number.
    InvalidScale {
        /// Provided scale that failed validation.
        scale: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale { scale } => {
                write!(f, "window scale must be positive (received {scale})")
            }
        }
    }
}

impl Error for RenderingError {}
