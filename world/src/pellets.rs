//! Pellets scattered along the maze paths.

use std::time::Duration;

use maze_chase_core::{collide, Circle, DVec2, PelletKind};

/// Collision radius shared by both pellet kinds.
pub const PELLET_COLLIDE_RADIUS: f64 = 2.0;

/// Points awarded for a regular pellet.
pub const PELLET_POINTS: u32 = 10;

/// Points awarded for a power pellet.
pub const POWER_PELLET_POINTS: u32 = 50;

const POWER_FLASH_PERIOD: Duration = Duration::from_millis(200);

/// Single collectible dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pellet {
    position: DVec2,
    kind: PelletKind,
}

impl Pellet {
    /// Creates a pellet at the provided pixel position.
    #[must_use]
    pub const fn new(position: DVec2, kind: PelletKind) -> Self {
        Self { position, kind }
    }

    /// Pixel position of the pellet.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Kind of pellet.
    #[must_use]
    pub const fn kind(&self) -> PelletKind {
        self.kind
    }

    /// Points awarded when the pellet is eaten.
    #[must_use]
    pub const fn points(&self) -> u32 {
        match self.kind {
            PelletKind::Regular => PELLET_POINTS,
            PelletKind::Power => POWER_PELLET_POINTS,
        }
    }
}

impl Circle for Pellet {
    fn centre(&self) -> DVec2 {
        self.position
    }

    fn collide_radius(&self) -> f64 {
        PELLET_COLLIDE_RADIUS
    }
}

/// Ordered pellets remaining in the current level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PelletCollection {
    pellets: Vec<Pellet>,
    eaten: usize,
    flash_timer: Duration,
    power_visible: bool,
}

impl PelletCollection {
    /// Creates a collection with nothing eaten yet.
    #[must_use]
    pub fn new(pellets: Vec<Pellet>) -> Self {
        Self {
            pellets,
            eaten: 0,
            flash_timer: Duration::ZERO,
            power_visible: true,
        }
    }

    /// Pellets still in the maze, in layout order.
    #[must_use]
    pub fn pellets(&self) -> &[Pellet] {
        &self.pellets
    }

    /// Number of pellets still in the maze.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pellets.len()
    }

    /// Reports whether every pellet has been eaten.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty()
    }

    /// Number of pellets eaten since the collection was built.
    #[must_use]
    pub const fn eaten(&self) -> usize {
        self.eaten
    }

    /// Index of the first pellet overlapping `eater`, in collection order.
    #[must_use]
    pub fn first_colliding<C: Circle + ?Sized>(&self, eater: &C) -> Option<usize> {
        self.pellets.iter().position(|pellet| collide(eater, pellet))
    }

    /// Removes the pellet at `index` and counts it as eaten.
    pub fn remove(&mut self, index: usize) -> Option<Pellet> {
        if index >= self.pellets.len() {
            return None;
        }
        self.eaten += 1;
        Some(self.pellets.remove(index))
    }

    /// Position of the remaining pellet closest to `position`.
    #[must_use]
    pub fn nearest(&self, position: DVec2) -> Option<DVec2> {
        self.pellets
            .iter()
            .map(Pellet::position)
            .min_by(|a, b| {
                a.distance_squared(position)
                    .total_cmp(&b.distance_squared(position))
            })
    }

    /// Advances the power pellet blink.
    pub fn update(&mut self, dt: Duration) {
        self.flash_timer += dt;
        while self.flash_timer >= POWER_FLASH_PERIOD {
            self.flash_timer -= POWER_FLASH_PERIOD;
            self.power_visible = !self.power_visible;
        }
    }

    /// Whether power pellets are in the visible half of their blink.
    #[must_use]
    pub const fn power_visible(&self) -> bool {
        self.power_visible
    }
}
