//! Pauses, timed or player-controlled, with a follow-up action.

use std::time::Duration;

/// Work the loop performs when a timed pause runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseAction {
    /// Make Pac-Man and the ghosts visible again.
    ShowEntities,
    /// Put Pac-Man and the ghosts back on their start nodes.
    ResetLevel,
    /// Start over from level zero with full lives.
    RestartGame,
    /// Load the next level.
    NextLevel,
}

/// Pause flag plus at most one armed timer.
///
/// An armed timer fires its action exactly once, on the first update at or
/// after its duration. While a timer is armed the player cannot toggle the
/// pause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PauseController {
    paused: bool,
    player_initiated: bool,
    timer: Duration,
    armed: Option<(Duration, PauseAction)>,
}

impl PauseController {
    /// Creates an unpaused controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the simulation is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the current pause was requested by the player.
    #[must_use]
    pub const fn is_player_initiated(&self) -> bool {
        self.paused && self.player_initiated
    }

    /// Whether a timed pause is counting down.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Pauses until the player resumes. Cancels any armed timer.
    pub fn hold(&mut self) {
        self.paused = true;
        self.player_initiated = false;
        self.timer = Duration::ZERO;
        self.armed = None;
    }

    /// Unpauses immediately. Cancels any armed timer.
    pub fn resume(&mut self) {
        self.paused = false;
        self.player_initiated = false;
        self.timer = Duration::ZERO;
        self.armed = None;
    }

    /// Pauses for `duration`, then hands back `action`. Replaces any armed timer.
    pub fn arm(&mut self, duration: Duration, action: PauseAction) {
        self.paused = true;
        self.player_initiated = false;
        self.timer = Duration::ZERO;
        self.armed = Some((duration, action));
    }

    /// Flips a player pause. Returns the new state, or `None` while a timer is armed.
    pub fn toggle(&mut self) -> Option<bool> {
        if self.armed.is_some() {
            return None;
        }
        self.paused = !self.paused;
        self.player_initiated = self.paused;
        Some(self.paused)
    }

    /// Advances the armed timer; returns its action once it expires.
    pub fn update(&mut self, dt: Duration) -> Option<PauseAction> {
        let (duration, action) = self.armed?;
        self.timer += dt;
        if self.timer < duration {
            return None;
        }
        self.resume();
        Some(action)
    }
}
