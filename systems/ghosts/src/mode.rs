//! Scatter/chase alternation with frightened and respawn overrides.

use std::time::Duration;

use maze_chase_core::GhostMode;

/// Time spent scattering before each chase.
pub const SCATTER_TIME: Duration = Duration::from_secs(7);

/// Time spent chasing before each scatter.
pub const CHASE_TIME: Duration = Duration::from_secs(20);

/// Time a ghost stays frightened after a power pellet.
pub const FREIGHT_TIME: Duration = Duration::from_secs(7);

/// Per-ghost mode state machine.
///
/// The scatter/chase cycle keeps running underneath freight and spawn, so a
/// ghost leaving either override rejoins whatever the cycle says now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeController {
    cycle: GhostMode,
    cycle_timer: Duration,
    current: GhostMode,
    freight_timer: Duration,
}

impl Default for ModeController {
    fn default() -> Self {
        Self {
            cycle: GhostMode::Scatter,
            cycle_timer: Duration::ZERO,
            current: GhostMode::Scatter,
            freight_timer: Duration::ZERO,
        }
    }
}

impl ModeController {
    /// Mode the ghost is in right now.
    #[must_use]
    pub const fn current(&self) -> GhostMode {
        self.current
    }

    /// Advances the timers. Returns `true` when a freight period just ended.
    pub fn update(&mut self, dt: Duration) -> bool {
        self.cycle_timer += dt;
        let limit = match self.cycle {
            GhostMode::Chase => CHASE_TIME,
            _ => SCATTER_TIME,
        };
        if self.cycle_timer >= limit {
            self.cycle_timer = Duration::ZERO;
            self.cycle = match self.cycle {
                GhostMode::Scatter => GhostMode::Chase,
                _ => GhostMode::Scatter,
            };
        }

        match self.current {
            GhostMode::Freight => {
                self.freight_timer += dt;
                if self.freight_timer >= FREIGHT_TIME {
                    self.current = self.cycle;
                    return true;
                }
            }
            GhostMode::Scatter | GhostMode::Chase => self.current = self.cycle,
            GhostMode::Spawn => {}
        }
        false
    }

    /// Enters or restarts freight. Ghosts returning to spawn are unaffected.
    pub fn start_freight(&mut self) -> bool {
        match self.current {
            GhostMode::Scatter | GhostMode::Chase | GhostMode::Freight => {
                self.freight_timer = Duration::ZERO;
                self.current = GhostMode::Freight;
                true
            }
            GhostMode::Spawn => false,
        }
    }

    /// Switches a frightened ghost to spawn. Returns `true` on success.
    pub fn start_spawn(&mut self) -> bool {
        if self.current == GhostMode::Freight {
            self.current = GhostMode::Spawn;
            true
        } else {
            false
        }
    }

    /// Leaves spawn and rejoins the cycle.
    pub fn finish_spawn(&mut self) {
        if self.current == GhostMode::Spawn {
            self.current = self.cycle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_and_chase_alternate() {
        let mut modes = ModeController::default();
        assert_eq!(modes.current(), GhostMode::Scatter);
        let _ = modes.update(Duration::from_millis(6_900));
        assert_eq!(modes.current(), GhostMode::Scatter);
        let _ = modes.update(Duration::from_millis(100));
        assert_eq!(modes.current(), GhostMode::Chase);
        let _ = modes.update(CHASE_TIME);
        assert_eq!(modes.current(), GhostMode::Scatter);
    }

    #[test]
    fn freight_lasts_its_period_then_rejoins_the_cycle() {
        let mut modes = ModeController::default();
        assert!(modes.start_freight());
        assert!(!modes.update(Duration::from_secs(6)));
        assert_eq!(modes.current(), GhostMode::Freight);
        assert!(modes.update(Duration::from_secs(1)));
        assert_eq!(modes.current(), GhostMode::Chase);
    }

    #[test]
    fn second_power_pellet_restarts_freight() {
        let mut modes = ModeController::default();
        assert!(modes.start_freight());
        let _ = modes.update(Duration::from_secs(5));
        assert!(modes.start_freight());
        assert!(!modes.update(Duration::from_secs(5)));
        assert_eq!(modes.current(), GhostMode::Freight);
    }

    #[test]
    fn only_frightened_ghosts_can_respawn() {
        let mut modes = ModeController::default();
        assert!(!modes.start_spawn());
        assert!(modes.start_freight());
        assert!(modes.start_spawn());
        assert_eq!(modes.current(), GhostMode::Spawn);
        assert!(!modes.start_freight());
        let _ = modes.update(FREIGHT_TIME);
        assert_eq!(modes.current(), GhostMode::Spawn);
        modes.finish_spawn();
        assert_eq!(modes.current(), GhostMode::Chase);
    }
}
