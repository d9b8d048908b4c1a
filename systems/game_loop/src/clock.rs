//! Tick cadence strategies.

use std::time::{Duration, Instant};

/// Default ticks per second for every strategy.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// How a game loop paces its ticks and sizes their `dt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockStrategy {
    /// One tick per step, paced to at most `tick_rate` per second of wall
    /// time; `dt` is the measured time since the previous tick.
    WallClockCapped {
        /// Ceiling on ticks per second.
        tick_rate: u32,
    },
    /// One tick per step with a constant `dt` of `1 / tick_rate`; never blocks.
    FixedStep {
        /// Simulated ticks per second.
        tick_rate: u32,
    },
    /// `batch` fixed ticks per step; never blocks.
    BatchedFixedStep {
        /// Simulated ticks per second.
        tick_rate: u32,
        /// Ticks run per step.
        batch: u32,
    },
}

impl ClockStrategy {
    fn tick_rate(self) -> u32 {
        match self {
            ClockStrategy::WallClockCapped { tick_rate }
            | ClockStrategy::FixedStep { tick_rate }
            | ClockStrategy::BatchedFixedStep { tick_rate, .. } => tick_rate.max(1),
        }
    }

    /// Length of one tick at the strategy's nominal rate.
    #[must_use]
    pub fn frame(self) -> Duration {
        Duration::from_secs(1) / self.tick_rate()
    }
}

/// Source of monotonic time that can also block.
pub trait TimeSource {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Blocks for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Real time backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Clone, Copy, Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    /// Starts measuring from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated time that only moves when slept on or advanced explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualTimeSource {
    now: Duration,
}

impl ManualTimeSource {
    /// Starts at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward, as if work had been done.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}

/// Produces the `dt` of each tick according to a [`ClockStrategy`].
#[derive(Clone, Debug)]
pub struct SimulationClock<T = SystemTimeSource> {
    strategy: ClockStrategy,
    source: T,
    last: Duration,
}

impl<T: TimeSource> SimulationClock<T> {
    /// Creates a clock that starts timing now.
    pub fn new(strategy: ClockStrategy, source: T) -> Self {
        let last = source.now();
        Self {
            strategy,
            source,
            last,
        }
    }

    /// Strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> ClockStrategy {
        self.strategy
    }

    /// Borrows the time source.
    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    /// Number of ticks one step runs.
    #[must_use]
    pub fn ticks_per_step(&self) -> u32 {
        match self.strategy {
            ClockStrategy::BatchedFixedStep { batch, .. } => batch.max(1),
            _ => 1,
        }
    }

    /// `dt` of the next tick. The wall-clock strategy may block here.
    pub fn next_dt(&mut self) -> Duration {
        let frame = self.strategy.frame();
        match self.strategy {
            ClockStrategy::WallClockCapped { .. } => {
                let elapsed = self.source.now().saturating_sub(self.last);
                if elapsed < frame {
                    self.source.sleep(frame - elapsed);
                }
                let now = self.source.now();
                let dt = now.saturating_sub(self.last);
                self.last = now;
                dt
            }
            ClockStrategy::FixedStep { .. } | ClockStrategy::BatchedFixedStep { .. } => frame,
        }
    }
}

impl SimulationClock<SystemTimeSource> {
    /// Clock on real time.
    #[must_use]
    pub fn system(strategy: ClockStrategy) -> Self {
        Self::new(strategy, SystemTimeSource::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_strategies_hand_out_constant_dt() {
        let mut fixed = SimulationClock::new(
            ClockStrategy::FixedStep { tick_rate: 60 },
            ManualTimeSource::new(),
        );
        let mut batched = SimulationClock::new(
            ClockStrategy::BatchedFixedStep {
                tick_rate: 60,
                batch: 8,
            },
            ManualTimeSource::new(),
        );
        let frame = Duration::from_secs(1) / 60;

        assert_eq!(fixed.next_dt(), frame);
        assert_eq!(fixed.next_dt(), frame);
        assert_eq!(batched.next_dt(), frame);
        assert_eq!(fixed.ticks_per_step(), 1);
        assert_eq!(batched.ticks_per_step(), 8);
        assert_eq!(fixed.source_mut().now(), Duration::ZERO);
    }

    #[test]
    fn wall_clock_sleeps_up_to_the_frame() {
        let mut clock = SimulationClock::new(
            ClockStrategy::WallClockCapped { tick_rate: 60 },
            ManualTimeSource::new(),
        );
        let frame = Duration::from_secs(1) / 60;

        assert_eq!(clock.next_dt(), frame);
        clock.source_mut().advance(Duration::from_millis(5));
        assert_eq!(clock.next_dt(), frame);
        assert_eq!(clock.source_mut().now(), frame * 2);
    }

    #[test]
    fn wall_clock_reports_slow_frames_as_they_happened() {
        let mut clock = SimulationClock::new(
            ClockStrategy::WallClockCapped { tick_rate: 60 },
            ManualTimeSource::new(),
        );
        clock.source_mut().advance(Duration::from_millis(50));
        assert_eq!(clock.next_dt(), Duration::from_millis(50));
    }

    #[test]
    fn zero_tick_rate_is_clamped() {
        let clock = SimulationClock::new(
            ClockStrategy::BatchedFixedStep {
                tick_rate: 0,
                batch: 0,
            },
            ManualTimeSource::new(),
        );
        assert_eq!(clock.strategy().frame(), Duration::from_secs(1));
        assert_eq!(clock.ticks_per_step(), 1);
    }
}
