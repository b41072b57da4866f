#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One discrete step of simulated time.
///
/// Engines never read a clock; the owning agent builds one context per external time advance and
/// hands it to exactly one engine tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// Context for the following step with the same time step.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            dt_seconds: self.dt_seconds,
        }
    }

    /// Elapsed simulated seconds, clamped so a bogus negative step never rewinds timers.
    pub fn dt(&self) -> f32 {
        self.dt_seconds.max(0.0)
    }
}

impl Default for TickContext {
    fn default() -> Self {
        Self {
            tick: 0,
            dt_seconds: 0.0,
        }
    }
}
