//! Gravity driver - turns elapsed wall-clock time into gravity ticks.
//!
//! The driver accumulates elapsed milliseconds against the level-derived
//! interval and issues one `gravity_tick` per full interval. The period is
//! restarted whenever the level changes, and nothing is accumulated or fired
//! unless the session is running, so a paused or finished game never
//! receives ticks. Commands stay serialized: each tick is applied to
//! completion before the next is considered.

use crate::core::scoring::drop_interval_ms;
use crate::core::GameState;
use crate::types::RunState;

#[derive(Debug, Clone)]
pub struct GravityDriver {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl GravityDriver {
    /// Create a driver paced for the given level
    pub fn new(level: u32) -> Self {
        Self {
            interval_ms: drop_interval_ms(level),
            elapsed_ms: 0,
        }
    }

    /// Current tick interval (milliseconds)
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Account for elapsed time and issue any due gravity ticks.
    ///
    /// Returns the number of ticks applied. A long frame can owe more than
    /// one tick; run state and level are re-checked between ticks so a lock
    /// that ends the game or raises the level takes effect immediately.
    pub fn advance(&mut self, state: &mut GameState, elapsed_ms: u32) -> u32 {
        if state.run_state != RunState::Running {
            self.elapsed_ms = 0;
            return 0;
        }

        self.repace(state.level());
        self.elapsed_ms += elapsed_ms;

        let mut ticks = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            state.gravity_tick();
            ticks += 1;

            if state.run_state != RunState::Running {
                self.elapsed_ms = 0;
                break;
            }
            self.repace(state.level());
        }

        ticks
    }

    /// Restart the period when the level interval changed
    fn repace(&mut self, level: u32) {
        let interval = drop_interval_ms(level);
        if interval != self.interval_ms {
            self.interval_ms = interval;
            self.elapsed_ms = 0;
        }
    }
}
