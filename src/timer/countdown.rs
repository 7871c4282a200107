//! Phase countdown with one-second granularity
//!
//! The countdown never reads a clock. A driver delivers one `tick` per
//! elapsed second, tagged with the token returned by `start`; ticks carrying
//! any other token are reported as stale and change nothing.

use super::TimerToken;

/// Outcome of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Token is not the running activation
    Stale,
    /// Still running with this many seconds left
    Running(u32),
    /// Reached zero; reported once per activation
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    generation: u64,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a countdown from `seconds`, replacing any running one.
    ///
    /// The starting value is visible through `remaining` immediately.
    pub fn start(&mut self, seconds: u32) -> TimerToken {
        self.generation += 1;
        self.remaining = seconds;
        self.running = true;
        TimerToken(self.generation)
    }

    /// Stop the countdown. Safe to call when idle or twice.
    #[inline]
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Deliver one elapsed second
    pub fn tick(&mut self, token: TimerToken) -> CountdownStep {
        if !self.running || token.0 != self.generation {
            return CountdownStep::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownStep::Expired
        } else {
            CountdownStep::Running(self.remaining)
        }
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the current activation, if running
    #[inline]
    pub fn token(&self) -> Option<TimerToken> {
        self.running.then_some(TimerToken(self.generation))
    }
}
