//! Session timers: the phase countdown and the transition delay

mod countdown;
mod delay;

#[cfg(test)]
mod property_tests;

pub use countdown::*;
pub use delay::*;

/// Identifies one activation of a timer.
///
/// Drivers echo the token back with every tick or firing so the session can
/// discard events from activations it has already cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);
