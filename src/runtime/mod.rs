//! Drivers that turn session effects into timer events
//!
//! `SimulatedDriver` steps a virtual clock; `SessionRunner` runs a session
//! on a tokio task in wall-clock time.

mod runner;
mod simulated;

pub use runner::*;
pub use simulated::*;
