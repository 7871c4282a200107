//! Number Recall Core - session engine for a timed memorization game
//!
//! The player memorizes a set of numbers, then picks them back out of a
//! larger board before the recall timer runs out. This crate owns the game
//! rules and timers; rendering is left to a collaborator that displays
//! [`session::Snapshot`]s and forwards clicks.
//!
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod error;
pub mod pool;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;

#[cfg(feature = "python")]
mod python;

pub use crate::config::GameConfig;
pub use crate::error::{RecallError, Result};
pub use crate::runtime::{SessionRunner, SimulatedDriver};
pub use crate::session::{GameSession, Phase, Snapshot};
