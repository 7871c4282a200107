//! Game session: state, notices and the phase/timer state machine

mod machine;
mod notice;
mod state;

#[cfg(test)]
mod property_tests;

pub use machine::*;
pub use notice::*;
pub use state::*;
