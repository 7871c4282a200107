//! Scoring: level points and the memory IQ estimate

mod engine;

#[cfg(test)]
mod property_tests;

pub use engine::*;
