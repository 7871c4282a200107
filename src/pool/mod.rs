//! Number pool generation and sampling

mod generator;

#[cfg(test)]
mod property_tests;

pub use generator::*;
