//! Shared test fixtures and utilities for the watershed simulation.

mod assert;
mod catalog;
mod clock;

pub use assert::{FLOAT_TOLERANCE, assert_close};
pub use catalog::{FIXTURE_CATALOG_YAML, fixture_catalog};
pub use clock::FixedClock;
