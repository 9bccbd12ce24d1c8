//! Content types for the watershed catalog.

pub mod catalog;
pub mod delta;
pub mod roles;
pub mod scenario;
pub mod strategy;
