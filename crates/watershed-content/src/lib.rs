//! Watershed simulation — Content Catalog.
//!
//! Immutable game content: stakeholder roles and their multipliers, the
//! scenarios of each act with their options, long-term strategies, and the
//! historical notes shown on the summary. The session crate consumes this
//! catalog and never mutates it.

pub mod application;
pub mod domain;

pub use domain::catalog::ContentCatalog;
pub use domain::delta::{Meter, MeterDelta};
pub use domain::roles::{RoleKey, RoleMultiplier, RoleProfile};
pub use domain::scenario::{Act, Scenario, ScenarioOption};
pub use domain::strategy::Strategy;
