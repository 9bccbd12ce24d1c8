//! Watershed simulation — Game State Store.
//!
//! Owns the single mutable play session: role, the three meters, the
//! act/scenario cursor, the choice log, and the strategy selection. Every
//! transition is a pure function from the previous snapshot to the next;
//! the store swaps snapshots wholesale so observers never see a partially
//! applied change.

pub mod application;
pub mod domain;
