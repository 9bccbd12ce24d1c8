//! Session state, transitions, commands, and events.

pub mod commands;
pub mod events;
pub mod meters;
pub mod state;
pub mod transitions;
