//! Store, command handlers, and read-only views.

pub mod command_handlers;
pub mod query_handlers;
pub mod store;
