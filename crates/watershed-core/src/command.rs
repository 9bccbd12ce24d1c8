//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every state-store command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID linking this command to the event it produces.
    fn correlation_id(&self) -> Uuid;
}

/// Generates a time-ordered correlation ID for a new command.
#[must_use]
pub fn new_correlation_id() -> Uuid {
    Uuid::now_v7()
}
