//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Player-input edge cases (unknown option, full strategy slate, repeated
/// finalization) are not errors; the store ignores them. This type covers
/// malformed external input and wiring mistakes.
#[derive(Debug, Error)]
pub enum DomainError {
    /// External input failed validation (unknown role key, malformed catalog).
    #[error("validation error: {0}")]
    Validation(String),

    /// A catalog lookup named something that does not exist.
    #[error("{kind} not found: {id}")]
    ContentNotFound {
        /// What was looked up (`"role"`, `"scenario"`, `"strategy"`).
        kind: &'static str,
        /// The identifier that was requested.
        id: String,
    },

    /// The shared session was used before a store was installed.
    #[error("game session used before initialization")]
    SessionNotInitialized,

    /// I/O or parse failure while loading content.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a [`DomainError::ContentNotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::ContentNotFound {
            kind,
            id: id.into(),
        }
    }
}
