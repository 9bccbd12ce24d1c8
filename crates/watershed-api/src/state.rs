//! Shared application state.

use std::sync::Arc;

use watershed_content::ContentCatalog;
use watershed_core::clock::Clock;
use watershed_core::error::DomainError;
use watershed_session::application::store::{GameStore, SharedSession};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Timestamps for session events.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Content served by the catalog routes.
    pub catalog: Arc<ContentCatalog>,
    /// The one game session this process hosts.
    pub session: SharedSession,
}

impl AppState {
    /// Create new application state with an empty session cell.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, catalog: Arc<ContentCatalog>) -> Self {
        Self {
            clock,
            catalog,
            session: SharedSession::new(),
        }
    }

    /// Create new application state with a fresh session installed.
    #[must_use]
    pub fn with_session(clock: Arc<dyn Clock + Send + Sync>, catalog: Arc<ContentCatalog>) -> Self {
        let session = SharedSession::initialized(GameStore::new(Arc::clone(&catalog)));
        Self {
            clock,
            catalog,
            session,
        }
    }

    /// Installs a fresh session over the catalog, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the session lock is poisoned.
    pub fn install_session(&self) -> Result<(), DomainError> {
        self.session.install(GameStore::new(Arc::clone(&self.catalog)))
    }
}
