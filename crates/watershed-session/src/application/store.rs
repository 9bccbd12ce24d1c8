//! The game store and the shared session cell.
//!
//! `GameStore` owns the current snapshot. Transitions replace it wholesale
//! and publish the new `Arc<GameState>` on a watch channel, so observers
//! only ever see complete snapshots.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::error;
use uuid::Uuid;
use watershed_content::ContentCatalog;
use watershed_core::clock::Clock;
use watershed_core::error::DomainError;
use watershed_core::event::EventMetadata;

use crate::domain::events::{SessionEvent, SessionEventKind};
use crate::domain::state::GameState;

/// Single-writer owner of one play session.
#[derive(Debug)]
pub struct GameStore {
    session_id: Uuid,
    catalog: Arc<ContentCatalog>,
    state: Arc<GameState>,
    sequence: i64,
    snapshots: watch::Sender<Arc<GameState>>,
}

impl GameStore {
    /// Creates a store holding the initial state.
    #[must_use]
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        let state = Arc::new(GameState::initial());
        let (snapshots, _) = watch::channel(Arc::clone(&state));
        Self {
            session_id: Uuid::new_v4(),
            catalog,
            state,
            sequence: 0,
            snapshots,
        }
    }

    /// Identifier of the current play session. Changes on role selection
    /// and reset.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Sequence number of the last event in this session; 0 before any.
    #[must_use]
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// The catalog this session plays against.
    #[must_use]
    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<ContentCatalog> {
        Arc::clone(&self.catalog)
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Receives every snapshot published from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.snapshots.subscribe()
    }

    /// Installs `state` as the new snapshot and stamps the event for it.
    ///
    /// Role selection and reset start a new session: the session id is
    /// reminted and the sequence starts over.
    pub(crate) fn commit(
        &mut self,
        state: GameState,
        kind: SessionEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> SessionEvent {
        if matches!(
            kind,
            SessionEventKind::RoleSelected(_) | SessionEventKind::SessionReset
        ) {
            self.session_id = Uuid::new_v4();
            self.sequence = 0;
        }
        self.sequence += 1;
        self.state = Arc::new(state);
        self.snapshots.send_replace(Arc::clone(&self.state));

        SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.session_id,
                sequence_number: self.sequence,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        }
    }
}

/// A store that may not exist yet, shared between request handlers.
///
/// Every access goes through one mutex, which serializes transitions.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Option<GameStore>>>,
}

impl SharedSession {
    /// Creates an empty cell. Any access fails until [`install`](Self::install).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell already holding `store`.
    #[must_use]
    pub fn initialized(store: GameStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(store))),
        }
    }

    /// Puts `store` in the cell, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn install(&self, store: GameStore) -> Result<(), DomainError> {
        let mut guard = self.lock()?;
        *guard = Some(store);
        Ok(())
    }

    /// Whether a store has been installed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lock().is_ok_and(|guard| guard.is_some())
    }

    /// Runs `f` against the installed store while holding the lock.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotInitialized` if nothing has been
    /// installed, `DomainError::Infrastructure` if the lock is poisoned, or
    /// whatever `f` returns.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut GameStore) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut guard = self.lock()?;
        match guard.as_mut() {
            Some(store) => f(store),
            None => {
                error!("game session accessed before a store was installed");
                Err(DomainError::SessionNotInitialized)
            }
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<GameStore>>, DomainError> {
        self.inner
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("session lock poisoned: {e}")))
    }
}
