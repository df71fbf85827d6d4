//! Session state and establishment.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// An established user session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub capabilities: HashSet<String>,
}

impl Session {
    /// Session with the baseline capability every authenticated user holds.
    #[must_use]
    pub fn basic(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            capabilities: HashSet::from(["basic".to_owned()]),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session establishment failed: {0}")]
    Establish(String),
}

/// Performs the actual session-establish call (backend verification of the
/// host platform's init payload).
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn establish(&self) -> Result<Session, SessionError>;
}

/// Owns the current session; consumers read snapshots, all mutation goes
/// through methods.
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    current: Mutex<Option<Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn is_established(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Snapshot of the current session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.current.lock().clone()
    }

    /// Whether the current session holds `capability`. Always false while
    /// unauthenticated.
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|s| s.capabilities.contains(capability))
    }

    /// Establish a session if none exists. Idempotent: an established
    /// session is kept as-is.
    ///
    /// # Errors
    /// Propagates the backend failure; the store stays unauthenticated.
    pub async fn establish(&self) -> Result<(), SessionError> {
        if self.is_established() {
            return Ok(());
        }
        let session = self.backend.establish().await?;
        tracing::debug!(user_id = %session.user_id, "session established");
        *self.current.lock() = Some(session);
        Ok(())
    }

    /// Drop the current session.
    pub fn clear(&self) {
        *self.current.lock() = None;
    }
}
