//! Client-side session state that survives restarts.
//!
//! The backend keeps authentication in HTTP-only cookies; what the console
//! persists on its side is only the cached current user and the ids/emails
//! carried between the steps of the signup and password-reset flows.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::Navigator;
use crate::domain::User;
use crate::errors::SessionError;

/// Persisted part of the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub current_user: Option<User>,

    /// User id awaiting OTP verification after signup
    #[serde(default)]
    pub verify_user_id: Option<String>,

    /// Email address going through the password reset flow
    #[serde(default)]
    pub reset_email: Option<String>,
}

/// Durable storage for [`PersistedSession`]
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<PersistedSession, SessionError>;
    fn save(&self, session: &PersistedSession) -> Result<(), SessionError>;
}

/// Storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: Mutex<PersistedSession>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<PersistedSession, SessionError> {
        self.session
            .lock()
            .map(|s| s.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        let mut guard = self.session.lock().map_err(|_| SessionError::Poisoned)?;
        *guard = session.clone();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    persisted: PersistedSession,
    pending_redirect: Option<String>,
}

/// Shared session handle
///
/// Cloning is cheap; all clones see the same state. Every mutation of the
/// persisted part is written through to the storage, and a failed write is
/// logged rather than surfaced.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    /// Restore the session from storage, starting empty if it cannot be read
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let persisted = storage.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted session, starting empty");
            PersistedSession::default()
        });
        Self {
            state: Arc::new(RwLock::new(SessionState {
                persisted,
                pending_redirect: None,
            })),
            storage,
        }
    }

    /// Session backed by process memory only
    pub fn in_memory() -> Self {
        Self::restore(Arc::new(MemorySessionStorage::new()))
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().persisted.current_user.clone()
    }

    pub fn set_current_user(&self, user: Option<User>) {
        self.mutate(|s| s.current_user = user);
    }

    pub fn verify_user_id(&self) -> Option<String> {
        self.read().persisted.verify_user_id.clone()
    }

    pub fn set_verify_user_id(&self, user_id: Option<String>) {
        self.mutate(|s| s.verify_user_id = user_id);
    }

    pub fn reset_email(&self) -> Option<String> {
        self.read().persisted.reset_email.clone()
    }

    pub fn set_reset_email(&self, email: Option<String>) {
        self.mutate(|s| s.reset_email = email);
    }

    pub fn snapshot(&self) -> PersistedSession {
        self.read().persisted.clone()
    }

    /// Route the application was last sent to, if any
    pub fn pending_redirect(&self) -> Option<String> {
        self.read().pending_redirect.clone()
    }

    /// Consume the pending redirect
    pub fn take_redirect(&self) -> Option<String> {
        self.write().pending_redirect.take()
    }

    fn mutate(&self, f: impl FnOnce(&mut PersistedSession)) {
        let snapshot = {
            let mut state = self.write();
            f(&mut state.persisted);
            state.persisted.clone()
        };
        if let Err(e) = self.storage.save(&snapshot) {
            warn!(error = %e, "Failed to persist session");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for SessionContext {
    fn redirect(&self, route: &str) {
        info!(route, "Session expired, redirecting");
        self.write().pending_redirect = Some(route.to_string());
        self.set_current_user(None);
    }
}
