//! Session store — the client's belief about who is signed in.
//!
//! DESIGN
//! ======
//! The session holds only `Option<UserRecord>`; "authenticated" is derived
//! from it, so the flag and the user can never disagree. State sits behind
//! a `tokio::sync::watch` channel owned by [`SessionStore`], whose only
//! writers are [`SessionStore::mark_logged_in`] and
//! [`SessionStore::mark_logged_out`]. Everyone else holds a
//! [`SessionReader`], which can read and await changes but never write.
//!
//! Nothing is persisted: the platform's session cookie is the source of
//! truth and the store is rebuilt by bootstrap on every start.

use tokio::sync::watch;

use crate::platform::types::UserRecord;

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserRecord>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owner and sole writer of the session.
pub struct SessionStore {
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// New store in the anonymous state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Session::default());
        Self { tx }
    }

    pub fn mark_logged_in(&self, user: UserRecord) {
        tracing::debug!(user_id = %user.id, "session marked logged in");
        let next = Some(user);
        self.tx.send_if_modified(|session| {
            if session.user == next {
                return false;
            }
            session.user = next;
            true
        });
    }

    pub fn mark_logged_out(&self) {
        tracing::debug!("session marked logged out");
        self.tx.send_if_modified(|session| session.user.take().is_some());
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        self.tx.borrow().user.clone()
    }

    /// Read-only handle for components that observe the session.
    #[must_use]
    pub fn reader(&self) -> SessionReader {
        SessionReader { rx: self.tx.subscribe() }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// READER
// =============================================================================

/// Read-only view of the session that can wait for changes.
#[derive(Clone)]
pub struct SessionReader {
    rx: watch::Receiver<Session>,
}

impl SessionReader {
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Mark the current value as seen without reading it.
    pub fn mark_seen(&mut self) {
        self.rx.mark_unchanged();
    }

    /// Wait until the session changes. Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// True when a change arrived that this reader has not seen yet.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
