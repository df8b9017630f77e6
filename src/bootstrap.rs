//! Session bootstrap — resolve the remote session once at startup.
//!
//! Loading → Resolved(Authenticated | Anonymous) → Idle, exactly once per
//! application lifetime. While Loading the app renders only a placeholder.
//! A failed check is logged and resolves to Anonymous like a missing
//! session does.

use crate::gateway::{AuthGateway, SessionCheck};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Loading,
    Resolved(Resolution),
    Idle,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("session bootstrap already ran")]
    AlreadyResolved,
}

#[derive(Debug)]
pub struct Bootstrap {
    phase: BootstrapPhase,
    resolution: Option<Resolution>,
}

impl Bootstrap {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: BootstrapPhase::Loading, resolution: None }
    }

    #[must_use]
    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == BootstrapPhase::Loading
    }

    /// How the session resolved, once bootstrap has run.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Check the remote session and seed the store.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::AlreadyResolved`] if called after a previous run;
    /// the store is not touched in that case.
    pub async fn run(&mut self, auth: &AuthGateway, store: &SessionStore) -> Result<Resolution, BootstrapError> {
        if !self.is_loading() {
            return Err(BootstrapError::AlreadyResolved);
        }
        let check = auth.check_session().await;
        let resolution = self.resolve(check, store);
        self.finish();
        Ok(resolution)
    }

    fn resolve(&mut self, check: SessionCheck, store: &SessionStore) -> Resolution {
        let resolution = match check {
            SessionCheck::Authenticated(user) => {
                tracing::info!(user_id = %user.id, "bootstrap resolved: authenticated");
                store.mark_logged_in(user);
                Resolution::Authenticated
            }
            SessionCheck::Anonymous => {
                tracing::info!("bootstrap resolved: anonymous");
                store.mark_logged_out();
                Resolution::Anonymous
            }
            SessionCheck::Failed(e) => {
                tracing::warn!(error = %e, "bootstrap session check failed; continuing anonymous");
                store.mark_logged_out();
                Resolution::Anonymous
            }
        };
        self.phase = BootstrapPhase::Resolved(resolution);
        self.resolution = Some(resolution);
        resolution
    }

    fn finish(&mut self) {
        self.phase = BootstrapPhase::Idle;
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
