//! Auth gateway — account and session calls with error translation.
//!
//! ERROR HANDLING
//! ==============
//! User-initiated calls (`create_account`, `login`) propagate typed errors so
//! pages can show them. Calls that gate navigation (`get_current_session_user`)
//! or are best-effort (`logout`) never fail: problems are logged and folded
//! into "no session".

use std::sync::Arc;

use crate::platform::types::{SessionHandle, UserRecord};
use crate::platform::{IdentityApi, PlatformError, unique_id};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("account creation failed: {0}")]
    AccountCreationFailed(#[source] PlatformError),
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[source] PlatformError),
}

/// Result of asking the platform who owns the current session.
///
/// `Anonymous` and `Failed` lead to the same UI outcome; the split exists
/// so logs can tell a confirmed guest from a check that never completed.
#[derive(Debug)]
pub enum SessionCheck {
    Authenticated(UserRecord),
    Anonymous,
    Failed(PlatformError),
}

impl SessionCheck {
    #[must_use]
    pub fn into_user(self) -> Option<UserRecord> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous | Self::Failed(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthGateway {
    identity: Arc<dyn IdentityApi>,
}

impl AuthGateway {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityApi>) -> Self {
        Self { identity }
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// # Errors
    ///
    /// [`AuthError::AccountCreationFailed`] if the account call fails (login is
    /// not attempted), or [`AuthError::AuthenticationFailed`] if the follow-up
    /// login fails.
    pub async fn create_account(&self, email: &str, password: &str, name: &str) -> Result<SessionHandle, AuthError> {
        let user = self
            .identity
            .create_account(&unique_id(), email, password, name)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "account creation failed");
                AuthError::AccountCreationFailed(e)
            })?;
        tracing::info!(user_id = %user.id, "account created");
        self.login(email, password).await
    }

    /// Open an email/password session.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationFailed`] when the platform rejects the call.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionHandle, AuthError> {
        let session = self
            .identity
            .create_email_session(email, password)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "login failed");
                AuthError::AuthenticationFailed(e)
            })?;
        tracing::info!(user_id = %session.user_id, "session created");
        Ok(session)
    }

    /// Ask the platform for the current session's account, keeping the
    /// reason when there is none.
    pub async fn check_session(&self) -> SessionCheck {
        match self.identity.get_account().await {
            Ok(user) => SessionCheck::Authenticated(user),
            Err(e) if e.is_unauthorized() => SessionCheck::Anonymous,
            Err(e) => SessionCheck::Failed(e),
        }
    }

    /// Current session user, or `None` when there is no session or the check
    /// failed. Never errors.
    pub async fn get_current_session_user(&self) -> Option<UserRecord> {
        let check = self.check_session().await;
        match &check {
            SessionCheck::Authenticated(user) => tracing::debug!(user_id = %user.id, "active session found"),
            SessionCheck::Anonymous => tracing::debug!("no active session"),
            SessionCheck::Failed(e) => tracing::warn!(error = %e, "session check failed; treating as anonymous"),
        }
        check.into_user()
    }

    /// Delete every remote session. Best effort: failures are logged only.
    pub async fn logout(&self) {
        if let Err(e) = self.identity.delete_sessions().await {
            tracing::warn!(error = %e, "logout failed");
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
