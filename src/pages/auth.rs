//! Login, signup and logout actions.

use super::{PageContext, PageError};
use crate::gateway::AuthGateway;
use crate::routes::Route;
use crate::session::SessionStore;

/// Sign in, then load the session's account into the store.
///
/// # Errors
///
/// [`PageError::Auth`] when the platform rejects the credentials.
pub async fn login(ctx: &PageContext<'_>, email: &str, password: &str) -> Result<Route, PageError> {
    ctx.auth.login(email, password).await?;
    adopt_session(ctx).await;
    Ok(Route::Home)
}

/// Create an account (which also signs in), then load it into the store.
///
/// # Errors
///
/// [`PageError::Auth`] when account creation or the follow-up login fails.
pub async fn signup(ctx: &PageContext<'_>, email: &str, password: &str, name: &str) -> Result<Route, PageError> {
    ctx.auth.create_account(email, password, name).await?;
    adopt_session(ctx).await;
    Ok(Route::Home)
}

async fn adopt_session(ctx: &PageContext<'_>) {
    if let Some(user) = ctx.auth.get_current_session_user().await {
        ctx.session.mark_logged_in(user);
    }
}

/// End the remote session and forget the user locally, even if the remote
/// call failed.
pub async fn logout(auth: &AuthGateway, session: &SessionStore) {
    auth.logout().await;
    session.mark_logged_out();
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
