//! App shell — owns the session and mounts one page at a time.
//!
//! DESIGN
//! ======
//! Navigation is a loop: parse the path, mount a guard for the route if it
//! has one, follow the guard's redirect or load the page, and follow the
//! page's redirect. Each mount gets a fresh [`ViewScope`] and closes the
//! previous one, so nothing a replaced view started can write back.
//!
//! Until bootstrap resolves every navigation shows [`Screen::Loading`] and
//! only the latest requested path is remembered.
//!
//! Session changes caused by actions (login, logout) are pushed into the
//! mounted view through its guard: a guarded view re-evaluates and may
//! redirect; an unguarded one reloads so author controls stay in sync.
//!
//! Every action holds `&mut self`, so inside `App` a view's scope is only
//! closed by the next mount and the `None` arms of `ViewScope::run` are
//! unreachable here. They matter once a caller drives a load on another
//! task while still holding a clone of the scope.

use std::sync::Arc;

use crate::bootstrap::{Bootstrap, BootstrapError, Resolution};
use crate::gateway::{AuthGateway, ContentGateway};
use crate::pages::{self, PageContext, PageError, PageOutcome, PostForm, Screen};
use crate::platform::appwrite::AppwriteClient;
use crate::platform::types::UserRecord;
use crate::routes::{GuardDecision, Route, RouteGuard};
use crate::scope::ViewScope;
use crate::session::SessionStore;

/// Redirects followed for one navigation before giving up.
const MAX_REDIRECTS: usize = 4;

static LOADING: Screen = Screen::Loading;

struct Mounted {
    route: Option<Route>,
    guard: Option<RouteGuard>,
    scope: ViewScope,
    screen: Screen,
}

pub struct App {
    auth: AuthGateway,
    content: ContentGateway,
    session: SessionStore,
    bootstrap: Bootstrap,
    mounted: Option<Mounted>,
    pending: Option<String>,
}

impl App {
    #[must_use]
    pub fn new(auth: AuthGateway, content: ContentGateway) -> Self {
        Self {
            auth,
            content,
            session: SessionStore::new(),
            bootstrap: Bootstrap::new(),
            mounted: None,
            pending: None,
        }
    }

    /// Wire both gateways to one HTTP client so they share its session cookie.
    #[must_use]
    pub fn from_client(client: Arc<AppwriteClient>) -> Self {
        let config = client.config().clone();
        let auth = AuthGateway::new(client.clone());
        let content = ContentGateway::new(client.clone(), client, config);
        Self::new(auth, content)
    }

    /// Resolve the session, then show the path requested while loading
    /// (or `/`).
    ///
    /// # Errors
    ///
    /// [`BootstrapError::AlreadyResolved`] when called twice.
    pub async fn start(&mut self) -> Result<Resolution, BootstrapError> {
        let resolution = self.bootstrap.run(&self.auth, &self.session).await?;
        let path = self.pending.take().unwrap_or_else(|| Route::Home.path());
        self.navigate(&path).await;
        Ok(resolution)
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.mounted.as_ref().map_or(&LOADING, |m| &m.screen)
    }

    #[must_use]
    pub fn current_route(&self) -> Option<&Route> {
        self.mounted.as_ref().and_then(|m| m.route.as_ref())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.session.user()
    }

    fn ctx(&self) -> PageContext<'_> {
        PageContext { auth: &self.auth, content: &self.content, session: &self.session }
    }

    /// Scope of the mounted view, or a closed one when nothing is mounted.
    fn active_scope(&self) -> ViewScope {
        self.mounted.as_ref().map_or_else(
            || {
                let scope = ViewScope::new();
                scope.close();
                scope
            },
            |m| m.scope.clone(),
        )
    }

    fn unmount(&mut self) {
        if let Some(old) = self.mounted.take() {
            old.scope.close();
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    pub async fn navigate(&mut self, path: &str) -> &Screen {
        if self.bootstrap.is_loading() {
            tracing::debug!(path, "navigation deferred until session resolves");
            self.pending = Some(path.to_string());
            self.unmount();
            return self.screen();
        }
        match Route::parse(path) {
            Some(route) => self.mount(route).await,
            None => {
                tracing::debug!(path, "no route");
                self.unmount();
                self.mounted = Some(Mounted {
                    route: None,
                    guard: None,
                    scope: ViewScope::new(),
                    screen: Screen::NotFound { path: path.to_string() },
                });
            }
        }
        self.screen()
    }

    async fn mount(&mut self, mut route: Route) {
        for _ in 0..=MAX_REDIRECTS {
            self.unmount();
            let scope = ViewScope::new();
            let mut guard = route
                .required_authentication()
                .map(|required| RouteGuard::new(required, self.session.reader()));
            if let Some(GuardDecision::Redirect(next)) = guard.as_mut().map(RouteGuard::evaluate) {
                tracing::debug!(from = %route, to = %next, "guard redirect");
                route = next;
                continue;
            }

            let outcome = scope.run(pages::load(&self.ctx(), &route)).await;
            match outcome {
                Some(PageOutcome::Show(screen)) => {
                    self.mounted = Some(Mounted { route: Some(route), guard, scope, screen });
                    return;
                }
                Some(PageOutcome::Redirect(next)) => {
                    tracing::debug!(from = %route, to = %next, "page redirect");
                    route = next;
                }
                None => return,
            }
        }
        tracing::warn!(route = %route, "redirect limit reached");
        self.mounted = Some(Mounted {
            route: None,
            guard: None,
            scope: ViewScope::new(),
            screen: Screen::NotFound { path: route.path() },
        });
    }

    /// Bring the mounted view in line with a session change.
    async fn reconcile(&mut self) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        let next = match mounted.guard.as_mut() {
            Some(guard) => match guard.refresh() {
                Some(GuardDecision::Redirect(next)) => Some(next),
                _ => None,
            },
            None => mounted.route.clone(),
        };
        if let Some(next) = next {
            self.mount(next).await;
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// # Errors
    ///
    /// [`PageError::Auth`] when the credentials are rejected.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), PageError> {
        let scope = self.active_scope();
        let result = scope.run(pages::auth::login(&self.ctx(), email, password)).await;
        self.follow(result).await
    }

    /// # Errors
    ///
    /// [`PageError::Auth`] when the account cannot be created or signed in.
    pub async fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<(), PageError> {
        let scope = self.active_scope();
        let result = scope.run(pages::auth::signup(&self.ctx(), email, password, name)).await;
        self.follow(result).await
    }

    pub async fn logout(&mut self) {
        pages::auth::logout(&self.auth, &self.session).await;
        self.reconcile().await;
    }

    /// Apply `edit` to the open post form and submit it.
    ///
    /// # Errors
    ///
    /// [`PageError::NotOpen`] without an open form, otherwise whatever
    /// validation or saving reports. The edited form stays mounted on error.
    pub async fn submit_post<F>(&mut self, edit: F) -> Result<(), PageError>
    where
        F: FnOnce(&mut PostForm),
    {
        let form = match self.mounted.as_mut().map(|m| &mut m.screen) {
            Some(Screen::Editor(form)) => {
                edit(&mut **form);
                (**form).clone()
            }
            _ => return Err(PageError::NotOpen("post form")),
        };
        let scope = self.active_scope();
        let result = scope.run(pages::editor::submit(&self.ctx(), form)).await;
        self.follow(result).await
    }

    /// Delete the open post. Returns whether it was deleted.
    ///
    /// # Errors
    ///
    /// [`PageError::NotOpen`] without an open post, [`PageError::NotAuthor`]
    /// for someone else's post.
    pub async fn delete_current_post(&mut self) -> Result<bool, PageError> {
        let view = match self.mounted.as_ref().map(|m| &m.screen) {
            Some(Screen::Post(view)) => (**view).clone(),
            _ => return Err(PageError::NotOpen("post")),
        };
        let scope = self.active_scope();
        match scope.run(pages::posts::delete_post(&self.ctx(), &view)).await {
            Some(Ok(Some(next))) => {
                self.mount(next).await;
                Ok(true)
            }
            Some(Ok(None)) | None => Ok(false),
            Some(Err(e)) => Err(e),
        }
    }

    /// Navigate to the route an action produced. A closed scope means the
    /// view was replaced mid-action, so the result is dropped.
    async fn follow(&mut self, result: Option<Result<Route, PageError>>) -> Result<(), PageError> {
        match result {
            Some(Ok(next)) => {
                self.mount(next).await;
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
