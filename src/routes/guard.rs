//! Route guard — authentication-based access control for a mounted view.
//!
//! The decision itself is the pure function [`decide`]. [`RouteGuard`] wraps
//! it with the lifecycle of a mounted view: Pending (placeholder) until the
//! first evaluation, then re-evaluated whenever the session's status or the
//! guard's own requirement changes.

use super::Route;
use crate::session::SessionReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

/// What the guarded view should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    Placeholder,
    Render,
    Redirect(Route),
}

/// Decide whether a view may render for the current session.
///
/// Guests are sent to `/login` from views that need a session; signed-in
/// users are sent to `/` from views meant for guests.
#[must_use]
pub fn decide(required_authentication: bool, is_authenticated: bool) -> GuardDecision {
    match (required_authentication, is_authenticated) {
        (true, false) => GuardDecision::Redirect(Route::Login),
        (false, true) => GuardDecision::Redirect(Route::Home),
        (true, true) | (false, false) => GuardDecision::Render,
    }
}

pub struct RouteGuard {
    required: bool,
    session: SessionReader,
    decision: Option<GuardDecision>,
}

impl RouteGuard {
    /// Mount a guard. It stays Pending until [`RouteGuard::evaluate`] runs.
    #[must_use]
    pub fn new(required_authentication: bool, session: SessionReader) -> Self {
        Self { required: required_authentication, session, decision: None }
    }

    #[must_use]
    pub fn required_authentication(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn view(&self) -> GuardView {
        match &self.decision {
            None => GuardView::Placeholder,
            Some(GuardDecision::Render) => GuardView::Render,
            Some(GuardDecision::Redirect(route)) => GuardView::Redirect(route.clone()),
        }
    }

    /// Compute the decision from the current session.
    pub fn evaluate(&mut self) -> GuardDecision {
        self.session.mark_seen();
        let decision = decide(self.required, self.session.is_authenticated());
        tracing::trace!(required = self.required, ?decision, "route guard evaluated");
        self.decision = Some(decision.clone());
        decision
    }

    /// Change the requirement, re-evaluating if it differs.
    pub fn set_required_authentication(&mut self, required: bool) -> GuardDecision {
        if required != self.required || self.decision.is_none() {
            self.required = required;
            return self.evaluate();
        }
        self.decision.clone().unwrap_or(GuardDecision::Render)
    }

    /// Re-evaluate if the session changed since the last evaluation.
    /// Returns the new decision when one was made.
    pub fn refresh(&mut self) -> Option<GuardDecision> {
        if self.decision.is_none() || self.session.has_changed() {
            return Some(self.evaluate());
        }
        None
    }

    /// Wait for the next session change and re-evaluate. Returns `None` once
    /// the session store has been dropped.
    pub async fn next_decision(&mut self) -> Option<GuardDecision> {
        if !self.session.changed().await {
            return None;
        }
        Some(self.evaluate())
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
