use super::*;
use crate::platform::types::UserRecord;
use crate::session::SessionStore;

fn ada() -> UserRecord {
    UserRecord { id: "u1".into(), email: "ada@example.test".into(), name: "Ada".into() }
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn decide_truth_table() {
    assert_eq!(decide(true, false), GuardDecision::Redirect(Route::Login));
    assert_eq!(decide(false, true), GuardDecision::Redirect(Route::Home));
    assert_eq!(decide(true, true), GuardDecision::Render);
    assert_eq!(decide(false, false), GuardDecision::Render);
}

// =============================================================================
// RouteGuard lifecycle
// =============================================================================

#[test]
fn guard_shows_placeholder_until_evaluated() {
    let store = SessionStore::new();
    let guard = RouteGuard::new(true, store.reader());
    assert_eq!(guard.view(), GuardView::Placeholder);
}

#[test]
fn guard_redirects_anonymous_from_protected_view() {
    let store = SessionStore::new();
    let mut guard = RouteGuard::new(true, store.reader());
    assert_eq!(guard.evaluate(), GuardDecision::Redirect(Route::Login));
    assert_eq!(guard.view(), GuardView::Redirect(Route::Login));
}

#[test]
fn guard_reevaluates_after_login() {
    let store = SessionStore::new();
    let mut guard = RouteGuard::new(true, store.reader());
    guard.evaluate();

    assert_eq!(guard.refresh(), None);
    store.mark_logged_in(ada());
    assert_eq!(guard.refresh(), Some(GuardDecision::Render));
    assert_eq!(guard.view(), GuardView::Render);
}

#[test]
fn guest_view_redirects_home_once_logged_in() {
    let store = SessionStore::new();
    let mut login_guard = RouteGuard::new(false, store.reader());
    assert_eq!(login_guard.evaluate(), GuardDecision::Render);

    store.mark_logged_in(ada());
    assert_eq!(login_guard.refresh(), Some(GuardDecision::Redirect(Route::Home)));
}

#[test]
fn refresh_on_pending_guard_evaluates() {
    let store = SessionStore::new();
    let mut guard = RouteGuard::new(false, store.reader());
    assert_eq!(guard.refresh(), Some(GuardDecision::Render));
}

#[test]
fn changing_requirement_reevaluates() {
    let store = SessionStore::new();
    store.mark_logged_in(ada());
    let mut guard = RouteGuard::new(true, store.reader());
    assert_eq!(guard.evaluate(), GuardDecision::Render);

    assert_eq!(guard.set_required_authentication(false), GuardDecision::Redirect(Route::Home));
    assert!(!guard.required_authentication());
    assert_eq!(guard.set_required_authentication(false), GuardDecision::Redirect(Route::Home));
}

#[tokio::test]
async fn next_decision_follows_logout() {
    let store = SessionStore::new();
    store.mark_logged_in(ada());
    let mut guard = RouteGuard::new(true, store.reader());
    guard.evaluate();

    store.mark_logged_out();
    assert_eq!(guard.next_decision().await, Some(GuardDecision::Redirect(Route::Login)));

    drop(store);
    assert_eq!(guard.next_decision().await, None);
}
