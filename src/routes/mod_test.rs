use super::*;

// =============================================================================
// parse
// =============================================================================

#[test]
fn parse_static_routes() {
    assert_eq!(Route::parse("/"), Some(Route::Home));
    assert_eq!(Route::parse(""), Some(Route::Home));
    assert_eq!(Route::parse("/login"), Some(Route::Login));
    assert_eq!(Route::parse("/signup/"), Some(Route::Signup));
    assert_eq!(Route::parse("/all-posts"), Some(Route::AllPosts));
    assert_eq!(Route::parse("/add-post"), Some(Route::AddPost));
}

#[test]
fn parse_slug_routes() {
    assert_eq!(Route::parse("/post/intro-to-ai"), Some(Route::Post("intro-to-ai".into())));
    assert_eq!(Route::parse("/edit-post/intro-to-ai"), Some(Route::EditPost("intro-to-ai".into())));
}

#[test]
fn parse_edit_post_without_slug_keeps_empty_slug() {
    assert_eq!(Route::parse("/edit-post"), Some(Route::EditPost(String::new())));
}

#[test]
fn parse_ignores_query_and_fragment() {
    assert_eq!(Route::parse("/post/a?ref=home#top"), Some(Route::Post("a".into())));
    assert_eq!(Route::parse("/login?next=/add-post"), Some(Route::Login));
}

#[test]
fn parse_rejects_unknown_paths() {
    assert_eq!(Route::parse("/nope"), None);
    assert_eq!(Route::parse("/post"), None);
    assert_eq!(Route::parse("/post/a/b"), None);
    assert_eq!(Route::parse("/login/extra"), None);
}

// =============================================================================
// required_authentication
// =============================================================================

#[test]
fn access_table() {
    assert_eq!(Route::Home.required_authentication(), None);
    assert_eq!(Route::Post("a".into()).required_authentication(), None);
    assert_eq!(Route::Login.required_authentication(), Some(false));
    assert_eq!(Route::Signup.required_authentication(), Some(false));
    assert_eq!(Route::AllPosts.required_authentication(), Some(true));
    assert_eq!(Route::AddPost.required_authentication(), Some(true));
    assert_eq!(Route::EditPost("a".into()).required_authentication(), Some(true));
}

// =============================================================================
// path
// =============================================================================

#[test]
fn path_renders_slug_routes() {
    assert_eq!(Route::Post("b".into()).path(), "/post/b");
    assert_eq!(Route::EditPost("a".into()).to_string(), "/edit-post/a");
    assert_eq!(Route::EditPost(String::new()).path(), "/edit-post");
    assert_eq!(Route::Home.to_string(), "/");
}
