//! Client-side route table.
//!
//! | path               | access                 |
//! |--------------------|------------------------|
//! | `/`                | public                 |
//! | `/login`           | anonymous only         |
//! | `/signup`          | anonymous only         |
//! | `/all-posts`       | authenticated          |
//! | `/add-post`        | authenticated          |
//! | `/edit-post/:slug` | authenticated          |
//! | `/post/:slug`      | public                 |

pub mod guard;

use std::fmt;

pub use guard::{GuardDecision, GuardView, RouteGuard, decide};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    AllPosts,
    AddPost,
    /// Edit form for a post. An empty slug means none was given.
    EditPost(String),
    Post(String),
}

impl Route {
    /// Parse a location path. Query strings, fragments and a trailing slash
    /// are ignored. Returns `None` for paths outside the table.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_matches('/');
        let mut segments = trimmed.split('/').filter(|s| !s.is_empty());
        let first = segments.next();
        let second = segments.next();
        if segments.next().is_some() {
            return None;
        }
        match (first, second) {
            (None, None) => Some(Self::Home),
            (Some("login"), None) => Some(Self::Login),
            (Some("signup"), None) => Some(Self::Signup),
            (Some("all-posts"), None) => Some(Self::AllPosts),
            (Some("add-post"), None) => Some(Self::AddPost),
            (Some("edit-post"), slug) => Some(Self::EditPost(slug.unwrap_or_default().to_string())),
            (Some("post"), Some(slug)) => Some(Self::Post(slug.to_string())),
            _ => None,
        }
    }

    /// Authentication the route demands, or `None` when it is unguarded.
    #[must_use]
    pub fn required_authentication(&self) -> Option<bool> {
        match self {
            Self::Home | Self::Post(_) => None,
            Self::Login | Self::Signup => Some(false),
            Self::AllPosts | Self::AddPost | Self::EditPost(_) => Some(true),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::AllPosts => "/all-posts".to_string(),
            Self::AddPost => "/add-post".to_string(),
            Self::EditPost(slug) if slug.is_empty() => "/edit-post".to_string(),
            Self::EditPost(slug) => format!("/edit-post/{slug}"),
            Self::Post(slug) => format!("/post/{slug}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
