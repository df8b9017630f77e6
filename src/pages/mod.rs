//! Pages — the data flow behind each route.
//!
//! DESIGN
//! ======
//! A page load is an async function from a [`PageContext`] to a
//! [`PageOutcome`]: either a [`Screen`] to show or a route to go to instead.
//! Pages never touch the router; the app shell decides what to mount. The
//! shell runs every load and action inside the mounted view's scope, so a
//! page closed mid-call never writes to the session or its own state.

pub mod auth;
pub mod editor;
pub mod posts;

use std::fmt;

use crate::gateway::{AuthError, AuthGateway, ContentError, ContentGateway};
use crate::routes::Route;
use crate::session::SessionStore;

pub use editor::{FormMode, PostForm};
pub use posts::{PostCard, PostView};

/// Collaborators a page may use.
pub struct PageContext<'a> {
    pub auth: &'a AuthGateway,
    pub content: &'a ContentGateway,
    pub session: &'a SessionStore,
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("title is required")]
    MissingTitle,
    #[error("slug is required")]
    MissingSlug,
    #[error("a featured image is required for new posts")]
    MissingImage,
    #[error("sign in to publish posts")]
    NotSignedIn,
    #[error("only the author can change this post")]
    NotAuthor,
    #[error("no {0} is open")]
    NotOpen(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Placeholder while the session or a route guard is unresolved.
    Loading,
    NotFound { path: String },
    Home { posts: Vec<PostCard>, signed_in: bool },
    Login,
    Signup,
    AllPosts { posts: Vec<PostCard> },
    Editor(Box<PostForm>),
    NoPostSelected,
    Post(Box<PostView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Show(Screen),
    Redirect(Route),
}

/// Load the page behind `route`. Access control is the caller's job.
pub async fn load(ctx: &PageContext<'_>, route: &Route) -> PageOutcome {
    match route {
        Route::Home => posts::home(ctx).await,
        Route::Login => PageOutcome::Show(Screen::Login),
        Route::Signup => PageOutcome::Show(Screen::Signup),
        Route::AllPosts => posts::all_posts(ctx).await,
        Route::AddPost => PageOutcome::Show(Screen::Editor(Box::new(PostForm::create()))),
        Route::EditPost(slug) => editor::edit_post(ctx, slug).await,
        Route::Post(slug) => posts::post(ctx, slug).await,
    }
}

// =============================================================================
// TEXT RENDERING
// =============================================================================

fn write_cards(f: &mut fmt::Formatter<'_>, posts: &[PostCard]) -> fmt::Result {
    for card in posts {
        writeln!(f, "  - {} ({})", card.title, Route::Post(card.id.clone()))?;
        writeln!(f, "    image: {}", card.preview_url)?;
    }
    Ok(())
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "Loading..."),
            Self::NotFound { path } => writeln!(f, "Page not found: {path}"),
            Self::Home { posts, signed_in } => {
                if posts.is_empty() {
                    if *signed_in {
                        return writeln!(f, "No posts yet.");
                    }
                    return writeln!(f, "Login to read posts");
                }
                writeln!(f, "Posts")?;
                write_cards(f, posts)
            }
            Self::Login => writeln!(f, "Sign in to your account  (login <email> <password>)"),
            Self::Signup => writeln!(f, "Sign up to create account  (signup <email> <password> <name>)"),
            Self::AllPosts { posts } => {
                writeln!(f, "All posts ({})", posts.len())?;
                write_cards(f, posts)
            }
            Self::Editor(form) => {
                match &form.mode {
                    FormMode::Create => writeln!(f, "New post")?,
                    FormMode::Edit(post) => writeln!(f, "Editing {}", Route::Post(post.id.clone()))?,
                }
                writeln!(f, "  title:  {}", form.title)?;
                writeln!(f, "  slug:   {}", form.slug)?;
                writeln!(f, "  status: {}", form.status.as_str())?;
                if let Some(url) = &form.preview_url {
                    writeln!(f, "  image:  {url}")?;
                }
                writeln!(f, "  content: {} chars", form.content.chars().count())
            }
            Self::NoPostSelected => writeln!(f, "No post selected..."),
            Self::Post(view) => {
                writeln!(f, "{}", view.post.title)?;
                writeln!(f, "  image: {}", view.preview_url)?;
                writeln!(f, "{}", view.post.content)?;
                if view.is_author {
                    writeln!(f, "  [edit: go {}] [delete]", Route::EditPost(view.post.id.clone()))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
