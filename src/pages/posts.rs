//! Home, all-posts and single-post pages.

use super::{PageContext, PageError, PageOutcome, Screen};
use crate::gateway::{ContentGateway, default_post_queries};
use crate::platform::types::ContentRecord;
use crate::routes::Route;

/// One entry in a post listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub preview_url: String,
}

impl PostCard {
    fn from_record(content: &ContentGateway, post: ContentRecord) -> Self {
        let preview_url = preview_for(content, &post);
        Self { id: post.id, title: post.title, preview_url }
    }
}

/// A fully loaded post and whether the signed-in user wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: ContentRecord,
    pub preview_url: String,
    pub is_author: bool,
}

fn preview_for(content: &ContentGateway, post: &ContentRecord) -> String {
    post.featured_image
        .as_deref()
        .map(|id| content.file_preview_url(id))
        .unwrap_or_default()
}

fn cards(ctx: &PageContext<'_>, posts: Vec<ContentRecord>) -> Vec<PostCard> {
    posts
        .into_iter()
        .map(|p| PostCard::from_record(ctx.content, p))
        .collect()
}

/// Active posts only.
pub async fn home(ctx: &PageContext<'_>) -> PageOutcome {
    let posts = ctx.content.list_posts(&default_post_queries()).await;
    PageOutcome::Show(Screen::Home { posts: cards(ctx, posts), signed_in: ctx.session.is_authenticated() })
}

/// Every post regardless of status.
pub async fn all_posts(ctx: &PageContext<'_>) -> PageOutcome {
    let posts = ctx.content.list_posts(&[]).await;
    PageOutcome::Show(Screen::AllPosts { posts: cards(ctx, posts) })
}

/// Load one post. Missing or unreadable posts send the user home.
pub async fn post(ctx: &PageContext<'_>, slug: &str) -> PageOutcome {
    if slug.is_empty() {
        return PageOutcome::Redirect(Route::Home);
    }
    let Some(post) = ctx.content.get_post(slug).await else {
        return PageOutcome::Redirect(Route::Home);
    };
    let is_author = match (&post.user_id, ctx.session.user()) {
        (Some(owner), Some(user)) => *owner == user.id,
        _ => false,
    };
    let preview_url = preview_for(ctx.content, &post);
    PageOutcome::Show(Screen::Post(Box::new(PostView { post, preview_url, is_author })))
}

/// Delete the viewed post, then its featured image.
///
/// Returns `Some(Route::Home)` once the post is gone, `None` if the platform
/// refused and the page should stay put.
///
/// # Errors
///
/// [`PageError::NotAuthor`] when the signed-in user did not write the post.
pub async fn delete_post(ctx: &PageContext<'_>, view: &PostView) -> Result<Option<Route>, PageError> {
    let owner = view.post.user_id.as_deref();
    let user = ctx.session.user();
    if owner.is_none() || owner != user.as_ref().map(|u| u.id.as_str()) {
        return Err(PageError::NotAuthor);
    }
    if !ctx.content.delete_post(&view.post.id).await {
        return Ok(None);
    }
    if let Some(file_id) = &view.post.featured_image {
        ctx.content.delete_file(file_id).await;
    }
    Ok(Some(Route::Home))
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
