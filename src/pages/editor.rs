//! Post editor — the shared create/edit form and its submit flow.
//!
//! ARCHITECTURE
//! ============
//! [`PostForm`] is plain state; the caller edits it through setters and then
//! hands it to [`submit`]. Setting the title re-derives the slug, as the
//! slug field follows the title until the user overrides it.
//!
//! Create uploads the image first and needs it to succeed before the post
//! exists. Edit uploads a replacement only if one was picked and drops the
//! old file once the post points at the new one. Whenever the document write
//! fails, the fresh upload is deleted so storage holds no orphans.

use super::{PageContext, PageError, PageOutcome, Screen};
use crate::platform::types::{ContentRecord, FileUpload, NewPost, PostPatch, PostStatus};
use crate::routes::Route;
use crate::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the contained post.
    Edit(ContentRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub mode: FormMode,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    /// Newly picked featured image, not yet uploaded.
    pub image: Option<FileUpload>,
    /// Preview of the image the post already has.
    pub preview_url: Option<String>,
}

impl PostForm {
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            status: PostStatus::Active,
            image: None,
            preview_url: None,
        }
    }

    #[must_use]
    pub fn edit(post: ContentRecord, preview_url: Option<String>) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.id.clone(),
            content: post.content.clone(),
            status: post.status,
            image: None,
            preview_url,
            mode: FormMode::Edit(post),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.slug = slugify(&self.title);
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slugify(slug);
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_status(&mut self, status: PostStatus) {
        self.status = status;
    }

    pub fn set_image(&mut self, image: FileUpload) {
        self.image = Some(image);
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Check the fields a submit needs before touching the network.
    ///
    /// # Errors
    ///
    /// [`PageError::MissingTitle`], [`PageError::MissingSlug`], or
    /// [`PageError::MissingImage`] for a new post without an image.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.title.trim().is_empty() {
            return Err(PageError::MissingTitle);
        }
        if !self.slug.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(PageError::MissingSlug);
        }
        if !self.is_edit() && self.image.is_none() {
            return Err(PageError::MissingImage);
        }
        Ok(())
    }
}

/// Load the edit form for `slug`.
pub async fn edit_post(ctx: &PageContext<'_>, slug: &str) -> PageOutcome {
    if slug.is_empty() {
        return PageOutcome::Redirect(Route::Home);
    }
    match ctx.content.get_post(slug).await {
        Some(post) => {
            let preview_url = post.featured_image.as_deref().map(|id| ctx.content.file_preview_url(id));
            PageOutcome::Show(Screen::Editor(Box::new(PostForm::edit(post, preview_url))))
        }
        None => PageOutcome::Show(Screen::NoPostSelected),
    }
}

/// Save the form and return the saved post's route.
///
/// # Errors
///
/// Validation errors, [`PageError::NotSignedIn`] / [`PageError::NotAuthor`]
/// for access problems, and [`PageError::Content`] when an upload or the
/// document write fails.
pub async fn submit(ctx: &PageContext<'_>, form: PostForm) -> Result<Route, PageError> {
    form.validate()?;
    let user = ctx.session.user().ok_or(PageError::NotSignedIn)?;

    match form.mode {
        FormMode::Edit(post) => {
            if post.user_id.as_deref() != Some(user.id.as_str()) {
                return Err(PageError::NotAuthor);
            }
            let new_file = match form.image {
                Some(image) => Some(ctx.content.upload_file(image).await?.id),
                None => None,
            };
            let patch = PostPatch {
                title: Some(form.title),
                content: Some(form.content),
                featured_image: new_file.clone(),
                status: Some(form.status),
            };
            match ctx.content.update_post(&post.id, patch).await {
                Ok(updated) => {
                    if let (Some(_), Some(old)) = (&new_file, &post.featured_image) {
                        ctx.content.delete_file(old).await;
                    }
                    Ok(Route::Post(updated.id))
                }
                Err(e) => {
                    if let Some(file_id) = &new_file {
                        ctx.content.delete_file(file_id).await;
                    }
                    Err(e.into())
                }
            }
        }
        FormMode::Create => {
            let image = form.image.ok_or(PageError::MissingImage)?;
            let file = ctx.content.upload_file(image).await?;
            let new_post = NewPost {
                slug: form.slug,
                title: form.title,
                content: form.content,
                featured_image: file.id.clone(),
                status: form.status,
                user_id: user.id,
            };
            match ctx.content.create_post(new_post).await {
                Ok(created) => Ok(Route::Post(created.id)),
                Err(e) => {
                    ctx.content.delete_file(&file.id).await;
                    Err(e.into())
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
