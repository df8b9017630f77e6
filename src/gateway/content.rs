//! Content gateway — posts in the document database, featured images in
//! file storage.
//!
//! Mutations propagate [`ContentError`] so the caller decides whether to
//! report or ignore a failure. Reads and deletes collapse to `Option`, an
//! empty list or `bool`, with the cause logged.

use std::sync::Arc;

use crate::config::PlatformConfig;
use crate::platform::types::{ContentRecord, FileRecord, FileUpload, NewPost, PostPatch, PostStatus, Query};
use crate::platform::{DatabaseApi, PlatformError, StorageApi, unique_id};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("{op} failed: {source}")]
    OperationFailed {
        op: &'static str,
        #[source]
        source: PlatformError,
    },
}

impl ContentError {
    fn op(op: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| {
            tracing::warn!(op, error = %source, "content operation failed");
            Self::OperationFailed { op, source }
        }
    }
}

fn encode<T: serde::Serialize>(op: &'static str, value: &T) -> Result<serde_json::Value, ContentError> {
    serde_json::to_value(value).map_err(|e| ContentError::op(op)(PlatformError::Parse(e.to_string())))
}

/// Listing filter used by the home and all-posts pages.
#[must_use]
pub fn default_post_queries() -> Vec<Query> {
    vec![Query::equal("status", PostStatus::Active.as_str())]
}

#[derive(Clone)]
pub struct ContentGateway {
    database: Arc<dyn DatabaseApi>,
    storage: Arc<dyn StorageApi>,
    config: PlatformConfig,
}

impl ContentGateway {
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseApi>, storage: Arc<dyn StorageApi>, config: PlatformConfig) -> Self {
        Self { database, storage, config }
    }

    // =========================================================================
    // POSTS
    // =========================================================================

    /// Create a post whose document id is its slug.
    ///
    /// # Errors
    ///
    /// [`ContentError::OperationFailed`] when the platform rejects the call.
    pub async fn create_post(&self, post: NewPost) -> Result<ContentRecord, ContentError> {
        let data = encode("create_post", &post)?;
        let created = self
            .database
            .create_document(&post.slug, data)
            .await
            .map_err(ContentError::op("create_post"))?;
        tracing::info!(post_id = %created.id, "post created");
        Ok(created)
    }

    /// Apply a partial update to a post.
    ///
    /// # Errors
    ///
    /// [`ContentError::OperationFailed`] when the platform rejects the call.
    pub async fn update_post(&self, id: &str, patch: PostPatch) -> Result<ContentRecord, ContentError> {
        let data = encode("update_post", &patch)?;
        let updated = self
            .database
            .update_document(id, data)
            .await
            .map_err(ContentError::op("update_post"))?;
        tracing::info!(post_id = %updated.id, "post updated");
        Ok(updated)
    }

    pub async fn delete_post(&self, id: &str) -> bool {
        match self.database.delete_document(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "post deleted");
                true
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "delete post failed");
                false
            }
        }
    }

    pub async fn get_post(&self, id: &str) -> Option<ContentRecord> {
        match self.database.get_document(id).await {
            Ok(post) => Some(post),
            Err(e) if e.is_not_found() => {
                tracing::debug!(post_id = %id, "post not found");
                None
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "get post failed");
                None
            }
        }
    }

    /// Posts matching `queries`, in platform order. Empty on failure.
    pub async fn list_posts(&self, queries: &[Query]) -> Vec<ContentRecord> {
        match self.database.list_documents(queries).await {
            Ok(list) => list.documents,
            Err(e) => {
                tracing::warn!(error = %e, "list posts failed");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // FILES
    // =========================================================================

    /// Upload a file under a freshly generated id.
    ///
    /// # Errors
    ///
    /// [`ContentError::OperationFailed`] when the platform rejects the upload.
    pub async fn upload_file(&self, upload: FileUpload) -> Result<FileRecord, ContentError> {
        let file = self
            .storage
            .create_file(&unique_id(), upload)
            .await
            .map_err(ContentError::op("upload_file"))?;
        tracing::info!(file_id = %file.id, size = file.size, "file uploaded");
        Ok(file)
    }

    pub async fn delete_file(&self, file_id: &str) -> bool {
        match self.storage.delete_file(file_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(file_id, error = %e, "delete file failed");
                false
            }
        }
    }

    #[must_use]
    pub fn file_preview_url(&self, file_id: &str) -> String {
        self.config.file_preview_url(file_id)
    }
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
