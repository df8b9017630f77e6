//! Records exchanged with the hosted platform.
//!
//! Field names follow the platform's JSON: system attributes carry a `$`
//! prefix (`$id`) and document attributes are camelCase.

use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Account returned by the identity API. Immutable on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Session created by an email/password login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionHandle {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub expire: String,
}

// =============================================================================
// POSTS
// =============================================================================

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Active,
    Inactive,
}

impl PostStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A single authored post. The document id is the post's slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(rename = "featuredImage", default)]
    pub featured_image: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Payload for creating a post. `slug` becomes the document id and is not
/// stored as an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    #[serde(skip)]
    pub slug: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "featuredImage")]
    pub featured_image: String,
    pub status: PostStatus,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Partial update for a post. `None` fields are omitted from the request
/// and left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "featuredImage", skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

/// Page of documents from a list call.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

// =============================================================================
// QUERIES
// =============================================================================

/// Filter clause for list calls, serialized in the platform's JSON query form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<serde_json::Value>,
}

impl Query {
    #[must_use]
    pub fn equal(attribute: &str, value: impl Into<serde_json::Value>) -> Self {
        Self { method: "equal", attribute: Some(attribute.to_string()), values: vec![value.into()] }
    }

    /// Encode for a `queries[]` query-string parameter.
    #[must_use]
    pub fn to_param(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

// =============================================================================
// FILES
// =============================================================================

/// Stored file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size: u64,
}

/// File contents staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self { file_name, mime_type, bytes }
    }

    /// Read a file from disk for upload.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}

/// Content type for the image formats the post form accepts.
#[must_use]
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
