//! Platform — typed seams over the hosted identity, database and storage APIs.
//!
//! DESIGN
//! ======
//! Each hosted API is an object-safe async trait so gateways can hold
//! `Arc<dyn ...>` and tests can substitute in-memory fakes. The only real
//! implementation is [`appwrite::AppwriteClient`], which speaks the REST
//! protocol with `reqwest`. Nothing here retries: one call, one attempt.

pub mod appwrite;
pub mod types;

#[cfg(test)]
pub mod mock;

use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use types::{ContentRecord, DocumentList, FileRecord, FileUpload, Query, SessionHandle, UserRecord};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by calls to the hosted platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("platform request failed: {0}")]
    Request(String),

    /// The platform answered with a non-success status.
    #[error("platform error {status} ({kind}): {message}")]
    Api { status: u16, kind: String, message: String },

    /// The response body did not match the expected shape.
    #[error("platform response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl PlatformError {
    /// True when the platform rejected the call for lack of a valid session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

// =============================================================================
// API TRAITS
// =============================================================================

/// Hosted account and session API.
#[async_trait::async_trait]
pub trait IdentityApi: Send + Sync {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserRecord, PlatformError>;

    async fn create_email_session(&self, email: &str, password: &str) -> Result<SessionHandle, PlatformError>;

    /// Account owning the current session. Fails with 401 when there is none.
    async fn get_account(&self) -> Result<UserRecord, PlatformError>;

    /// Delete every session of the current account.
    async fn delete_sessions(&self) -> Result<(), PlatformError>;
}

/// Hosted document API, bound to the posts collection.
#[async_trait::async_trait]
pub trait DatabaseApi: Send + Sync {
    async fn create_document(&self, document_id: &str, data: serde_json::Value)
    -> Result<ContentRecord, PlatformError>;

    async fn update_document(&self, document_id: &str, data: serde_json::Value)
    -> Result<ContentRecord, PlatformError>;

    async fn delete_document(&self, document_id: &str) -> Result<(), PlatformError>;

    async fn get_document(&self, document_id: &str) -> Result<ContentRecord, PlatformError>;

    async fn list_documents(&self, queries: &[Query]) -> Result<DocumentList<ContentRecord>, PlatformError>;
}

/// Hosted file storage API, bound to the featured-image bucket.
#[async_trait::async_trait]
pub trait StorageApi: Send + Sync {
    async fn create_file(&self, file_id: &str, upload: FileUpload) -> Result<FileRecord, PlatformError>;

    async fn delete_file(&self, file_id: &str) -> Result<(), PlatformError>;
}

// =============================================================================
// IDS
// =============================================================================

/// Generate a 20-character identifier: hex seconds, hex microseconds, then
/// seven random hex digits. Sorts roughly by creation time.
#[must_use]
pub fn unique_id() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let mut id = String::with_capacity(20);
    let _ = write!(id, "{:08x}{:05x}", now.as_secs(), now.subsec_micros());
    let mut rng = rand::rng();
    for _ in 0..7 {
        let _ = write!(id, "{:x}", rng.random_range(0..16u8));
    }
    id
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
