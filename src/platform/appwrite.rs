//! Appwrite-compatible REST client.
//!
//! Thin HTTP wrapper for the account, databases and storage endpoints. The
//! session lives in the client's in-memory cookie jar; it is never written
//! to disk. Pure helpers (`parse_error`, `parse_body`, `query_pairs`) keep
//! the wire handling testable without a server.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::types::{ContentRecord, DocumentList, FileRecord, FileUpload, Query, SessionHandle, UserRecord};
use super::{DatabaseApi, IdentityApi, PlatformError, StorageApi};
use crate::config::PlatformConfig;

const PROJECT_HEADER: &str = "x-appwrite-project";
const FALLBACK_COOKIES_HEADER: &str = "x-fallback-cookies";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AppwriteClient {
    http: reqwest::Client,
    config: PlatformConfig,
    /// Session cookies echoed by the platform for clients whose cookie jar
    /// rejects the session cookie's domain.
    fallback_cookies: RwLock<Option<String>>,
}

impl AppwriteClient {
    /// Build a client bound to one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project id is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: PlatformConfig) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        let project =
            HeaderValue::from_str(&config.project_id).map_err(|e| PlatformError::HttpClientBuild(e.to_string()))?;
        headers.insert(PROJECT_HEADER, project);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| PlatformError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, config, fallback_cookies: RwLock::new(None) })
    }

    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.endpoint);
        let builder = self.http.request(method, url);
        let fallback = self
            .fallback_cookies
            .read()
            .ok()
            .and_then(|guard| guard.clone());
        match fallback {
            Some(cookies) => builder.header(FALLBACK_COOKIES_HEADER, cookies),
            None => builder,
        }
    }

    fn documents_path(&self) -> String {
        format!("/databases/{}/collections/{}/documents", self.config.database_id, self.config.collection_id)
    }

    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.config.bucket_id)
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<(HeaderMap, String), PlatformError> {
        let response = request
            .send()
            .await
            .map_err(|e| PlatformError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| PlatformError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_error(status, &text));
        }
        Ok((headers, text))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PlatformError> {
        let (_, text) = self.send(request).await?;
        parse_body(&text)
    }

    fn set_fallback_cookies(&self, value: Option<String>) {
        if let Ok(mut guard) = self.fallback_cookies.write() {
            *guard = value;
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

#[async_trait::async_trait]
impl IdentityApi for AppwriteClient {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserRecord, PlatformError> {
        let body = serde_json::json!({
            "userId": user_id,
            "email": email,
            "password": password,
            "name": name,
        });
        self.send_json(self.request(Method::POST, "/account").json(&body))
            .await
    }

    async fn create_email_session(&self, email: &str, password: &str) -> Result<SessionHandle, PlatformError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let (headers, text) = self
            .send(self.request(Method::POST, "/account/sessions/email").json(&body))
            .await?;
        let fallback = headers
            .get(FALLBACK_COOKIES_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        if fallback.is_some() {
            self.set_fallback_cookies(fallback);
        }
        parse_body(&text)
    }

    async fn get_account(&self) -> Result<UserRecord, PlatformError> {
        self.send_json(self.request(Method::GET, "/account")).await
    }

    async fn delete_sessions(&self) -> Result<(), PlatformError> {
        self.send(self.request(Method::DELETE, "/account/sessions"))
            .await?;
        self.set_fallback_cookies(None);
        Ok(())
    }
}

// =============================================================================
// DATABASE
// =============================================================================

#[async_trait::async_trait]
impl DatabaseApi for AppwriteClient {
    async fn create_document(
        &self,
        document_id: &str,
        data: serde_json::Value,
    ) -> Result<ContentRecord, PlatformError> {
        let body = serde_json::json!({ "documentId": document_id, "data": data });
        self.send_json(self.request(Method::POST, &self.documents_path()).json(&body))
            .await
    }

    async fn update_document(
        &self,
        document_id: &str,
        data: serde_json::Value,
    ) -> Result<ContentRecord, PlatformError> {
        let path = format!("{}/{document_id}", self.documents_path());
        let body = serde_json::json!({ "data": data });
        self.send_json(self.request(Method::PATCH, &path).json(&body))
            .await
    }

    async fn delete_document(&self, document_id: &str) -> Result<(), PlatformError> {
        let path = format!("{}/{document_id}", self.documents_path());
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn get_document(&self, document_id: &str) -> Result<ContentRecord, PlatformError> {
        let path = format!("{}/{document_id}", self.documents_path());
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn list_documents(&self, queries: &[Query]) -> Result<DocumentList<ContentRecord>, PlatformError> {
        let request = self
            .request(Method::GET, &self.documents_path())
            .query(&query_pairs(queries));
        self.send_json(request).await
    }
}

// =============================================================================
// STORAGE
// =============================================================================

#[async_trait::async_trait]
impl StorageApi for AppwriteClient {
    async fn create_file(&self, file_id: &str, upload: FileUpload) -> Result<FileRecord, PlatformError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| PlatformError::Request(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);
        self.send_json(self.request(Method::POST, &self.files_path()).multipart(form))
            .await
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), PlatformError> {
        let path = format!("{}/{file_id}", self.files_path());
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Translate a non-success response into a [`PlatformError::Api`].
fn parse_error(status: u16, body: &str) -> PlatformError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) => PlatformError::Api { status, kind: api.kind, message: api.message },
        Err(_) => PlatformError::Api { status, kind: String::new(), message: body.trim().to_string() },
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, PlatformError> {
    serde_json::from_str(body).map_err(|e| PlatformError::Parse(e.to_string()))
}

/// Repeated `queries[]` parameters, one JSON-encoded query each.
fn query_pairs(queries: &[Query]) -> Vec<(&'static str, String)> {
    queries
        .iter()
        .map(|q| ("queries[]", q.to_param()))
        .collect()
}

#[cfg(test)]
#[path = "appwrite_test.rs"]
mod tests;
