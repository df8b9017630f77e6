//! In-memory stand-in for the hosted platform, shared by unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use super::types::{ContentRecord, DocumentList, FileRecord, FileUpload, Query, SessionHandle, UserRecord};
use super::{DatabaseApi, IdentityApi, PlatformError, StorageApi};
use crate::config::PlatformConfig;
use crate::gateway::{AuthGateway, ContentGateway};

#[must_use]
pub fn test_config() -> PlatformConfig {
    PlatformConfig::new("https://cloud.example.test/v1", "proj", "db", "posts", "images")
}

/// Auth and content gateways backed by the same mock.
#[must_use]
pub fn gateways(mock: &Arc<MockPlatform>) -> (AuthGateway, ContentGateway) {
    let auth = AuthGateway::new(mock.clone() as Arc<dyn IdentityApi>);
    let content = ContentGateway::new(
        mock.clone() as Arc<dyn DatabaseApi>,
        mock.clone() as Arc<dyn StorageApi>,
        test_config(),
    );
    (auth, content)
}

#[derive(Default)]
pub struct MockState {
    /// Registered accounts with their passwords.
    pub accounts: Vec<(UserRecord, String)>,
    pub session_user: Option<UserRecord>,
    pub posts: Vec<ContentRecord>,
    pub files: Vec<FileRecord>,
    /// Every call in arrival order, e.g. `"create_email_session:ada@example.test"`.
    pub calls: Vec<String>,
    /// Operation names forced to fail with a transport error.
    pub failing: HashSet<&'static str>,
    /// Reject document reads without a session, like a users-only collection.
    pub reads_require_session: bool,
    next_id: u32,
}

#[derive(Default)]
pub struct MockPlatform {
    state: Mutex<MockState>,
}

impl MockPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Register an account and return its record.
    pub fn seed_account(&self, email: &str, password: &str, name: &str) -> UserRecord {
        let mut state = self.state();
        state.next_id += 1;
        let user = UserRecord { id: format!("user-{}", state.next_id), email: email.into(), name: name.into() };
        state.accounts.push((user.clone(), password.into()));
        user
    }

    /// Register an account and mark it as the current session.
    pub fn seed_session(&self, email: &str, password: &str, name: &str) -> UserRecord {
        let user = self.seed_account(email, password, name);
        self.state().session_user = Some(user.clone());
        user
    }

    pub fn seed_post(&self, id: &str, title: &str, owner: &str, image: &str) -> ContentRecord {
        let post = ContentRecord {
            id: id.into(),
            title: title.into(),
            content: format!("<p>{title}</p>"),
            status: super::types::PostStatus::Active,
            featured_image: Some(image.into()),
            user_id: Some(owner.into()),
        };
        self.state().posts.push(post.clone());
        post
    }

    pub fn fail(&self, op: &'static str) {
        self.state().failing.insert(op);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    #[must_use]
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn enter(&self, op: &'static str, detail: &str) -> Result<MutexGuard<'_, MockState>, PlatformError> {
        let mut state = self.state();
        state.calls.push(format!("{op}:{detail}"));
        if state.failing.contains(op) {
            return Err(PlatformError::Request(format!("{op}: connection reset")));
        }
        Ok(state)
    }
}

fn api(status: u16, kind: &str, message: &str) -> PlatformError {
    PlatformError::Api { status, kind: kind.into(), message: message.into() }
}

fn check_read(state: &MockState) -> Result<(), PlatformError> {
    if state.reads_require_session && state.session_user.is_none() {
        return Err(api(401, "user_unauthorized", "The current user is not authorized"));
    }
    Ok(())
}

#[async_trait::async_trait]
impl IdentityApi for MockPlatform {
    async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserRecord, PlatformError> {
        let mut state = self.enter("create_account", email)?;
        if state.accounts.iter().any(|(u, _)| u.email == email) {
            return Err(api(409, "user_already_exists", "A user with the same email already exists"));
        }
        let user = UserRecord { id: user_id.into(), email: email.into(), name: name.into() };
        state.accounts.push((user.clone(), password.into()));
        Ok(user)
    }

    async fn create_email_session(&self, email: &str, password: &str) -> Result<SessionHandle, PlatformError> {
        let mut state = self.enter("create_email_session", email)?;
        let user = state
            .accounts
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api(401, "user_invalid_credentials", "Invalid credentials"))?;
        state.session_user = Some(user.clone());
        Ok(SessionHandle { id: format!("session-{}", user.id), user_id: user.id, expire: String::new() })
    }

    async fn get_account(&self) -> Result<UserRecord, PlatformError> {
        let state = self.enter("get_account", "")?;
        state
            .session_user
            .clone()
            .ok_or_else(|| api(401, "general_unauthorized_scope", "User (role: guests) missing scope (account)"))
    }

    async fn delete_sessions(&self) -> Result<(), PlatformError> {
        let mut state = self.enter("delete_sessions", "")?;
        state.session_user = None;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseApi for MockPlatform {
    async fn create_document(
        &self,
        document_id: &str,
        data: serde_json::Value,
    ) -> Result<ContentRecord, PlatformError> {
        let mut state = self.enter("create_document", document_id)?;
        if state.posts.iter().any(|p| p.id == document_id) {
            return Err(api(409, "document_already_exists", "Document with the requested ID already exists"));
        }
        let mut object = data;
        object["$id"] = document_id.into();
        let post: ContentRecord =
            serde_json::from_value(object).map_err(|e| api(400, "document_invalid_structure", &e.to_string()))?;
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn update_document(
        &self,
        document_id: &str,
        data: serde_json::Value,
    ) -> Result<ContentRecord, PlatformError> {
        let mut state = self.enter("update_document", document_id)?;
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == document_id)
            .ok_or_else(|| api(404, "document_not_found", "Document not found"))?;
        let mut merged = serde_json::to_value(&*post).map_err(|e| PlatformError::Parse(e.to_string()))?;
        if let (Some(target), Some(patch)) = (merged.as_object_mut(), data.as_object()) {
            for (k, v) in patch {
                target.insert(k.clone(), v.clone());
            }
        }
        *post = serde_json::from_value(merged).map_err(|e| api(400, "document_invalid_structure", &e.to_string()))?;
        Ok(post.clone())
    }

    async fn delete_document(&self, document_id: &str) -> Result<(), PlatformError> {
        let mut state = self.enter("delete_document", document_id)?;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != document_id);
        if state.posts.len() == before {
            return Err(api(404, "document_not_found", "Document not found"));
        }
        Ok(())
    }

    async fn get_document(&self, document_id: &str) -> Result<ContentRecord, PlatformError> {
        let state = self.enter("get_document", document_id)?;
        check_read(&state)?;
        state
            .posts
            .iter()
            .find(|p| p.id == document_id)
            .cloned()
            .ok_or_else(|| api(404, "document_not_found", "Document not found"))
    }

    async fn list_documents(&self, queries: &[Query]) -> Result<DocumentList<ContentRecord>, PlatformError> {
        let state = self.enter("list_documents", &queries.len().to_string())?;
        check_read(&state)?;
        let filters: Vec<(String, serde_json::Value)> = queries
            .iter()
            .filter_map(|q| serde_json::to_value(q).ok())
            .filter(|q| q["method"] == "equal")
            .filter_map(|q| Some((q["attribute"].as_str()?.to_string(), q["values"][0].clone())))
            .collect();
        let documents: Vec<ContentRecord> = state
            .posts
            .iter()
            .filter(|p| {
                let doc = serde_json::to_value(p).unwrap_or_default();
                filters.iter().all(|(attr, value)| &doc[attr.as_str()] == value)
            })
            .cloned()
            .collect();
        Ok(DocumentList { total: documents.len() as u64, documents })
    }
}

#[async_trait::async_trait]
impl StorageApi for MockPlatform {
    async fn create_file(&self, file_id: &str, upload: FileUpload) -> Result<FileRecord, PlatformError> {
        let mut state = self.enter("create_file", &upload.file_name)?;
        state.next_id += 1;
        let id = if file_id.is_empty() { format!("file-{}", state.next_id) } else { file_id.to_string() };
        let file = FileRecord {
            id,
            name: upload.file_name,
            mime_type: upload.mime_type,
            size: upload.bytes.len() as u64,
        };
        state.files.push(file.clone());
        Ok(file)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), PlatformError> {
        let mut state = self.enter("delete_file", file_id)?;
        let before = state.files.len();
        state.files.retain(|f| f.id != file_id);
        if state.files.len() == before {
            return Err(api(404, "storage_file_not_found", "The requested file could not be found"));
        }
        Ok(())
    }
}
