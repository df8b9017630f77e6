//! Hosted platform configuration parsed from environment variables.

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set or is blank.
    #[error("missing config: env var {var} not set")]
    Missing { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Timeouts {
    /// Read the optional timeout variables, falling back to the defaults on
    /// absent or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_u64("APPWRITE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("APPWRITE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Endpoint and identifiers for the hosted identity/database/storage platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1`, without trailing slash.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub bucket_id: String,
    pub timeouts: Timeouts,
}

impl PlatformConfig {
    /// Build a config from explicit values, normalizing the endpoint.
    #[must_use]
    pub fn new(
        endpoint: &str,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        bucket_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database_id: database_id.into(),
            collection_id: collection_id.into(),
            bucket_id: bucket_id.into(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build typed platform config from environment variables.
    ///
    /// Required:
    /// - `APPWRITE_URL`
    /// - `APPWRITE_PROJECT_ID`
    /// - `APPWRITE_DATABASE_ID`
    /// - `APPWRITE_COLLECTION_ID`
    /// - `APPWRITE_BUCKET_ID`
    ///
    /// Optional:
    /// - `APPWRITE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `APPWRITE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = required("APPWRITE_URL")?;
        let mut config = Self::new(
            &endpoint,
            required("APPWRITE_PROJECT_ID")?,
            required("APPWRITE_DATABASE_ID")?,
            required("APPWRITE_COLLECTION_ID")?,
            required("APPWRITE_BUCKET_ID")?,
        );
        config.timeouts = Timeouts::from_env();
        Ok(config)
    }

    /// Deterministic preview URL for a stored file. No network call.
    #[must_use]
    pub fn file_preview_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/preview?project={}",
            self.endpoint, self.bucket_id, file_id, self.project_id
        )
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
