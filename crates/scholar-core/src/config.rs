//! Configuration module
//!
//! Environment-driven settings for the portal client: server location, API
//! version, request timeout, and where the persisted credential lives.

use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const CREDENTIAL_FILE_NAME: &str = "token";

/// Client configuration, resolved once at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
    /// Path of the single persisted credential file. Absence or corruption of
    /// the file is a valid state (treated as logged out).
    pub credential_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to defaults.
    /// Never fails: a missing variable means the default applies.
    pub fn from_env() -> Self {
        let base_url = env::var("SCHOLAR_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_version =
            env::var("SCHOLAR_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let request_timeout_secs = env::var("SCHOLAR_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let credential_path = env::var("SCHOLAR_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_credential_path());

        Self {
            base_url,
            api_version,
            request_timeout_secs,
            credential_path,
        }
    }

    /// API path prefix, e.g. "/api/v1".
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }
}

fn default_credential_path() -> PathBuf {
    let dir = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|_| env::temp_dir());
    dir.join("scholar").join(CREDENTIAL_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_prefix() {
        let config = ClientConfig {
            base_url: "http://localhost:8000".to_string(),
            api_version: "v1".to_string(),
            request_timeout_secs: 60,
            credential_path: PathBuf::from("/tmp/token"),
        };
        assert_eq!(config.api_prefix(), "/api/v1");
    }
}
