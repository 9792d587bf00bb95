//! Resource fetch gateway abstraction.
//!
//! This module defines the capability the rest of the client is written
//! against: given a resource path, return JSON or raw bytes, attaching the
//! session credential to protected calls. The HTTP implementation lives in
//! [`crate::http`]; tests substitute an in-memory fake.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

/// Gateway operation errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (connection, timeout, DNS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status. `message` carries the
    /// server-supplied detail when one was present.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The gateway could not be constructed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Abstract resource fetch capability.
///
/// Object-safe so call sites hold an `Arc<dyn ResourceGateway>`. All request
/// methods attach the current credential when one is set; the session context
/// is the only writer of the credential.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Replace the attached bearer credential (`None` detaches it).
    fn set_credential(&self, token: Option<String>);

    /// Currently attached credential, if any.
    fn credential(&self) -> Option<String>;

    /// GET a JSON resource with optional query parameters.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Value>;

    /// POST a JSON body and return the JSON response.
    async fn post_json(&self, path: &str, body: &Value) -> GatewayResult<Value>;

    /// POST a form-encoded body and return the JSON response.
    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> GatewayResult<Value>;

    /// GET a protected binary resource.
    async fn get_bytes(&self, path: &str) -> GatewayResult<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = GatewayError::Status {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(GatewayError::Transport("timeout".to_string()).status(), None);
    }
}
