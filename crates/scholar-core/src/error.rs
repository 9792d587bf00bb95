//! Error types module
//!
//! All client-facing failures are unified under the `PortalError` enum. The
//! ledger and progress modules are pure and never produce errors; everything
//! that touches the network or local state maps into one of these variants.

/// Unified error type for the portal client.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Credential rejected or token invalid. Carries the server-supplied
    /// message verbatim when one was returned.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network or server failure on a data read.
    #[error("request failed: {0}")]
    Fetch(String),

    /// Binary preview content unavailable. 401/404/5xx are indistinguishable
    /// at this layer; callers treat the whole class as retryable.
    #[error("preview unavailable: {0}")]
    PreviewFetch(String),

    /// Malformed local input, rejected before any request is issued.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl PortalError {
    /// Get the error type name for logging and error reporting
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::Auth(_) => "Auth",
            PortalError::Fetch(_) => "Fetch",
            PortalError::PreviewFetch(_) => "PreviewFetch",
            PortalError::Validation(_) => "Validation",
        }
    }

    /// Whether retrying the same operation can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PortalError::Fetch(_) | PortalError::PreviewFetch(_) => true,
            PortalError::Auth(_) | PortalError::Validation(_) => false,
        }
    }

    /// Client-facing message for inline display.
    pub fn client_message(&self) -> String {
        match self {
            PortalError::Auth(msg) => msg.clone(),
            PortalError::Fetch(_) => "Failed to load data. Please try again.".to_string(),
            PortalError::PreviewFetch(_) => {
                "Preview is currently unavailable. Please try again.".to_string()
            }
            PortalError::Validation(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_preserves_server_message() {
        let err = PortalError::Auth("Incorrect email or password".to_string());
        assert_eq!(err.error_type(), "Auth");
        assert!(!err.is_retryable());
        assert_eq!(err.client_message(), "Incorrect email or password");
    }

    #[test]
    fn test_preview_fetch_is_retryable() {
        let err = PortalError::PreviewFetch("server returned 503".to_string());
        assert!(err.is_retryable());
        assert_eq!(err.error_type(), "PreviewFetch");
    }

    #[test]
    fn test_fetch_hides_internal_detail() {
        let err = PortalError::Fetch("connection reset by peer".to_string());
        assert!(err.is_retryable());
        assert!(!err.client_message().contains("peer"));
    }
}
