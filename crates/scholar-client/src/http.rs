//! HTTP implementation of the resource fetch gateway.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;

use scholar_core::ClientConfig;

use crate::gateway::{GatewayError, GatewayResult, ResourceGateway};

/// Reqwest-backed gateway. The bearer credential is interior-mutable because
/// the session lifecycle (hydrate, login, logout) swaps it while readers hold
/// the same gateway handle.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credential: RwLock<Option<String>>,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credential() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn handle_json(response: reqwest::Response) -> GatewayResult<Value> {
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Map a non-success response to `GatewayError::Status`, extracting the
/// server's `detail` field when the body is a JSON error envelope.
async fn check_status(response: reqwest::Response) -> GatewayResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(str::to_string)))
        .unwrap_or(body);

    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ResourceGateway for HttpGateway {
    fn set_credential(&self, token: Option<String>) {
        let mut slot = self
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = token;
    }

    fn credential(&self) -> Option<String> {
        self.credential
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Value> {
        let mut request = self.client.get(self.build_url(path));
        request = self.apply_auth(request);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::handle_json(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> GatewayResult<Value> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::handle_json(response).await
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> GatewayResult<Value> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).form(form));
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::handle_json(response).await
    }

    async fn get_bytes(&self, path: &str) -> GatewayResult<Bytes> {
        let request = self.apply_auth(self.client.get(self.build_url(path)));
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .bytes()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            api_version: "v1".to_string(),
            request_timeout_secs: 60,
            credential_path: PathBuf::from("/tmp/token"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpGateway::new(&config("http://localhost:8000/")).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8000");
        assert_eq!(
            gateway.build_url("/api/v1/documents/"),
            "http://localhost:8000/api/v1/documents/"
        );
    }

    #[test]
    fn test_credential_swap() {
        let gateway = HttpGateway::new(&config("http://localhost:8000")).unwrap();
        assert!(gateway.credential().is_none());
        gateway.set_credential(Some("abc".to_string()));
        assert_eq!(gateway.credential().as_deref(), Some("abc"));
        gateway.set_credential(None);
        assert!(gateway.credential().is_none());
    }
}
