//! Typed endpoint methods over the resource fetch gateway.
//!
//! Thin layer: build the path, issue the request, deserialize into the core
//! models, and map gateway failures into the `PortalError` taxonomy.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use scholar_core::models::{
    AcademicSession, Application, Branch, Department, DocumentTypeDefinition, Scholarship,
    UploadedDocument, UserAccount,
};
use scholar_core::{ClientConfig, PortalError};

use crate::gateway::{GatewayError, ResourceGateway};

const GENERIC_AUTH_MESSAGE: &str = "Invalid credentials. Please try again.";

/// Token envelope returned by both login endpoints.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Typed API surface of the portal server.
#[derive(Clone)]
pub struct PortalApi {
    gateway: Arc<dyn ResourceGateway>,
    prefix: String,
}

impl PortalApi {
    pub fn new(gateway: Arc<dyn ResourceGateway>, config: &ClientConfig) -> Self {
        Self {
            gateway,
            prefix: config.api_prefix(),
        }
    }

    pub fn gateway(&self) -> Arc<dyn ResourceGateway> {
        Arc::clone(&self.gateway)
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        suffix: &str,
        query: &[(&str, String)],
    ) -> Result<T, PortalError> {
        let value = self
            .gateway
            .get_json(&self.path(suffix), query)
            .await
            .map_err(fetch_error)?;
        decode(value)
    }

    /// Exchange credentials for an access token. The server's rejection
    /// message is propagated verbatim when present.
    pub async fn login_access_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, PortalError> {
        let form = [
            ("username", username.to_string()),
            ("password", password.to_string()),
        ];
        let value = self
            .gateway
            .post_form(&self.path("/auth/login/access-token"), &form)
            .await
            .map_err(auth_error)?;
        decode(value)
    }

    /// Exchange a pre-issued federated (Google) token for an access token.
    pub async fn login_google(&self, token: &str) -> Result<TokenResponse, PortalError> {
        let value = self
            .gateway
            .post_json(&self.path("/auth/login/google"), &json!({ "token": token }))
            .await
            .map_err(auth_error)?;
        decode(value)
    }

    /// Fetch the student profile. A 404 means the profile has not been
    /// created yet and is a normal outcome, not an error.
    pub async fn my_profile(&self) -> Result<Option<UserAccount>, PortalError> {
        match self.gateway.get_json(&self.path("/profile/me"), &[]).await {
            Ok(value) => decode(value).map(Some),
            Err(GatewayError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(fetch_error(e)),
        }
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, PortalError> {
        self.get("/applications/", &[]).await
    }

    pub async fn get_application(&self, id: i64) -> Result<Application, PortalError> {
        self.get(&format!("/applications/{}", id), &[]).await
    }

    /// Server-merged application PDF (all verified documents in one file).
    pub async fn application_pdf(&self, id: i64) -> Result<Bytes, PortalError> {
        self.gateway
            .get_bytes(&self.path(&format!("/applications/{}/pdf", id)))
            .await
            .map_err(fetch_error)
    }

    pub async fn document_types(&self) -> Result<Vec<DocumentTypeDefinition>, PortalError> {
        self.get("/documents/types", &[]).await
    }

    pub async fn my_documents(&self) -> Result<Vec<UploadedDocument>, PortalError> {
        self.get("/documents/", &[]).await
    }

    /// Resource path for a vault document's binary preview.
    pub fn document_preview_path(&self, document_id: i64) -> String {
        self.path(&format!("/documents/{}/preview", document_id))
    }

    /// Resource path for an application document's binary preview.
    pub fn application_document_preview_path(&self, document_id: i64) -> String {
        self.path(&format!("/applications/documents/{}/preview", document_id))
    }

    pub async fn list_scholarships(&self) -> Result<Vec<Scholarship>, PortalError> {
        self.get("/scholarships/", &[]).await
    }

    pub async fn get_scholarship(&self, id: i64) -> Result<Scholarship, PortalError> {
        self.get(&format!("/scholarships/{}", id), &[]).await
    }

    pub async fn departments(&self) -> Result<Vec<Department>, PortalError> {
        self.get("/university/departments", &[]).await
    }

    pub async fn academic_sessions(&self) -> Result<Vec<AcademicSession>, PortalError> {
        self.get("/university/sessions", &[]).await
    }

    pub async fn branches(&self, department_id: i64) -> Result<Vec<Branch>, PortalError> {
        self.get(
            "/university/branches",
            &[("department_id", department_id.to_string())],
        )
        .await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, PortalError> {
    serde_json::from_value(value)
        .map_err(|e| PortalError::Fetch(format!("failed to decode response: {}", e)))
}

fn fetch_error(err: GatewayError) -> PortalError {
    match err {
        GatewayError::Status { status: 401, message } => PortalError::Auth(auth_message(message)),
        other => PortalError::Fetch(other.to_string()),
    }
}

fn auth_error(err: GatewayError) -> PortalError {
    match err {
        GatewayError::Status { message, .. } => PortalError::Auth(auth_message(message)),
        _ => PortalError::Auth(GENERIC_AUTH_MESSAGE.to_string()),
    }
}

fn auth_message(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_AUTH_MESSAGE.to_string()
    } else {
        message
    }
}
