//! In-memory gateway fake for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use scholar_client::gateway::{GatewayError, GatewayResult, ResourceGateway};

/// Canned response for one resource path.
#[derive(Clone)]
pub enum Canned {
    Json(Value),
    Bytes(Vec<u8>),
    Error { status: u16, message: String },
    Transport(String),
}

/// Route-table gateway. Every request is recorded so tests can assert on
/// what was (or was not) fetched.
#[derive(Default)]
pub struct FakeGateway {
    credential: RwLock<Option<String>>,
    routes: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub_json(&self, path: &str, value: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Json(value));
    }

    pub fn stub_bytes(&self, path: &str, bytes: &[u8]) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Bytes(bytes.to_vec()));
    }

    pub fn stub_error(&self, path: &str, status: u16, message: &str) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Canned::Error {
                status,
                message: message.to_string(),
            },
        );
    }

    pub fn stub_transport_failure(&self, path: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Transport(message.to_string()));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn resolve(&self, path: &str) -> GatewayResult<Canned> {
        self.requests.lock().unwrap().push(path.to_string());
        match self.routes.lock().unwrap().get(path) {
            Some(canned) => match canned {
                Canned::Error { status, message } => Err(GatewayError::Status {
                    status: *status,
                    message: message.clone(),
                }),
                Canned::Transport(message) => Err(GatewayError::Transport(message.clone())),
                other => Ok(other.clone()),
            },
            None => Err(GatewayError::Status {
                status: 404,
                message: format!("no stub for {}", path),
            }),
        }
    }
}

#[async_trait]
impl ResourceGateway for FakeGateway {
    fn set_credential(&self, token: Option<String>) {
        *self.credential.write().unwrap() = token;
    }

    fn credential(&self) -> Option<String> {
        self.credential.read().unwrap().clone()
    }

    async fn get_json(&self, path: &str, _query: &[(&str, String)]) -> GatewayResult<Value> {
        match self.resolve(path)? {
            Canned::Json(value) => Ok(value),
            _ => Err(GatewayError::Decode("stub is not JSON".to_string())),
        }
    }

    async fn post_json(&self, path: &str, _body: &Value) -> GatewayResult<Value> {
        match self.resolve(path)? {
            Canned::Json(value) => Ok(value),
            _ => Err(GatewayError::Decode("stub is not JSON".to_string())),
        }
    }

    async fn post_form(&self, path: &str, _form: &[(&str, String)]) -> GatewayResult<Value> {
        match self.resolve(path)? {
            Canned::Json(value) => Ok(value),
            _ => Err(GatewayError::Decode("stub is not JSON".to_string())),
        }
    }

    async fn get_bytes(&self, path: &str) -> GatewayResult<Bytes> {
        match self.resolve(path)? {
            Canned::Bytes(bytes) => Ok(Bytes::from(bytes)),
            _ => Err(GatewayError::Decode("stub is not binary".to_string())),
        }
    }
}
