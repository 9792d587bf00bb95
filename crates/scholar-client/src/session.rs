//! Identity session context.
//!
//! One `SessionContext` is constructed at process start and injected into
//! everything that needs the current identity; the lifecycle calls (`hydrate`,
//! `login`, `login_with_google`, `logout`) are its only mutators.
//!
//! The role embedded in the credential is trusted for routing and display
//! only. It is not a security boundary: the server re-checks authorization on
//! every request, and a tampered role claim buys nothing but a 403.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use scholar_core::models::user::LOGIN_ROUTE;
use scholar_core::models::{Claims, Identity};
use scholar_core::PortalError;

use crate::api::PortalApi;
use crate::credentials::CredentialStore;

/// Process-wide session state. `hydrate` must run to completion before any
/// protected view consults the context; `is_ready` is that ordering barrier.
pub struct SessionContext {
    api: PortalApi,
    credentials: CredentialStore,
    identity: RwLock<Option<Identity>>,
    ready: AtomicBool,
}

impl SessionContext {
    pub fn new(api: PortalApi, credentials: CredentialStore) -> Self {
        Self {
            api,
            credentials,
            identity: RwLock::new(None),
            ready: AtomicBool::new(false),
        }
    }

    /// Restore a session from the persisted credential, if one decodes.
    ///
    /// Fails silently: a corrupted or stale token is discarded and the
    /// session starts unauthenticated. Always leaves the context ready.
    pub fn hydrate(&self) {
        if let Some(token) = self.credentials.load() {
            match decode_claims(&token) {
                Ok(claims) => {
                    self.api.gateway().set_credential(Some(token));
                    self.set_identity(Some(claims.into()));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stored credential did not decode; discarding");
                    self.credentials.clear();
                    self.set_identity(None);
                }
            }
        }
        self.ready.store(true, Ordering::Release);
    }

    /// Authenticate with email and password. Returns the decoded identity so
    /// the caller can route by role.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, PortalError> {
        let token = self.api.login_access_token(email, password).await?;
        self.establish(token.access_token)
    }

    /// Authenticate with a pre-issued federated token. Same contract as
    /// [`SessionContext::login`].
    pub async fn login_with_google(&self, token: &str) -> Result<Identity, PortalError> {
        let token = self.api.login_google(token).await?;
        self.establish(token.access_token)
    }

    /// End the session. Idempotent; returns the unauthenticated entry route.
    pub fn logout(&self) -> &'static str {
        self.credentials.clear();
        self.api.gateway().set_credential(None);
        self.set_identity(None);
        LOGIN_ROUTE
    }

    /// The current identity, if a session is active.
    pub fn identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Whether `hydrate` has completed. Protected views must not mount
    /// before this turns true.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn api(&self) -> &PortalApi {
        &self.api
    }

    fn establish(&self, token: String) -> Result<Identity, PortalError> {
        let claims = decode_claims(&token)
            .map_err(|e| PortalError::Auth(format!("unusable access token: {}", e)))?;

        // Persistence failure is soft: the in-memory identity still stands.
        self.credentials.save(&token);
        self.api.gateway().set_credential(Some(token));

        let identity = Identity::from(claims);
        self.set_identity(Some(identity.clone()));
        self.ready.store(true, Ordering::Release);
        Ok(identity)
    }

    fn set_identity(&self, identity: Option<Identity>) {
        let mut slot = self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = identity;
    }
}

/// Decode the credential payload without verifying the signature.
///
/// The server signs and validates tokens; the client only needs the claims
/// for routing, so signature and expiry checks are deliberately skipped (an
/// expired token simply earns a 401 on first use).
fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
