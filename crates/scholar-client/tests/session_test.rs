mod support;

use std::path::PathBuf;
use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use scholar_client::{CredentialStore, PortalApi, SessionContext};
use scholar_core::models::{Claims, Role};
use scholar_core::{ClientConfig, PortalError};

use support::FakeGateway;

const LOGIN_PATH: &str = "/api/v1/auth/login/access-token";
const GOOGLE_PATH: &str = "/api/v1/auth/login/google";

fn config(credential_path: PathBuf) -> ClientConfig {
    ClientConfig {
        base_url: "http://localhost:8000".to_string(),
        api_version: "v1".to_string(),
        request_timeout_secs: 60,
        credential_path,
    }
}

fn context(dir: &tempfile::TempDir) -> (Arc<FakeGateway>, SessionContext, PathBuf) {
    let token_path = dir.path().join("token");
    let cfg = config(token_path.clone());
    let gateway = Arc::new(FakeGateway::new());
    let api = PortalApi::new(gateway.clone(), &cfg);
    let session = SessionContext::new(api, CredentialStore::new(token_path.clone()));
    (gateway, session, token_path)
}

fn mint_token(sub: &str, role: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        role: role.to_string(),
        exp: Some(4_102_444_800), // far future
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

#[tokio::test]
async fn login_decodes_identity_and_routes_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, token_path) = context(&dir);
    gateway.stub_json(
        LOGIN_PATH,
        json!({ "access_token": mint_token("a@b.com", "dept_head") }),
    );

    let identity = session.login("a@b.com", "pw").await.unwrap();

    assert_eq!(identity.id, "a@b.com");
    assert_eq!(identity.email, "a@b.com");
    assert_eq!(identity.role, Role::DeptHead);
    assert_eq!(identity.role.dashboard_route(), "/dept-dashboard");

    // Session state is established: identity, gateway credential, persisted token.
    assert!(session.is_authenticated());
    assert!(session.is_ready());
    assert!(scholar_client::ResourceGateway::credential(gateway.as_ref()).is_some());
    assert!(token_path.exists());
}

#[tokio::test]
async fn login_failure_propagates_server_message() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, token_path) = context(&dir);
    gateway.stub_error(LOGIN_PATH, 400, "Incorrect email or password");

    let err = session.login("a@b.com", "wrong").await.unwrap_err();
    match err {
        PortalError::Auth(message) => assert_eq!(message, "Incorrect email or password"),
        other => panic!("expected Auth error, got {:?}", other),
    }
    assert!(!session.is_authenticated());
    assert!(!token_path.exists());
}

#[tokio::test]
async fn login_network_failure_uses_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, _) = context(&dir);
    gateway.stub_transport_failure(LOGIN_PATH, "connection refused");

    let err = session.login("a@b.com", "pw").await.unwrap_err();
    match err {
        PortalError::Auth(message) => assert_eq!(message, "Invalid credentials. Please try again."),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn google_login_same_contract() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, _) = context(&dir);
    gateway.stub_json(
        GOOGLE_PATH,
        json!({ "access_token": mint_token("s@uni.edu", "student") }),
    );

    let identity = session.login_with_google("federated-credential").await.unwrap();
    assert_eq!(identity.role, Role::Student);
    assert_eq!(identity.role.dashboard_route(), "/dashboard");
}

#[tokio::test]
async fn hydrate_restores_session_from_stored_token() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, token_path) = context(&dir);
    std::fs::write(&token_path, mint_token("a@b.com", "goffice")).unwrap();

    session.hydrate();

    assert!(session.is_ready());
    let identity = session.identity().unwrap();
    assert_eq!(identity.role, Role::Goffice);
    assert!(scholar_client::ResourceGateway::credential(gateway.as_ref()).is_some());
}

#[tokio::test]
async fn hydrate_discards_corrupted_token_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (_gateway, session, token_path) = context(&dir);
    std::fs::write(&token_path, "garbage-not-a-jwt").unwrap();

    session.hydrate();

    assert!(session.is_ready());
    assert!(!session.is_authenticated());
    assert!(!token_path.exists(), "corrupted credential must be removed");
}

#[tokio::test]
async fn hydrate_with_no_stored_token_is_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let (_gateway, session, _) = context(&dir);

    assert!(!session.is_ready());
    session.hydrate();
    assert!(session.is_ready());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_is_idempotent_and_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let (gateway, session, token_path) = context(&dir);
    gateway.stub_json(
        LOGIN_PATH,
        json!({ "access_token": mint_token("a@b.com", "admin") }),
    );
    session.login("a@b.com", "pw").await.unwrap();
    assert!(token_path.exists());

    let route = session.logout();
    assert_eq!(route, "/login");
    assert!(!session.is_authenticated());
    assert!(!token_path.exists());
    assert!(scholar_client::ResourceGateway::credential(gateway.as_ref()).is_none());

    // No active session: still a no-op other than the route.
    assert_eq!(session.logout(), "/login");
}
