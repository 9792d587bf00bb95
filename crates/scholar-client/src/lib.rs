//! Scholar portal client.
//!
//! Everything between the UI and the server: the resource fetch gateway and
//! its HTTP implementation, the typed endpoint surface, the identity session
//! context, credential persistence, and preview resource management.

pub mod api;
pub mod credentials;
pub mod gateway;
pub mod http;
pub mod preview;
pub mod session;

// Re-export commonly used types
pub use api::{PortalApi, TokenResponse};
pub use credentials::CredentialStore;
pub use gateway::{GatewayError, GatewayResult, ResourceGateway};
pub use http::HttpGateway;
pub use preview::{
    infer_kind, PreviewHandle, PreviewKind, PreviewManager, PreviewRequest, PreviewSlot,
};
pub use session::SessionContext;
