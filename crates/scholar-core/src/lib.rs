//! Scholar Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! pure view-state derivations (document ledger, application progress) shared
//! by the portal client and CLI.

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod progress;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::PortalError;
pub use ledger::{build_vault_view, rejected_count, VaultSlot, VaultView};
pub use progress::{
    can_request_correction, correction_context, presentation, progress_percent, stage_index,
    CorrectionContext, Severity, StatusPresentation, TOTAL_STAGES,
};
