//! Application models.
//!
//! The server owns application state; the client holds a read-mostly snapshot
//! and never advances or rewinds `status` locally, only re-fetches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-reported application status. `Unknown` absorbs any status string a
/// newer server may emit so deserialization stays total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    UnderVerification,
    DocsRequired,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    /// Terminal statuses never change again server-side.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

/// Document attached to one application, with the reviewer's verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub id: i64,
    pub document_format_id: i64,
    pub file_path: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Snapshot of one scholarship application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub scholarship_id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
