//! Document vault models.
//!
//! Wire shapes follow the server's document endpoints: type definitions are
//! immutable reference data, uploads carry a tri-state verification flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin-defined category of required document (e.g. income certificate).
/// Fetched from `GET /documents/types`, never mutated by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeDefinition {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_file_type")]
    pub file_type: String,
    #[serde(default)]
    pub max_size_mb: i64,
    #[serde(default)]
    pub order_index: i64,
    #[serde(rename = "is_mandatory_vault", default)]
    pub is_mandatory: bool,
}

fn default_file_type() -> String {
    "pdf".to_string()
}

/// A student's uploaded document for one type.
///
/// `is_verified`: `None` = pending review, `Some(false)` = rejected and
/// requires re-upload, `Some(true)` = accepted. At most one active document
/// exists per (student, type); a re-upload replaces the prior record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: i64,
    #[serde(rename = "document_format_id")]
    pub document_type_id: i64,
    pub file_path: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedDocument {
    /// File name portion of the stored path, for display.
    pub fn display_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.file_path)
    }

    pub fn is_rejected(&self) -> bool {
        self.is_verified == Some(false)
    }
}
