//! Document ledger: derived vault state.
//!
//! Pure functions over the fetched type definitions and the student's
//! uploads. No function here fails or touches I/O; submission gating and
//! verification are the server's concern, the ledger only reports.

use crate::models::{DocumentTypeDefinition, UploadedDocument};

/// One vault slot: a document type and the student's upload for it, if any.
#[derive(Debug, Clone)]
pub struct VaultSlot {
    pub definition: DocumentTypeDefinition,
    pub upload: Option<UploadedDocument>,
}

impl VaultSlot {
    /// A slot is satisfied by any upload regardless of verification state;
    /// verification is a downstream reviewer action, not a completeness gate.
    pub fn is_satisfied(&self) -> bool {
        self.upload.is_some()
    }
}

/// Derived vault view: one slot per type, in stable presentation order.
#[derive(Debug, Clone)]
pub struct VaultView {
    pub slots: Vec<VaultSlot>,
}

impl VaultView {
    pub fn uploaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_satisfied()).count()
    }

    /// Upload coverage ratio in [0, 1]. An empty type list counts as full
    /// coverage (nothing is required).
    pub fn coverage(&self) -> f64 {
        if self.slots.is_empty() {
            return 1.0;
        }
        self.uploaded_count() as f64 / self.slots.len() as f64
    }

    /// Mandatory types with no upload, in presentation order. A non-empty
    /// result means the vault cannot back a submission yet.
    pub fn missing_mandatory(&self) -> Vec<&DocumentTypeDefinition> {
        self.slots
            .iter()
            .filter(|s| s.definition.is_mandatory && s.upload.is_none())
            .map(|s| &s.definition)
            .collect()
    }
}

/// Build the vault view for a set of type definitions and uploads.
///
/// Slots are ordered by `order_index` ascending, ties broken by `id`
/// ascending, so presentation order is reproducible regardless of fetch
/// order. When the input carries more than one upload for a type (a replaced
/// re-upload still in flight server-side), the most recent `uploaded_at`
/// wins, with the higher id as the final tie-break.
pub fn build_vault_view(
    types: &[DocumentTypeDefinition],
    uploads: &[UploadedDocument],
) -> VaultView {
    let mut ordered: Vec<&DocumentTypeDefinition> = types.iter().collect();
    ordered.sort_by_key(|t| (t.order_index, t.id));

    let slots = ordered
        .into_iter()
        .map(|definition| {
            let upload = uploads
                .iter()
                .filter(|u| u.document_type_id == definition.id)
                .max_by_key(|u| (u.uploaded_at, u.id))
                .cloned();
            VaultSlot {
                definition: definition.clone(),
                upload,
            }
        })
        .collect();

    VaultView { slots }
}

/// Count of documents rejected by a reviewer (re-upload required).
pub fn rejected_count(documents: &[UploadedDocument]) -> usize {
    documents
        .iter()
        .filter(|d| d.is_verified == Some(false))
        .count()
}
