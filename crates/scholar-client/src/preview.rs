//! Preview resource management.
//!
//! Fetches protected binary content and materializes it as a transient local
//! file the viewer can open. The backing file is an OS-level resource, so
//! release is explicit: `PreviewHandle::close` consumes the handle, which
//! makes a double release unrepresentable, and `PreviewSlot` retires the
//! previous handle exactly once when a preview is replaced.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use scholar_core::PortalError;

use crate::gateway::ResourceGateway;

/// Content kind inferred from the stored file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
    /// Rendered as a generic "open externally" affordance, never an error.
    Unknown,
}

/// Infer the preview kind from a file name or storage key.
pub fn infer_kind(file_name: &str) -> PreviewKind {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => PreviewKind::Pdf,
        Some("jpg") | Some("jpeg") | Some("png") | Some("gif") => PreviewKind::Image,
        _ => PreviewKind::Unknown,
    }
}

/// Request to preview one protected document.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    /// Gateway resource path of the binary content.
    pub resource_path: String,
    /// Stored file name; drives kind inference and display.
    pub display_name: String,
}

/// Transient, locally addressable view of fetched binary content.
///
/// Exclusively owned by the component that requested it. `close` must be
/// called on every exit path; dropping an unclosed handle still removes the
/// backing file but logs the defect.
pub struct PreviewHandle {
    file: Option<NamedTempFile>,
    path: PathBuf,
    pub kind: PreviewKind,
    pub display_name: String,
}

impl PreviewHandle {
    /// Local path of the materialized content, valid until `close`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the backing file. Consuming `self` makes a second release
    /// impossible to express.
    pub fn close(mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                tracing::warn!(error = %e, "failed to remove preview file");
            }
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            tracing::warn!(
                name = %self.display_name,
                "preview handle dropped without close; releasing backing file"
            );
            drop(file);
        }
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Single-owner-at-a-time holder for the active preview of one view.
///
/// Opening a replacement retires the previous handle exactly once; closing an
/// empty slot is a no-op. The owning view calls `close` on unmount.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    active: Option<PreviewHandle>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new handle, retiring the currently active one if present.
    pub fn replace(&mut self, handle: PreviewHandle) {
        if let Some(previous) = self.active.take() {
            previous.close();
        }
        self.active = Some(handle);
    }

    /// Retire the active handle, if any. Idempotent.
    pub fn close(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.close();
        }
    }

    pub fn active(&self) -> Option<&PreviewHandle> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}

/// Fetches protected documents and wraps them in preview handles.
pub struct PreviewManager {
    gateway: Arc<dyn ResourceGateway>,
}

impl PreviewManager {
    pub fn new(gateway: Arc<dyn ResourceGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the document and materialize it as a viewable handle.
    ///
    /// An empty reference short-circuits before any fetch. Gateway failures
    /// (401/404/5xx alike) surface as a single retryable `PreviewFetch`
    /// error; on that path no temp file exists yet, so nothing dangles.
    pub async fn open(&self, request: &PreviewRequest) -> Result<PreviewHandle, PortalError> {
        if request.resource_path.trim().is_empty() {
            return Err(PortalError::Validation(
                "document has no stored file to preview".to_string(),
            ));
        }

        let kind = infer_kind(&request.display_name);

        let content = self
            .gateway
            .get_bytes(&request.resource_path)
            .await
            .map_err(|e| PortalError::PreviewFetch(e.to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix("scholar-preview-")
            .suffix(&extension_suffix(&request.display_name))
            .tempfile()
            .map_err(|e| PortalError::PreviewFetch(format!("failed to stage preview: {}", e)))?;

        // A write failure drops the NamedTempFile, which removes the file.
        file.as_file_mut()
            .write_all(&content)
            .map_err(|e| PortalError::PreviewFetch(format!("failed to stage preview: {}", e)))?;

        let path = file.path().to_path_buf();
        tracing::debug!(name = %request.display_name, ?kind, "preview staged");

        Ok(PreviewHandle {
            file: Some(file),
            path,
            kind,
            display_name: request.display_name.clone(),
        })
    }
}

/// Keep the original extension on the temp file so external viewers can
/// dispatch on it.
fn extension_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
