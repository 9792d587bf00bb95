//! Persisted credential storage.
//!
//! A single token string under a well-known path. Every failure here is soft:
//! the in-memory identity is the authoritative session state, so storage
//! problems degrade to "not remembered across restarts", never to a crash.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-backed store for the one persisted credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored credential. Absence or unreadability both yield `None`.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read stored credential");
                None
            }
        }
    }

    /// Persist the credential. Failure is logged and ignored.
    pub fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "failed to create credential directory");
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist credential");
        }
    }

    /// Remove the stored credential. Already-absent is a no-op.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to clear stored credential");
            }
        }
    }
}
