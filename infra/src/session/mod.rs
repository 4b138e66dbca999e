//! JSON file storage for the persisted session

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lms_core::session::{PersistedSession, SessionStorage};
use lms_core::SessionError;
use tracing::debug;

/// Keeps the session in a JSON file, written atomically via a sibling temp file
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileSessionStorage {
    /// A missing file is an empty session
    fn load(&self) -> Result<PersistedSession, SessionError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(PersistedSession::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        let json = serde_json::to_vec_pretty(session)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}
