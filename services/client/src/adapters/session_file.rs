//! services/client/src/adapters/session_file.rs
//!
//! A `SessionStore` persisted as a small JSON object on disk, keyed the way
//! the browser clients key local storage (`token`, `adminToken`). Tokens
//! survive restarts and are never validated here.

use coursify_core::domain::{Role, SessionToken};
use coursify_core::ports::{PortError, PortResult, SessionStore};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PortResult<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(storage_error)?;
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            PortError::Storage(format!("{} is not a session file: {}", self.path.display(), e))
        })
    }

    /// Writes through a sibling temp file and renames it over the target.
    /// The session file is never left half-written.
    fn save(&self, entries: &Entries) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(storage_error)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| PortError::Storage(e.to_string()))?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path).map_err(storage_error)?;
        tmp_file.write_all(raw.as_bytes()).map_err(storage_error)?;
        tmp_file.sync_all().map_err(storage_error)?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(storage_error)
    }

    fn temp_path(&self) -> PortResult<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            PortError::Storage(format!("{} has no file name", self.path.display()))
        })?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    /// Read-modify-write. An unreadable file is treated as empty and
    /// overwritten.
    fn update(&self, apply: impl FnOnce(&mut Entries)) -> PortResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PortError::Storage("session file lock poisoned".to_string()))?;
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "Discarding unreadable session file: {}", e);
            Entries::new()
        });
        apply(&mut entries);
        self.save(&entries)
    }
}

fn storage_error(e: std::io::Error) -> PortError {
    PortError::Storage(e.to_string())
}

impl SessionStore for FileSessionStore {
    fn get(&self, role: Role) -> PortResult<Option<SessionToken>> {
        Ok(self
            .load()?
            .remove(role.storage_key())
            .and_then(SessionToken::new))
    }

    fn set(&self, role: Role, token: SessionToken) -> PortResult<()> {
        debug!(key = role.storage_key(), "storing session token");
        self.update(|entries| {
            entries.insert(role.storage_key().to_string(), token.as_str().to_string());
        })
    }

    fn clear(&self, role: Role) -> PortResult<()> {
        debug!(key = role.storage_key(), "clearing session token");
        self.update(|entries| {
            entries.remove(role.storage_key());
        })
    }
}
