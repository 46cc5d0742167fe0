use crate::session::SessionError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Durable home of the bearer token
///
/// One slot, holding the raw token string. Implementations must treat
/// clearing an already-empty slot as success.
pub trait TokenStore: Send {
    fn load(&self) -> Result<Option<String>, SessionError>;

    fn save(&mut self, token: &str) -> Result<(), SessionError>;

    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Token kept in a single plain-text file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.storage_error(err)),
        }
    }

    fn save(&mut self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.storage_error(err))?;
            }
        }
        fs::write(&self.path, token).map_err(|err| self.storage_error(err))?;
        debug!(path = %self.path.display(), "token written");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error(err)),
        }
    }
}

/// In-process store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current contents of the slot.
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or_default()
    }

    fn set(&self, value: Option<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = value;
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.peek())
    }

    fn save(&mut self, token: &str) -> Result<(), SessionError> {
        self.set(Some(token.to_string()));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.set(None);
        Ok(())
    }
}
