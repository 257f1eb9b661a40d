//! ArtifactSink trait for abstracting where a finished document goes.
//!
//! In a browser this is the download prompt; natively it is a file in a
//! directory; in tests it is memory. The exporter only sees this trait.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for artifact saving operations.
#[derive(Error, Debug, Clone)]
pub enum SinkError {
    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    #[error("Failed to save artifact '{name}': {message}")]
    SaveFailed { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err.to_string())
    }
}

/// Shared artifact bytes (reference-counted).
pub type SharedArtifactData = Arc<Vec<u8>>;

/// Where a saved artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    /// Sink-specific location, e.g. an absolute path or a memory key.
    pub location: String,
    pub byte_len: usize,
}

/// A destination for finished documents.
///
/// Implementations must either store the complete artifact or nothing at all:
/// a failed save may not leave a truncated file behind.
pub trait ArtifactSink: Send + Sync + Debug {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArtifact, SinkError>;

    /// Returns a human-readable name for this sink (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Keeps saved artifacts in memory. Works everywhere and is what tests use.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: RwLock<HashMap<String, SharedArtifactData>>,
    saves: RwLock<Vec<String>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes last saved under `name`, if any.
    pub fn get(&self, name: &str) -> Option<SharedArtifactData> {
        self.artifacts.read().ok()?.get(name).cloned()
    }

    /// Names of every save in call order, including overwrites.
    pub fn save_log(&self) -> Vec<String> {
        self.saves.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.artifacts.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.artifacts.read().map(|a| a.is_empty()).unwrap_or(true)
    }
}

impl ArtifactSink for InMemorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArtifact, SinkError> {
        if file_name.trim().is_empty() {
            return Err(SinkError::InvalidName(file_name.to_string()));
        }
        let poisoned = || SinkError::SaveFailed {
            name: file_name.to_string(),
            message: "artifact store lock poisoned".to_string(),
        };
        self.artifacts
            .write()
            .map_err(|_| poisoned())?
            .insert(file_name.to_string(), Arc::new(bytes.to_vec()));
        self.saves
            .write()
            .map_err(|_| poisoned())?
            .push(file_name.to_string());
        Ok(SavedArtifact {
            location: format!("memory://{}", file_name),
            byte_len: bytes.len(),
        })
    }

    fn name(&self) -> &'static str {
        "InMemorySink"
    }
}
