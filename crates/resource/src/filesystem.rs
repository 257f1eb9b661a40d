//! Filesystem-based artifact sink for native platforms.
//!
//! Files are written to a temporary file in the target directory and renamed
//! into place only once every byte has been written, so readers never observe
//! a partial document and a failed save leaves the directory untouched.
//!
//! # Security
//!
//! Artifact names must be plain file names. Anything containing a path
//! separator or a parent-directory component is rejected, which keeps every
//! write inside the configured directory.

use folio_traits::{ArtifactSink, SavedArtifact, SinkError};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Saves artifacts as files in a single directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Creates a sink writing into `dir`. The directory is created on the
    /// first save if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// A sink writing into the process's current directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Returns the directory this sink writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn validate_name(file_name: &str) -> Result<(), SinkError> {
        let invalid = || SinkError::InvalidName(file_name.to_string());
        if file_name.trim().is_empty() {
            return Err(invalid());
        }
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(invalid()),
        }
    }
}

impl ArtifactSink for FileSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArtifact, SinkError> {
        Self::validate_name(file_name)?;
        std::fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(file_name);
        let save_failed = |message: String| SinkError::SaveFailed {
            name: file_name.to_string(),
            message,
        };

        // Dropping the temp file on any error path removes it.
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&target)
            .map_err(|err| save_failed(err.error.to_string()))?;

        let location = target
            .canonicalize()
            .unwrap_or(target)
            .display()
            .to_string();
        log::info!("Saved {} ({} bytes) to {}", file_name, bytes.len(), location);

        Ok(SavedArtifact {
            location,
            byte_len: bytes.len(),
        })
    }

    fn name(&self) -> &'static str {
        "FileSink"
    }
}
