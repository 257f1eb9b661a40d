//! Artifact sinks for the folio exporter.
//!
//! This crate provides platform-specific implementations of the
//! `ArtifactSink` trait from folio-traits.
//!
//! ## Available Sinks
//!
//! - [`FileSink`]: Writes finished documents into a directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory sink from folio-traits:
//! - [`InMemorySink`]: Keeps artifacts in memory

mod filesystem;

pub use filesystem::FileSink;

// Re-export the in-memory sink from folio-traits for convenience
pub use folio_traits::InMemorySink;
