//! Core rendering abstractions for folio.
//!
//! This crate provides the seam between layout and output formats:
//! - `DocumentRenderer`, the rendering capability the exporter acquires at runtime
//! - Error types for rendering operations
//! - Shared utilities for unit conversion and text encoding

mod error;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use traits::DocumentRenderer;
