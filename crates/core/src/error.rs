use folio_layout::LayoutError;
use folio_render_core::RenderError;
use folio_traits::SinkError;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a document renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("Capability source '{source_name}' failed: {message}")]
    SourceFailed { source_name: String, message: String },

    #[error("Capability source '{source_name}' timed out after {timeout:?}")]
    TimedOut { source_name: String, timeout: Duration },

    #[error("Every capability source failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),

    #[error("No capability sources are configured")]
    NoSources,
}

/// Everything that can end an export early. This is the only error type that
/// reaches the orchestrator boundary.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF engine unavailable: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Saving failed: {0}")]
    Save(#[from] SinkError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// Short, actionable message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::Capability(_) => "PDF engine failed to load. Try the Print option instead.",
            _ => "PDF export failed. Try the Print option instead.",
        }
    }
}
