//! # folio-core
//!
//! The CV export subsystem:
//! - **sections**: one renderer per CV section, drawing through the layout engine
//! - **exporter**: the orchestrator that sequences capability loading, layout,
//!   rendering and saving behind a single busy flag
//! - **capability**: acquisition of the document renderer with timeouts and fallback
//! - **feedback**: transient toast state surfaced to the user
//! - **error**: error types for the export pipeline
//!
//! ## Design Principle
//!
//! Platform concerns reach this crate only through traits: text measurement
//! and saving come from `folio-traits`, rendering from `folio-render-core`.

// Re-export foundation crates
pub use folio_layout as layout;
pub use folio_traits as traits;
pub use folio_types as types;

pub mod capability;
pub mod error;
pub mod exporter;
pub mod feedback;
pub mod sections;

pub use capability::{CapabilityLoader, FallbackLoader, StaticLoader};
pub use error::{CapabilityError, ExportError};
pub use exporter::{ExportConfig, ExportOutcome, ExportReport, Exporter, build_document};
pub use feedback::{Toast, ToastKind, Toaster};
