//! PDF renderer for folio documents using lopdf.
//!
//! Pages are converted to `lopdf` content streams and serialised by a small
//! buffered writer that emits objects in id order, so identical documents
//! always produce identical bytes.

mod helpers;
mod renderer;
mod writer;

pub use helpers::{FONT_BOLD, FONT_REGULAR, build_outlines, font_resource, page_content};
pub use renderer::LopdfRenderer;
pub use writer::PdfWriter;
