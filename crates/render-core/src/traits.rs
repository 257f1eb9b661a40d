use crate::error::RenderError;
use folio_layout::Document;

/// Turns a laid-out [`Document`] into the bytes of an output file.
///
/// This is the capability the exporter acquires before building a document.
/// Implementations must be deterministic: rendering the same document twice
/// yields identical bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}
