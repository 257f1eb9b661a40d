//! TextMeasurer trait for abstracting font metrics.
//!
//! Line wrapping, badge widths and chip flow all depend on how wide a string
//! is in the target font. Keeping that behind a trait lets the layout engine
//! run against the built-in PDF base-14 metrics in production and against a
//! fixed-width measurer in tests.

use folio_types::FontWeight;
use std::fmt::Debug;

pub trait TextMeasurer: Send + Sync + Debug {
    /// Width of `text` in millimetres when set at `size` points.
    ///
    /// Implementations must be deterministic: the same arguments always yield
    /// the same width, since pre-measurement and drawing both rely on it.
    fn text_width(&self, text: &str, size: f32, weight: FontWeight) -> f32;

    /// Returns a human-readable name for this measurer (for logging/debugging).
    fn name(&self) -> &'static str;
}
