use crate::document::{Document, DrawOp};
use crate::engine::LayoutEngine;
use crate::fonts::FixedWidthMetrics;
use crate::theme::Theme;
use crate::LayoutConfig;
use folio_traits::TextMeasurer;
use std::sync::Arc;

/// Every character measures 1mm, so expected wraps can be worked out by hand.
pub fn create_test_engine() -> LayoutEngine {
    create_engine_with(LayoutConfig::a4(), Arc::new(FixedWidthMetrics::new(1.0)))
}

pub fn create_engine_with(config: LayoutConfig, measurer: Arc<dyn TextMeasurer>) -> LayoutEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    LayoutEngine::new(config, Theme::dark(), measurer)
}

/// Content operations that leave the vertical content region of their page.
pub fn ops_outside_content_region(doc: &Document) -> Vec<(usize, DrawOp)> {
    let top = doc.margin;
    let bottom = doc.size.height - doc.margin;
    doc.content_ops()
        .filter(|(_, op)| op.top() < top - 1e-3 || op.bottom() > bottom + 1e-3)
        .map(|(page, op)| (page, op.clone()))
        .collect()
}

/// Always reports a NaN width.
#[derive(Debug)]
pub struct BrokenMeasurer;

impl TextMeasurer for BrokenMeasurer {
    fn text_width(&self, _text: &str, _size: f32, _weight: folio_types::FontWeight) -> f32 {
        f32::NAN
    }

    fn name(&self) -> &'static str {
        "BrokenMeasurer"
    }
}
