use super::{SECTION_GAP, Styles};
use folio_layout::{LayoutEngine, LayoutError, SectionKind};
use folio_types::ContentModel;

/// Wrapped paragraph under a section heading. The paragraph breaks across
/// pages line by line.
pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let summary = content.summary.trim();
    if summary.is_empty() {
        return Ok(());
    }

    let style = Styles::from_theme(engine.theme()).body;
    let first_line = engine.line_height(style.size);
    engine.begin_section(SectionKind::Summary, engine.section_title_height() + first_line);
    engine.section_title(SectionKind::Summary.title())?;

    let (x, width) = (engine.content_left(), engine.inner_width());
    engine.wrapped_text(summary, x, style, width)?;
    engine.advance(SECTION_GAP);
    Ok(())
}
