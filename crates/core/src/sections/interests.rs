//! Interests as a wrapping flow of tag chips.

use super::{SECTION_GAP, SMALL_SIZE, non_blank};
use folio_layout::{LayoutEngine, LayoutError, SectionKind, TextStyle};
use folio_types::ContentModel;

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let tags = non_blank(&content.interests);
    if tags.is_empty() {
        return Ok(());
    }

    let style = TextStyle::regular(SMALL_SIZE, engine.theme().text);
    let first_row = engine.config().chip_height;
    engine.begin_section(SectionKind::Interests, engine.section_title_height() + first_row);
    engine.section_title(SectionKind::Interests.title())?;
    engine.chips(&tags, style)?;
    engine.advance(SECTION_GAP - engine.config().gutter);
    Ok(())
}
