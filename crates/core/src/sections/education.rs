//! A single fixed-height education card with a status badge.

use super::{CARD_TITLE_SIZE, SECTION_GAP, Styles, fit_badge_text, fit_text};
use folio_layout::{BadgeAnchor, LayoutEngine, LayoutError, Role, SectionKind, TextStyle};
use folio_types::{ContentModel, Education};

const DETAIL_SIZE: f32 = 9.0;

fn is_empty(education: &Education) -> bool {
    [&education.degree, &education.institution, &education.track, &education.status]
        .iter()
        .all(|field| field.trim().is_empty())
}

/// Height of the card: padding, one title line and two detail lines.
pub fn card_height(engine: &LayoutEngine) -> f32 {
    2.0 * engine.config().card_padding + engine.line_height(CARD_TITLE_SIZE) + 2.0 * engine.line_height(DETAIL_SIZE)
}

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let Some(education) = content.education.as_ref().filter(|e| !is_empty(e)) else {
        return Ok(());
    };

    let styles = Styles::from_theme(engine.theme());
    let theme = *engine.theme();
    let padding = engine.config().card_padding;
    let gutter = engine.config().gutter;
    let height = card_height(engine);
    let x = engine.content_left();
    let width = engine.inner_width();
    let text_x = x + padding;
    let text_width = width - 2.0 * padding;

    let status = education.status.trim();
    let status = if status.is_empty() {
        String::new()
    } else {
        fit_badge_text(engine, status, styles.badge, width / 2.0)?
    };
    let badge_space = if status.is_empty() {
        0.0
    } else {
        engine.badge_width(&status, styles.badge)? + gutter
    };
    let degree = fit_text(engine, education.degree.trim(), styles.card_title, text_width - badge_space)?;
    let institution_style = TextStyle::regular(DETAIL_SIZE, theme.text);
    let track_style = TextStyle::regular(DETAIL_SIZE, theme.muted);
    let institution = fit_text(engine, education.institution.trim(), institution_style, text_width)?;
    let track = fit_text(engine, education.track.trim(), track_style, text_width)?;

    engine.begin_section(SectionKind::Education, engine.section_title_height() + height);
    engine.section_title(SectionKind::Education.title())?;
    engine.need_space(height);

    let top = engine.cursor().y;
    engine.card(x, top, width, height);

    let mut y = top + padding;
    engine.styled_text(&degree, text_x, y, styles.card_title, Role::Heading);
    if !status.is_empty() {
        engine.badge(&status, BadgeAnchor::Right(x + width - padding), y, styles.badge, theme.badge_fill)?;
    }
    y += engine.line_height(CARD_TITLE_SIZE);
    engine.styled_text(&institution, text_x, y, institution_style, Role::Body);
    y += engine.line_height(DETAIL_SIZE);
    engine.styled_text(&track, text_x, y, track_style, Role::Body);

    engine.advance(height + SECTION_GAP);
    Ok(())
}
