//! Engineering exposure areas as a grid of bulleted cards.

use super::projects::BULLET_INDENT;
use super::{INNER_GAP, SECTION_GAP, Styles, column_width, draw_lines, lines_height, non_blank};
use folio_layout::{LayoutEngine, LayoutError, PT_TO_MM, Role, SectionKind};
use folio_types::{ContentModel, ExposureArea};

const MAX_COLUMNS: usize = 3;

struct MeasuredArea {
    title: Vec<String>,
    points: Vec<Vec<String>>,
    height: f32,
}

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let areas: Vec<&ExposureArea> = content
        .exposure
        .iter()
        .filter(|area| !area.title.trim().is_empty() || !non_blank(&area.points).is_empty())
        .collect();
    if areas.is_empty() {
        return Ok(());
    }

    let styles = Styles::from_theme(engine.theme());
    let padding = engine.config().card_padding;
    let gutter = engine.config().gutter;
    let cols = areas.len().min(MAX_COLUMNS);
    let card_width = column_width(engine.inner_width(), cols, gutter);
    let text_width = card_width - 2.0 * padding;
    let point_style = styles.small_muted;

    let mut cards = Vec::with_capacity(areas.len());
    for area in &areas {
        let title = engine.wrap(&area.title, styles.card_title.size, styles.card_title.weight, text_width)?;
        let mut points = Vec::new();
        for point in non_blank(&area.points) {
            points.push(engine.wrap(&point, point_style.size, point_style.weight, text_width - BULLET_INDENT)?);
        }

        let mut height = 2.0 * padding + lines_height(engine, &title, styles.card_title);
        if !points.is_empty() {
            height += INNER_GAP;
            height += points.iter().map(|lines| lines_height(engine, lines, point_style)).sum::<f32>();
        }
        cards.push(MeasuredArea { title, points, height });
    }

    let row_height = |row: &[MeasuredArea]| row.iter().map(|c| c.height).fold(0.0_f32, f32::max);
    let rows: Vec<&[MeasuredArea]> = cards.chunks(cols).collect();
    let first_row = rows.first().map_or(0.0, |row| row_height(row));

    engine.begin_section(SectionKind::Exposure, engine.section_title_height() + first_row);
    engine.section_title(SectionKind::Exposure.title())?;

    let marker_offset = point_style.size * PT_TO_MM / 2.0;
    for row in rows {
        let height = row_height(row);
        engine.need_space(height);
        let y = engine.cursor().y;
        let left = engine.content_left();
        let x_of = |col: usize| left + col as f32 * (card_width + gutter);

        for col in 0..row.len() {
            engine.card(x_of(col), y, card_width, height);
        }
        for (col, card) in row.iter().enumerate() {
            let x = x_of(col) + padding;
            let mut line_y = y + padding;
            line_y += draw_lines(engine, &card.title, x, line_y, styles.card_title, Role::Heading);
            if card.points.is_empty() {
                continue;
            }
            line_y += INNER_GAP;
            for lines in &card.points {
                engine.bullet(x + BULLET_INDENT / 2.0, line_y + marker_offset);
                line_y += draw_lines(engine, lines, x + BULLET_INDENT, line_y, point_style, Role::Body);
            }
        }

        engine.advance(height + gutter);
    }

    engine.advance(SECTION_GAP - gutter);
    Ok(())
}
