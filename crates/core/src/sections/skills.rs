//! Skill categories as a grid of cards, one category per card.

use super::{INNER_GAP, SECTION_GAP, Styles, column_width, draw_lines, lines_height, skill_columns};
use folio_layout::{LayoutEngine, LayoutError, Role, SectionKind};
use folio_types::{ContentModel, SkillCategory};

/// A card measured before anything is drawn.
struct MeasuredCard {
    title: Vec<String>,
    items: Vec<String>,
    height: f32,
}

/// `"Rust 90% · Go 80%"`.
pub fn format_skills(category: &SkillCategory) -> String {
    category
        .skills
        .iter()
        .map(|skill| format!("{} {}%", skill.name.trim(), skill.percent))
        .collect::<Vec<_>>()
        .join(" \u{00B7} ")
}

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let categories: Vec<&SkillCategory> = content
        .skills
        .iter()
        .filter(|category| !category.skills.is_empty())
        .collect();
    if categories.is_empty() {
        return Ok(());
    }

    let styles = Styles::from_theme(engine.theme());
    let padding = engine.config().card_padding;
    let gutter = engine.config().gutter;
    let cols = skill_columns(categories.len());
    let card_width = column_width(engine.inner_width(), cols, gutter);
    let text_width = card_width - 2.0 * padding;

    let mut cards = Vec::with_capacity(categories.len());
    for category in &categories {
        let title_style = styles.card_title;
        let title = engine.wrap(&category.name, title_style.size, title_style.weight, text_width)?;
        let items = engine.wrap(
            &format_skills(category),
            styles.small_muted.size,
            styles.small_muted.weight,
            text_width,
        )?;
        let height = 2.0 * padding
            + lines_height(engine, &title, title_style)
            + INNER_GAP
            + lines_height(engine, &items, styles.small_muted);
        cards.push(MeasuredCard { title, items, height });
    }

    let rows: Vec<&[MeasuredCard]> = cards.chunks(cols).collect();
    let row_height = |row: &[MeasuredCard]| row.iter().map(|c| c.height).fold(0.0_f32, f32::max);
    let first_row = rows.first().map_or(0.0, |row| row_height(row));

    engine.begin_section(SectionKind::Skills, engine.section_title_height() + first_row);
    engine.section_title(SectionKind::Skills.title())?;

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
            line_y += INNER_GAP;
            draw_lines(engine, &card.items, x, line_y, styles.small_muted, Role::Body);
        }

        engine.advance(height + gutter);
    }

    engine.advance(SECTION_GAP - gutter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::{fixed_engine, standard_engine};
    use crate::sections::{CARD_TITLE_SIZE, SMALL_SIZE};
    use folio_layout::{DrawOp, LayoutConfig};
    use folio_types::Skill;

    fn category(name: &str, skills: &[(&str, u32)]) -> SkillCategory {
        SkillCategory {
            name: name.into(),
            skills: skills
                .iter()
                .map(|(name, percent)| Skill {
                    name: (*name).into(),
                    percent: *percent,
                })
                .collect(),
        }
    }

    fn card_rects(doc: &folio_layout::Document) -> Vec<folio_types::Rect> {
        doc.ops_with_role(Role::Card).filter_map(|(_, op)| op.rect()).collect()
    }

    #[test]
    fn formats_items_with_percentages() {
        let c = category("Languages", &[("Rust", 90), ("Go", 80)]);
        assert_eq!(format_skills(&c), "Rust 90% \u{00B7} Go 80%");
    }

    #[test]
    fn three_categories_form_one_row_of_three() {
        let mut engine = standard_engine();
        let content = ContentModel {
            skills: vec![
                category("Languages", &[("Rust", 90), ("Go", 80), ("Python", 85)]),
                category("Infrastructure", &[("Kubernetes", 75), ("Terraform", 70), ("AWS", 80), ("Linux", 90)]),
                category("Security", &[("Threat modelling", 70), ("Cryptography", 65), ("AppSec", 60)]),
            ],
            ..Default::default()
        };
        render(&mut engine, &content).unwrap();
        let doc = engine.finish();

        let cards = card_rects(&doc);
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| c.y == cards[0].y && c.height == cards[0].height));
        let config = LayoutConfig::a4();
        let expected_width = (config.inner_width() - 2.0 * config.gutter) / 3.0;
        assert!((cards[0].width - expected_width).abs() < 1e-4);
        assert!((cards[2].right() - (config.margin + config.inner_width())).abs() < 1e-3);
    }

    #[test]
    fn card_height_matches_wrapped_content() {
        let mut engine = fixed_engine();
        let content = ContentModel {
            skills: vec![category("Languages", &[("Rust", 90)])],
            ..Default::default()
        };
        render(&mut engine, &content).unwrap();
        let doc = engine.finish();

        let config = LayoutConfig::a4();
        let card = card_rects(&doc)[0];
        let expected = 2.0 * config.card_padding
            + config.line_height(CARD_TITLE_SIZE)
            + INNER_GAP
            + config.line_height(SMALL_SIZE);
        assert!((card.height - expected).abs() < 1e-4);

        // Two columns for a single category, so the card is half width.
        assert!((card.width - (config.inner_width() - config.gutter) / 2.0).abs() < 1e-4);
    }

    #[test]
    fn five_categories_use_three_columns_over_two_rows() {
        let mut engine = fixed_engine();
        let content = ContentModel {
            skills: (0..5).map(|i| category(&format!("C{i}"), &[("x", 50)])).collect(),
            ..Default::default()
        };
        render(&mut engine, &content).unwrap();
        let doc = engine.finish();
        let cards = card_rects(&doc);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].y, cards[2].y);
        assert!(cards[3].y > cards[2].y);
    }

    #[test]
    fn backgrounds_precede_contents_in_each_row() {
        let mut engine = fixed_engine();
        let content = ContentModel {
            skills: vec![category("A", &[("x", 1)]), category("B", &[("y", 2)])],
            ..Default::default()
        };
        render(&mut engine, &content).unwrap();
        let doc = engine.finish();
        let ops: Vec<&DrawOp> = doc.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op.role(), Role::Card) || op.text().is_some_and(|t| t == "A" || t == "B"))
            .collect();
        let roles: Vec<Role> = ops.iter().map(|op| op.role()).collect();
        assert_eq!(roles, [Role::Card, Role::Card, Role::Heading, Role::Heading]);
    }

    #[test]
    fn categories_without_skills_are_omitted() {
        let mut engine = fixed_engine();
        let content = ContentModel {
            skills: vec![category("Empty", &[])],
            ..Default::default()
        };
        render(&mut engine, &content).unwrap();
        assert!(engine.finish().sections.is_empty());
    }
}
