//! Closing tri-colour bar and attribution line.

use super::SMALL_SIZE;
use folio_layout::{LayoutEngine, LayoutError, Role, SectionKind, TextStyle};
use folio_types::{ContentModel, Rect};

const BAR_HEIGHT: f32 = 1.2;
const BAR_GAP: f32 = 3.0;

/// `"Generated from Ada's portfolio"`, or a neutral line without a name.
pub fn attribution(content: &ContentModel) -> String {
    match content.name.trim() {
        "" => "Generated from portfolio".to_string(),
        name => format!("Generated from {name}'s portfolio"),
    }
}

/// Always drawn, even for an otherwise empty content model.
pub fn render(engine: &mut LayoutEngine, content: &ContentModel, footer_text: Option<&str>) -> Result<(), LayoutError> {
    let text = match footer_text.map(str::trim) {
        Some(custom) if !custom.is_empty() => custom.to_string(),
        _ => attribution(content),
    };
    let style = TextStyle::regular(SMALL_SIZE, engine.theme().muted);
    let height = BAR_HEIGHT + BAR_GAP + engine.line_height(style.size);

    engine.begin_section(SectionKind::Footer, height);

    let y = engine.cursor().y;
    let left = engine.content_left();
    let segment = engine.inner_width() / 3.0;
    let stops = engine.theme().accent_stops();
    for (i, color) in stops.into_iter().enumerate() {
        let rect = Rect::new(left + i as f32 * segment, y, segment, BAR_HEIGHT);
        engine.fill_rect(rect, color, Role::Footer);
    }
    engine.advance(BAR_HEIGHT + BAR_GAP);
    engine.text_centered(&text, style, Role::Footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::fixed_engine;
    use folio_layout::DrawOp;

    #[test]
    fn attribution_uses_the_name() {
        let content = ContentModel {
            name: " Ada ".into(),
            ..Default::default()
        };
        assert_eq!(attribution(&content), "Generated from Ada's portfolio");
        assert_eq!(attribution(&ContentModel::default()), "Generated from portfolio");
    }

    #[test]
    fn bar_spans_the_content_width_in_three_segments() {
        let mut engine = fixed_engine();
        render(&mut engine, &ContentModel::default(), None).unwrap();
        let doc = engine.finish();

        let segments: Vec<_> = doc.ops_with_role(Role::Footer).filter_map(|(_, op)| op.rect()).collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].x, 14.0);
        assert!((segments[2].right() - 196.0).abs() < 1e-4);
        assert_eq!(doc.section_kinds(), [SectionKind::Footer]);
    }

    #[test]
    fn custom_text_is_centred() {
        let mut engine = fixed_engine();
        render(&mut engine, &ContentModel::default(), Some("Printed copy")).unwrap();
        let doc = engine.finish();

        let (_, line) = doc.ops_with_role(Role::Footer).find(|(_, op)| op.text().is_some()).unwrap();
        assert_eq!(line.text(), Some("Printed copy"));
        let DrawOp::Text { x, .. } = line else { unreachable!() };
        assert!((x - (14.0 + (182.0 - 12.0) / 2.0)).abs() < 1e-4);
    }
}
