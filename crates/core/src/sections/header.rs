//! Name, handles, subtitle and contact line, centred, above a separator.

use super::{NAME_SIZE, SMALL_SIZE, SUBTITLE_SIZE};
use folio_layout::{LayoutEngine, LayoutError, Role, SectionKind, TextStyle};
use folio_types::ContentModel;

const RULE_GAP: f32 = 2.0;
const RULE_WIDTH: f32 = 0.3;
const AFTER_RULE: f32 = 6.0;

struct HeaderLine {
    text: String,
    style: TextStyle,
    role: Role,
}

fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" \u{00B7} ")
}

fn header_lines(engine: &LayoutEngine, content: &ContentModel) -> Vec<HeaderLine> {
    let theme = engine.theme();
    let handles = join_present([content.handles.primary.as_str(), content.handles.secondary.as_str()]);
    let subtitle = join_present([content.title.as_str(), content.tagline.as_str()]);
    let links = &content.links;
    let contact = join_present(
        [
            Some(content.email.as_str()),
            links.github.as_deref(),
            links.linkedin.as_deref(),
            links.twitter.as_deref(),
        ]
        .into_iter()
        .flatten(),
    );

    [
        (content.name.trim().to_string(), TextStyle::bold(NAME_SIZE, theme.text), Role::Heading),
        (handles, TextStyle::regular(SUBTITLE_SIZE - 1.0, theme.accent), Role::Body),
        (subtitle, TextStyle::regular(SUBTITLE_SIZE, theme.text), Role::Body),
        (contact, TextStyle::regular(SMALL_SIZE, theme.muted), Role::Body),
    ]
    .into_iter()
    .filter(|(text, _, _)| !text.is_empty())
    .map(|(text, style, role)| HeaderLine { text, style, role })
    .collect()
}

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let lines = header_lines(engine, content);
    if lines.is_empty() {
        log::warn!("Content has no name, title or contact details; skipping header");
        return Ok(());
    }

    // Long lines wrap and each wrapped line is centred on its own.
    let width = engine.inner_width();
    let mut wrapped = Vec::with_capacity(lines.len());
    let mut height = RULE_GAP + RULE_WIDTH + AFTER_RULE;
    for line in lines {
        let parts = engine.wrap(&line.text, line.style.size, line.style.weight, width)?;
        height += parts.len() as f32 * engine.line_height(line.style.size);
        wrapped.push((parts, line.style, line.role));
    }

    engine.begin_section(SectionKind::Header, height);
    for (parts, style, role) in wrapped {
        for part in parts {
            engine.text_centered(&part, style, role)?;
        }
    }

    engine.advance(RULE_GAP);
    let y = engine.cursor().y;
    let (left, right) = (engine.content_left(), engine.content_right());
    let color = engine.theme().card_border;
    engine.rule(left, right, y, color, RULE_WIDTH);
    engine.advance(RULE_WIDTH + AFTER_RULE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::fixed_engine;
    use folio_types::{Handles, Links};

    fn content() -> ContentModel {
        ContentModel {
            name: "Ada Lovelace".into(),
            handles: Handles {
                primary: "@ada".into(),
                secondary: "".into(),
            },
            title: "Systems Engineer".into(),
            tagline: "Analytical engines".into(),
            email: "ada@example.com".into(),
            links: Links {
                github: Some("github.com/ada".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn draws_centred_lines_and_separator() {
        let mut engine = fixed_engine();
        render(&mut engine, &content()).unwrap();
        let doc = engine.finish();

        let texts: Vec<&str> = doc.texts().collect();
        assert_eq!(
            texts,
            [
                "Ada Lovelace",
                "@ada",
                "Systems Engineer \u{00B7} Analytical engines",
                "ada@example.com \u{00B7} github.com/ada",
            ]
        );
        assert_eq!(doc.section_kinds(), [SectionKind::Header]);
        assert_eq!(doc.ops_with_role(Role::Rule).count(), 1);

        // Fixed metrics: "Ada Lovelace" is 12mm wide, centred in 182mm from x=14.
        let (_, name) = doc.ops_with_role(Role::Heading).next().unwrap();
        match name {
            folio_layout::DrawOp::Text { x, .. } => assert_eq!(*x, 14.0 + (182.0 - 12.0) / 2.0),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn empty_header_is_skipped() {
        let mut engine = fixed_engine();
        render(&mut engine, &ContentModel::default()).unwrap();
        let doc = engine.finish();
        assert!(doc.sections.is_empty());
        assert_eq!(doc.content_ops().count(), 0);
    }
}
