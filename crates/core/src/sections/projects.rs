//! One full-width card per project: title with a right-aligned stack badge,
//! status line and bulleted highlights.

use super::{INNER_GAP, SECTION_GAP, SMALL_SIZE, Styles, draw_lines, fit_badge_text, lines_height, non_blank};
use folio_layout::{BadgeAnchor, LayoutEngine, LayoutError, PT_TO_MM, Role, SectionKind, TextStyle, Theme};
use folio_types::{Color, ContentModel, Project};

/// Horizontal space reserved for a bullet marker before its text.
pub const BULLET_INDENT: f32 = 4.0;
const BULLET_GAP: f32 = 0.8;
const PLANNED_GREY: Color = Color::rgb(0x6b, 0x72, 0x80);

/// Colour of a project's status label.
pub fn status_color(status: &str, theme: &Theme) -> Color {
    match status.trim().to_uppercase().as_str() {
        "SHIPPED" => theme.success,
        "IN PROGRESS" => theme.warning,
        "PLANNED" => PLANNED_GREY,
        "REFACTORING" => theme.accent_secondary,
        _ => theme.muted,
    }
}

struct MeasuredProject {
    title: Vec<String>,
    badge: Option<String>,
    header_height: f32,
    subtitle: Vec<String>,
    status: Option<(String, TextStyle)>,
    bullets: Vec<Vec<String>>,
    height: f32,
}

fn measure(engine: &LayoutEngine, project: &Project, styles: &Styles) -> Result<MeasuredProject, LayoutError> {
    let config = engine.config();
    let padding = config.card_padding;
    let card_width = engine.inner_width();
    let text_width = card_width - 2.0 * padding;

    let stack = non_blank(&project.stack).join(" \u{00B7} ");
    let badge = if stack.is_empty() {
        None
    } else {
        Some(fit_badge_text(engine, &stack, styles.badge, card_width / 2.0)?)
    };
    let badge_space = match &badge {
        Some(text) => engine.badge_width(text, styles.badge)? + config.gutter,
        None => 0.0,
    };

    let title = engine.wrap(
        &project.title,
        styles.card_title.size,
        styles.card_title.weight,
        text_width - badge_space,
    )?;
    let mut header_height = lines_height(engine, &title, styles.card_title);
    if badge.is_some() {
        header_height = header_height.max(config.badge_height);
    }
    let mut height = 2.0 * padding + header_height;

    let subtitle = match project.subtitle.as_deref() {
        Some(text) => engine.wrap(text, styles.muted.size, styles.muted.weight, text_width)?,
        None => Vec::new(),
    };
    if !subtitle.is_empty() {
        height += INNER_GAP + lines_height(engine, &subtitle, styles.muted);
    }

    let status = project.status.trim();
    let status = if status.is_empty() {
        None
    } else {
        let style = TextStyle::bold(SMALL_SIZE, status_color(status, engine.theme()));
        height += INNER_GAP + engine.line_height(style.size);
        Some((status.to_uppercase(), style))
    };

    let mut bullets = Vec::new();
    for bullet in non_blank(&project.bullets) {
        let lines = engine.wrap(&bullet, styles.body.size, styles.body.weight, text_width - BULLET_INDENT)?;
        bullets.push(lines);
    }
    if !bullets.is_empty() {
        let body: f32 = bullets.iter().map(|lines| lines_height(engine, lines, styles.body)).sum();
        height += INNER_GAP + body + BULLET_GAP * (bullets.len() - 1) as f32;
    }

    Ok(MeasuredProject {
        title,
        badge,
        header_height,
        subtitle,
        status,
        bullets,
        height,
    })
}

fn draw(engine: &mut LayoutEngine, project: &MeasuredProject, styles: &Styles) -> Result<(), LayoutError> {
    let padding = engine.config().card_padding;
    let x = engine.content_left();
    let width = engine.inner_width();

    engine.need_space(project.height);
    let top = engine.cursor().y;
    engine.card(x, top, width, project.height);

    let text_x = x + padding;
    let mut y = top + padding;
    draw_lines(engine, &project.title, text_x, y, styles.card_title, Role::Heading);
    if let Some(badge) = &project.badge {
        let fill = engine.theme().badge_fill;
        engine.badge(badge, BadgeAnchor::Right(x + width - padding), y, styles.badge, fill)?;
    }
    y += project.header_height;

    if !project.subtitle.is_empty() {
        y += INNER_GAP;
        y += draw_lines(engine, &project.subtitle, text_x, y, styles.muted, Role::Body);
    }

    if let Some((status, style)) = &project.status {
        y += INNER_GAP;
        engine.styled_text(status, text_x, y, *style, Role::Body);
        y += engine.line_height(style.size);
    }

    if !project.bullets.is_empty() {
        y += INNER_GAP;
        let marker_offset = styles.body.size * PT_TO_MM / 2.0;
        for lines in &project.bullets {
            engine.bullet(text_x + BULLET_INDENT / 2.0, y + marker_offset);
            y += draw_lines(engine, lines, text_x + BULLET_INDENT, y, styles.body, Role::Body);
            y += BULLET_GAP;
        }
    }

    let gutter = engine.config().gutter;
    engine.advance(project.height + gutter);
    Ok(())
}

pub fn render(engine: &mut LayoutEngine, content: &ContentModel) -> Result<(), LayoutError> {
    let projects: Vec<&Project> = content
        .projects
        .iter()
        .filter(|p| !p.title.trim().is_empty() || !non_blank(&p.bullets).is_empty())
        .collect();
    if projects.is_empty() {
        return Ok(());
    }

    let styles = Styles::from_theme(engine.theme());
    let measured = projects
        .iter()
        .map(|project| measure(engine, project, &styles))
        .collect::<Result<Vec<_>, _>>()?;

    let first = measured.first().map_or(0.0, |p| p.height);
    engine.begin_section(SectionKind::Projects, engine.section_title_height() + first);
    engine.section_title(SectionKind::Projects.title())?;

    for project in &measured {
        draw(engine, project, &styles)?;
    }

    engine.advance(SECTION_GAP - engine.config().gutter);
    Ok(())
}
