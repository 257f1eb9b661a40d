//! CV section renderers.
//!
//! Every renderer follows the same discipline: measure the whole block with
//! the engine's wrapping computation, reserve that height with `need_space`,
//! then draw from the measured lines. A card therefore never straddles a page
//! boundary unless it is taller than a page on its own.

pub mod education;
pub mod exposure;
pub mod footer;
pub mod header;
pub mod interests;
pub mod projects;
pub mod skills;
pub mod summary;

use folio_layout::{LayoutEngine, LayoutError, Role, TextStyle, Theme};
use folio_types::ContentModel;

pub const NAME_SIZE: f32 = 22.0;
pub const SUBTITLE_SIZE: f32 = 11.0;
pub const CARD_TITLE_SIZE: f32 = 10.5;
pub const BODY_SIZE: f32 = 9.5;
pub const SMALL_SIZE: f32 = 8.5;
pub const BADGE_SIZE: f32 = 7.5;

/// Gap between stacked elements inside a card.
pub const INNER_GAP: f32 = 1.5;
/// Space after each section.
pub const SECTION_GAP: f32 = 5.0;

/// Runs every section renderer in document order against one engine.
/// Sections without content are skipped.
pub fn render_all(
    engine: &mut LayoutEngine,
    content: &ContentModel,
    footer_text: Option<&str>,
) -> Result<(), LayoutError> {
    header::render(engine, content)?;
    summary::render(engine, content)?;
    skills::render(engine, content)?;
    projects::render(engine, content)?;
    exposure::render(engine, content)?;
    education::render(engine, content)?;
    interests::render(engine, content)?;
    footer::render(engine, content, footer_text)?;
    Ok(())
}

/// Columns for a grid of `count` cards.
///
/// Two or fewer cards use two columns and three or four sit on one row.
/// Beyond that, whichever of four or three columns leaves fewer empty cells
/// in the last row wins, three on a tie.
pub fn skill_columns(count: usize) -> usize {
    match count {
        0..=2 => 2,
        3 | 4 => count,
        _ => {
            let empty = |cols: usize| (cols - count % cols) % cols;
            if empty(4) < empty(3) { 4 } else { 3 }
        }
    }
}

/// Width of each of `cols` equal columns across `inner_width`.
pub fn column_width(inner_width: f32, cols: usize, gutter: f32) -> f32 {
    let cols = cols.max(1) as f32;
    (inner_width - gutter * (cols - 1.0)) / cols
}

/// Text styles shared by the renderers.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    pub card_title: TextStyle,
    pub body: TextStyle,
    pub muted: TextStyle,
    pub small_muted: TextStyle,
    pub badge: TextStyle,
}

impl Styles {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            card_title: TextStyle::bold(CARD_TITLE_SIZE, theme.text),
            body: TextStyle::regular(BODY_SIZE, theme.text),
            muted: TextStyle::regular(BODY_SIZE, theme.muted),
            small_muted: TextStyle::regular(SMALL_SIZE, theme.muted),
            badge: TextStyle::bold(BADGE_SIZE, theme.accent),
        }
    }
}

/// Draws pre-wrapped lines top-down from `y` without touching the cursor and
/// returns the height they occupy.
pub(crate) fn draw_lines(
    engine: &mut LayoutEngine,
    lines: &[String],
    x: f32,
    y: f32,
    style: TextStyle,
    role: Role,
) -> f32 {
    let line_height = engine.line_height(style.size);
    for (i, line) in lines.iter().enumerate() {
        engine.styled_text(line, x, y + i as f32 * line_height, style, role);
    }
    lines.len() as f32 * line_height
}

pub(crate) fn lines_height(engine: &LayoutEngine, lines: &[String], style: TextStyle) -> f32 {
    lines.len() as f32 * engine.line_height(style.size)
}

/// Shortens `text` with a trailing ellipsis until it is at most `max_width`
/// wide. Returns the text unchanged when it already fits.
pub(crate) fn fit_text(
    engine: &LayoutEngine,
    text: &str,
    style: TextStyle,
    max_width: f32,
) -> Result<String, LayoutError> {
    engine.truncate_to_width(text, style, max_width)
}

/// [`fit_text`] for the text of a badge at most `max_width` wide.
pub(crate) fn fit_badge_text(
    engine: &LayoutEngine,
    text: &str,
    style: TextStyle,
    max_width: f32,
) -> Result<String, LayoutError> {
    let padding = 2.0 * engine.config().badge_padding_x;
    fit_text(engine, text, style, max_width - padding)
}

/// Non-blank entries, trimmed.
pub(crate) fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
