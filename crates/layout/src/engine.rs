//! The cursor-based layout engine.
//!
//! Section renderers draw exclusively through [`LayoutEngine`]. The engine owns
//! the cursor and is the only place that decides to start a new page, which
//! happens in [`LayoutEngine::need_space`].

use crate::LayoutError;
use crate::config::{LayoutConfig, PT_TO_MM};
use crate::document::{Document, DrawOp, Page, Role, SectionKind, SectionMark, Stroke};
use crate::flow::{flow_chips, row_count};
use crate::text::wrap_text;
use crate::theme::{TextStyle, Theme};
use folio_traits::TextMeasurer;
use folio_types::{Color, FontWeight, Rect};
use std::sync::Arc;

const FRAME_STROKE_WIDTH: f32 = 0.4;
const FRAME_RADIUS: f32 = 3.0;
const CARD_STROKE_WIDTH: f32 = 0.3;
const CHIP_STROKE_WIDTH: f32 = 0.25;
const BULLET_RADIUS: f32 = 0.7;
const HEADING_SIZE: f32 = 11.0;
const HEADING_UNDERLINE_GAP: f32 = 1.2;
const HEADING_UNDERLINE_WIDTH: f32 = 0.6;
const ELLIPSIS: char = '\u{2026}';

/// Read-only snapshot of the engine's write position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

/// Horizontal anchoring for [`LayoutEngine::badge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeAnchor {
    /// Left edge at the given x.
    Left(f32),
    /// Right edge at the given x.
    Right(f32),
}

pub struct LayoutEngine {
    config: LayoutConfig,
    theme: Theme,
    measurer: Arc<dyn TextMeasurer>,
    pages: Vec<Page>,
    sections: Vec<SectionMark>,
    y: f32,
    /// Whether anything other than page chrome has been drawn on the current
    /// page. A fresh page never breaks again, which bounds pagination.
    page_has_content: bool,
    /// The current page holds nothing but a section heading drawn at its
    /// top. The heading's first block may then overflow here rather than
    /// leave the heading alone on the page.
    page_holds_only_heading: bool,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("measurer", &self.measurer.name())
            .field("pages", &self.pages.len())
            .field("cursor", &self.cursor())
            .finish()
    }
}

impl LayoutEngine {
    /// Opens the first page, chrome included, with the cursor at the top of
    /// the content region.
    pub fn new(config: LayoutConfig, theme: Theme, measurer: Arc<dyn TextMeasurer>) -> Self {
        let mut engine = Self {
            config,
            theme,
            measurer,
            pages: Vec::new(),
            sections: Vec::new(),
            y: config.top_content_offset(),
            page_has_content: false,
            page_holds_only_heading: false,
        };
        engine.open_page();
        engine
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            page: self.pages.len() - 1,
            y: self.y,
        }
    }

    pub fn content_left(&self) -> f32 {
        self.config.margin
    }

    pub fn content_right(&self) -> f32 {
        self.config.page_size.width - self.config.margin
    }

    pub fn inner_width(&self) -> f32 {
        self.config.inner_width()
    }

    pub fn line_height(&self, size: f32) -> f32 {
        self.config.line_height(size)
    }

    /// Moves the cursor down. Negative distances are ignored.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy.max(0.0);
    }

    /// Fills the whole current page with the theme background.
    pub fn page_background(&mut self) {
        let size = self.config.page_size;
        let fill = self.theme.background;
        self.push(DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, size.width, size.height),
            fill: Some(fill),
            stroke: None,
            radius: 0.0,
            role: Role::Background,
        });
    }

    /// Ensures `height` fits below the cursor on the current page.
    ///
    /// Starts a new page and returns `true` when it does not fit. A page that
    /// holds no content yet, or only a section heading drawn on an otherwise
    /// empty page, is never abandoned: the block is placed there and allowed
    /// to run past the bottom margin.
    pub fn need_space(&mut self, height: f32) -> bool {
        let bottom = self.config.bottom_limit();
        if self.y + height <= bottom {
            return false;
        }

        if !self.page_has_content || self.page_holds_only_heading {
            log::warn!(
                "Block of height {:.2}mm exceeds the {:.2}mm available on page {}; allowing overflow",
                height,
                bottom - self.y,
                self.pages.len()
            );
            return false;
        }

        self.open_page();
        log::debug!("Page break before {:.2}mm block, now on page {}", height, self.pages.len());
        true
    }

    /// Records that a section starts here after reserving `first_block` so the
    /// section heading is not stranded at the bottom of a page.
    pub fn begin_section(&mut self, kind: SectionKind, first_block: f32) -> bool {
        let broke = self.need_space(first_block);
        let cursor = self.cursor();
        log::debug!("Section {} starts on page {} at y={:.2}", kind, cursor.page + 1, cursor.y);
        self.sections.push(SectionMark {
            kind,
            page: cursor.page,
            y: cursor.y,
        });
        broke
    }

    /// Filled, bordered content block. Draws no text.
    pub fn card(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (fill, border) = (self.theme.card_fill, self.theme.card_border);
        self.push(DrawOp::Rect {
            rect: Rect::new(x, y, width, height),
            fill: Some(fill),
            stroke: Some(Stroke {
                color: border,
                width: CARD_STROKE_WIDTH,
            }),
            radius: self.config.card_radius,
            role: Role::Card,
        });
    }

    /// Height consumed by [`LayoutEngine::section_title`].
    pub fn section_title_height(&self) -> f32 {
        self.config.section_title_height
    }

    /// Uppercase heading with an accent underline as wide as the text.
    pub fn section_title(&mut self, text: &str) -> Result<(), LayoutError> {
        let height = self.config.section_title_height;
        self.need_space(height);
        let fresh_page = !self.page_has_content;

        let heading = text.to_uppercase();
        let style = TextStyle::bold(HEADING_SIZE, self.theme.text);
        let width = self.text_width(&heading, style.size, style.weight)?;
        let x = self.content_left();
        let y = self.y;

        self.styled_text(&heading, x, y, style, Role::Heading);
        let underline_y = y + HEADING_SIZE * PT_TO_MM + HEADING_UNDERLINE_GAP;
        self.rule(x, x + width, underline_y, self.theme.accent, HEADING_UNDERLINE_WIDTH);
        self.page_holds_only_heading = fresh_page;

        self.advance(height);
        Ok(())
    }

    /// Validated width of `text` in millimetres.
    pub fn text_width(&self, text: &str, size: f32, weight: FontWeight) -> Result<f32, LayoutError> {
        let width = self.measurer.text_width(text, size, weight);
        if width.is_finite() && width >= 0.0 {
            Ok(width)
        } else {
            Err(LayoutError::Measurement(format!(
                "{} returned {} for {:?} at {}pt",
                self.measurer.name(),
                width,
                text,
                size
            )))
        }
    }

    /// `text` shortened with a trailing ellipsis until it is at most
    /// `max_width` wide. Text that already fits is returned unchanged.
    pub fn truncate_to_width(&self, text: &str, style: TextStyle, max_width: f32) -> Result<String, LayoutError> {
        let fits = |candidate: &str| -> Result<bool, LayoutError> {
            Ok(self.text_width(candidate, style.size, style.weight)? <= max_width)
        };
        if fits(text)? {
            return Ok(text.to_string());
        }

        let mut chars: Vec<char> = text.chars().collect();
        while chars.pop().is_some() {
            let mut candidate: String = chars.iter().collect::<String>().trim_end().to_string();
            candidate.push(ELLIPSIS);
            if fits(&candidate)? {
                return Ok(candidate);
            }
        }
        Ok(ELLIPSIS.to_string())
    }

    /// Lines `text` occupies at `max_width`. This is the computation
    /// [`LayoutEngine::wrapped_text`] draws with.
    pub fn wrap(
        &self,
        text: &str,
        size: f32,
        weight: FontWeight,
        max_width: f32,
    ) -> Result<Vec<String>, LayoutError> {
        wrap_text(text, max_width, |candidate| self.text_width(candidate, size, weight))
    }

    /// Height [`LayoutEngine::wrapped_text`] will advance for the same input.
    pub fn measure_wrapped(
        &self,
        text: &str,
        size: f32,
        weight: FontWeight,
        max_width: f32,
    ) -> Result<f32, LayoutError> {
        let lines = self.wrap(text, size, weight, max_width)?;
        Ok(lines.len() as f32 * self.line_height(size))
    }

    /// Draws `text` wrapped to `max_width`, one line at a time through
    /// [`LayoutEngine::need_space`], and returns the height advanced.
    pub fn wrapped_text(
        &mut self,
        text: &str,
        x: f32,
        style: TextStyle,
        max_width: f32,
    ) -> Result<f32, LayoutError> {
        let lines = self.wrap(text, style.size, style.weight, max_width)?;
        let line_height = self.line_height(style.size);

        for line in &lines {
            self.need_space(line_height);
            let y = self.y;
            self.styled_text(line, x, y, style, Role::Body);
            self.advance(line_height);
        }

        Ok(lines.len() as f32 * line_height)
    }

    /// Single body-text run at an absolute position. The cursor is not moved.
    pub fn text_at(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.styled_text(text, x, y, style, Role::Body);
    }

    /// Like [`LayoutEngine::text_at`] with an explicit role.
    pub fn styled_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle, role: Role) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            size: style.size,
            weight: style.weight,
            color: style.color,
            role,
        });
    }

    /// One line centred across the content width, then advances by its line
    /// height.
    pub fn text_centered(&mut self, text: &str, style: TextStyle, role: Role) -> Result<(), LayoutError> {
        let line_height = self.line_height(style.size);
        self.need_space(line_height);
        let width = self.text_width(text, style.size, style.weight)?;
        let x = self.content_left() + (self.inner_width() - width) / 2.0;
        let y = self.y;
        self.styled_text(text, x, y, style, role);
        self.advance(line_height);
        Ok(())
    }

    /// Width a badge for `text` will take.
    pub fn badge_width(&self, text: &str, style: TextStyle) -> Result<f32, LayoutError> {
        Ok(self.text_width(text, style.size, style.weight)? + 2.0 * self.config.badge_padding_x)
    }

    /// Pill with measured width holding one line of text. Returns its bounds.
    pub fn badge(
        &mut self,
        text: &str,
        anchor: BadgeAnchor,
        y: f32,
        style: TextStyle,
        fill: Color,
    ) -> Result<Rect, LayoutError> {
        let width = self.badge_width(text, style)?;
        let height = self.config.badge_height;
        let x = match anchor {
            BadgeAnchor::Left(x) => x,
            BadgeAnchor::Right(right) => right - width,
        };
        let rect = Rect::new(x, y, width, height);

        self.push(DrawOp::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
            radius: height / 2.0,
            role: Role::Badge,
        });
        let text_y = y + (height - style.size * PT_TO_MM) / 2.0;
        self.styled_text(text, x + self.config.badge_padding_x, text_y, style, Role::Badge);

        Ok(rect)
    }

    /// Horizontal line drawn as a thin filled rectangle.
    pub fn rule(&mut self, x1: f32, x2: f32, y: f32, color: Color, width: f32) {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.fill_rect(Rect::new(left, y, right - left, width), color, Role::Rule);
    }

    /// Square-cornered, unbordered rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, role: Role) {
        self.push(DrawOp::Rect {
            rect,
            fill: Some(color),
            stroke: None,
            radius: 0.0,
            role,
        });
    }

    /// List marker centred on (`cx`, `cy`).
    pub fn bullet(&mut self, cx: f32, cy: f32) {
        let fill = self.theme.accent;
        self.push(DrawOp::Circle {
            cx,
            cy,
            radius: BULLET_RADIUS,
            fill,
            role: Role::Marker,
        });
    }

    /// Height [`LayoutEngine::chips`] will advance for the same tags.
    pub fn measure_chips(&self, tags: &[String], style: TextStyle) -> Result<f32, LayoutError> {
        let (_, widths) = self.chip_labels(tags, style)?;
        let slots = flow_chips(&widths, self.inner_width(), self.config.gutter);
        let rows = row_count(&slots);
        Ok(rows as f32 * (self.config.chip_height + self.config.gutter))
    }

    /// Lays tags out as pills flowing left to right, wrapping rows at the
    /// right margin. Each row reserves its own space. A tag too long for a
    /// row of its own is truncated to fit.
    pub fn chips(&mut self, tags: &[String], style: TextStyle) -> Result<(), LayoutError> {
        let (labels, widths) = self.chip_labels(tags, style)?;
        let slots = flow_chips(&widths, self.inner_width(), self.config.gutter);
        let chip_height = self.config.chip_height;
        let pad = self.config.chip_padding_x;
        let left = self.content_left();
        let text_offset = (chip_height - style.size * PT_TO_MM) / 2.0;
        let (fill, border) = (self.theme.chip_fill, self.theme.chip_border);

        let mut current_row = None;
        for (slot, label) in slots.iter().zip(&labels) {
            if current_row != Some(slot.row) {
                if current_row.is_some() {
                    self.advance(chip_height + self.config.gutter);
                }
                self.need_space(chip_height);
                current_row = Some(slot.row);
            }

            let y = self.y;
            self.push(DrawOp::Rect {
                rect: Rect::new(left + slot.x, y, slot.width, chip_height),
                fill: Some(fill),
                stroke: Some(Stroke {
                    color: border,
                    width: CHIP_STROKE_WIDTH,
                }),
                radius: chip_height / 2.0,
                role: Role::Chip,
            });
            self.styled_text(label, left + slot.x + pad, y + text_offset, style, Role::Chip);
        }

        if current_row.is_some() {
            self.advance(chip_height + self.config.gutter);
        }
        Ok(())
    }

    /// Chip texts and their pill widths, each at most the content width.
    fn chip_labels(&self, tags: &[String], style: TextStyle) -> Result<(Vec<String>, Vec<f32>), LayoutError> {
        let padding = 2.0 * self.config.chip_padding_x;
        let max_text = self.inner_width() - padding;
        let mut labels = Vec::with_capacity(tags.len());
        let mut widths = Vec::with_capacity(tags.len());
        for tag in tags {
            let label = self.truncate_to_width(tag, style, max_text)?;
            widths.push(self.text_width(&label, style.size, style.weight)? + padding);
            labels.push(label);
        }
        Ok((labels, widths))
    }

    /// Consumes the engine, returning the finished document.
    pub fn finish(self) -> Document {
        log::debug!(
            "Layout finished: {} page(s), {} section(s)",
            self.pages.len(),
            self.sections.len()
        );
        Document {
            size: self.config.page_size,
            margin: self.config.margin,
            pages: self.pages,
            sections: self.sections,
        }
    }

    fn open_page(&mut self) {
        let index = self.pages.len();
        self.pages.push(Page::new(index));
        self.y = self.config.top_content_offset();
        self.page_has_content = false;
        self.page_holds_only_heading = false;
        self.page_background();
        self.page_chrome();
    }

    /// Frame inset by half the margin plus the tri-colour accent bar along
    /// its top edge.
    fn page_chrome(&mut self) {
        let inset = self.config.margin / 2.0;
        let size = self.config.page_size;
        let frame = Rect::new(inset, inset, size.width - 2.0 * inset, size.height - 2.0 * inset);
        let frame_color = self.theme.frame;

        self.push(DrawOp::Rect {
            rect: frame,
            fill: None,
            stroke: Some(Stroke {
                color: frame_color,
                width: FRAME_STROKE_WIDTH,
            }),
            radius: FRAME_RADIUS,
            role: Role::Frame,
        });

        let segment = frame.width / 3.0;
        for (i, color) in self.theme.accent_stops().into_iter().enumerate() {
            self.push(DrawOp::Rect {
                rect: Rect::new(
                    frame.x + segment * i as f32,
                    frame.y,
                    segment,
                    self.config.accent_bar_height,
                ),
                fill: Some(color),
                stroke: None,
                radius: 0.0,
                role: Role::AccentBar,
            });
        }
    }

    fn push(&mut self, op: DrawOp) {
        if !op.role().is_decoration() {
            self.page_has_content = true;
            self.page_holds_only_heading = false;
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}
