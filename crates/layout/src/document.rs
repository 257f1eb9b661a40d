//! The laid-out document: pages of draw operations in document units.

use crate::config::PT_TO_MM;
use folio_types::{Color, FontWeight, Rect, Size};
use std::fmt;

/// What a draw operation represents. Renderers ignore it; tests and
/// diagnostics use it to find cards, badges and chips in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Frame,
    AccentBar,
    Card,
    Badge,
    Chip,
    Rule,
    Heading,
    Body,
    Marker,
    Footer,
}

impl Role {
    /// Page chrome repeated on every page. Decorations are exempt from the
    /// content-region invariant.
    pub fn is_decoration(self) -> bool {
        matches!(self, Role::Background | Role::Frame | Role::AccentBar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        radius: f32,
        role: Role,
    },
    /// `y` is the top of the line box; the baseline sits `0.8 * size` below it.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        color: Color,
        role: Role,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: Color,
        role: Role,
    },
}

impl DrawOp {
    pub fn role(&self) -> Role {
        match self {
            DrawOp::Rect { role, .. } | DrawOp::Text { role, .. } | DrawOp::Circle { role, .. } => {
                *role
            }
        }
    }

    pub fn top(&self) -> f32 {
        match self {
            DrawOp::Rect { rect, .. } => rect.y,
            DrawOp::Text { y, .. } => *y,
            DrawOp::Circle { cy, radius, .. } => cy - radius,
        }
    }

    pub fn bottom(&self) -> f32 {
        match self {
            DrawOp::Rect { rect, .. } => rect.bottom(),
            DrawOp::Text { y, size, .. } => y + size * PT_TO_MM,
            DrawOp::Circle { cy, radius, .. } => cy + radius,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        match self {
            DrawOp::Rect { rect, .. } => Some(*rect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Projects,
    Exposure,
    Education,
    Interests,
    Footer,
}

impl SectionKind {
    /// Heading text as printed on the page.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::Summary => "Summary",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Exposure => "Engineering Exposure",
            SectionKind::Education => "Education",
            SectionKind::Interests => "Interests",
            SectionKind::Footer => "Footer",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Where a section began drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMark {
    pub kind: SectionKind,
    pub page: usize,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub size: Size,
    pub margin: f32,
    pub pages: Vec<Page>,
    pub sections: Vec<SectionMark>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All operations tagged `role`, paired with their page index.
    pub fn ops_with_role(&self, role: Role) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages.iter().flat_map(move |page| {
            page.ops
                .iter()
                .filter(move |op| op.role() == role)
                .map(move |op| (page.index, op))
        })
    }

    /// Every non-decoration operation, paired with its page index.
    pub fn content_ops(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages.iter().flat_map(|page| {
            page.ops
                .iter()
                .filter(|op| !op.role().is_decoration())
                .map(move |op| (page.index, op))
        })
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|mark| mark.kind).collect()
    }

    /// All text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.ops.iter().filter_map(DrawOp::text))
    }
}
