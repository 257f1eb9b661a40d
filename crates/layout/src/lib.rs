use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Text measurement failed: {0}")]
    Measurement(String),
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub mod config;
pub mod document;
pub mod engine;
pub mod flow;
pub mod fonts;
pub mod text;
pub mod theme;

pub use self::config::{LINE_HEIGHT_FACTOR, LayoutConfig, PT_TO_MM};
pub use self::document::{Document, DrawOp, Page, Role, SectionKind, SectionMark, Stroke};
pub use self::engine::{BadgeAnchor, Cursor, LayoutEngine};
pub use self::flow::{ChipSlot, flow_chips};
pub use self::fonts::{FixedWidthMetrics, StandardFontMetrics};
pub use self::theme::{TextStyle, Theme};

// Re-export the geometry and style types that appear in draw operations
pub use folio_types::{Color, FontWeight, Rect, Size};

#[cfg(test)]
mod test_utils;
