use crate::LayoutError;
use folio_types::Size;

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Vertical advance per line as a fraction of the font size in points.
///
/// `0.42 mm/pt` is roughly 1.19x leading, which keeps dense CV text readable.
pub const LINE_HEIGHT_FACTOR: f32 = 0.42;

/// Page geometry and spacing used by the layout engine. All lengths are in
/// millimetres; font sizes elsewhere are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub page_size: Size,
    /// Uniform margin on all four sides. The content region of every page is
    /// `[margin, height - margin]` vertically.
    pub margin: f32,
    pub line_height_factor: f32,
    /// Vertical space reserved for, and consumed by, a section heading.
    pub section_title_height: f32,
    pub card_padding: f32,
    pub card_radius: f32,
    /// Space between cards, grid columns and chip rows.
    pub gutter: f32,
    pub badge_height: f32,
    pub badge_padding_x: f32,
    pub chip_height: f32,
    pub chip_padding_x: f32,
    pub accent_bar_height: f32,
}

impl LayoutConfig {
    /// ISO A4 portrait.
    pub fn a4() -> Self {
        Self {
            page_size: Size::new(210.0, 297.0),
            margin: 14.0,
            line_height_factor: LINE_HEIGHT_FACTOR,
            section_title_height: 10.0,
            card_padding: 4.0,
            card_radius: 2.0,
            gutter: 4.0,
            badge_height: 5.0,
            badge_padding_x: 2.5,
            chip_height: 7.0,
            chip_padding_x: 3.0,
            accent_bar_height: 1.5,
        }
    }

    /// US Letter portrait, otherwise identical to [`LayoutConfig::a4`].
    pub fn letter() -> Self {
        Self {
            page_size: Size::new(215.9, 279.4),
            ..Self::a4()
        }
    }

    pub fn inner_width(&self) -> f32 {
        self.page_size.width - 2.0 * self.margin
    }

    /// The y at which content starts on every page.
    pub fn top_content_offset(&self) -> f32 {
        self.margin
    }

    /// Nothing may extend below this y except an element taller than a page.
    pub fn bottom_limit(&self) -> f32 {
        self.page_size.height - self.margin
    }

    pub fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.top_content_offset()
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }

    /// Rejects geometry that leaves no content region or uses non-finite
    /// lengths.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let lengths = [
            self.page_size.width,
            self.page_size.height,
            self.margin,
            self.line_height_factor,
            self.section_title_height,
            self.gutter,
            self.chip_height,
        ];
        if lengths.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "lengths must be finite and non-negative: {self:?}"
            )));
        }
        if self.inner_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "margin {} leaves no content region on a {}x{} page",
                self.margin, self.page_size.width, self.page_size.height
            )));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_content_region() {
        let config = LayoutConfig::a4();
        assert_eq!(config.inner_width(), 182.0);
        assert_eq!(config.top_content_offset(), 14.0);
        assert_eq!(config.bottom_limit(), 283.0);
        assert_eq!(config.usable_height(), 269.0);
    }

    #[test]
    fn letter_keeps_spacing() {
        let letter = LayoutConfig::letter();
        assert_eq!(letter.margin, LayoutConfig::a4().margin);
        assert!(letter.page_size.height < 297.0);
    }

    #[test]
    fn oversized_margin_is_rejected() {
        assert!(LayoutConfig::a4().validate().is_ok());
        let config = LayoutConfig {
            margin: 120.0,
            ..LayoutConfig::a4()
        };
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
        let config = LayoutConfig {
            gutter: f32::NAN,
            ..LayoutConfig::a4()
        };
        assert!(config.validate().is_err());
    }
}
