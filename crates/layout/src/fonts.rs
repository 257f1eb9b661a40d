//! Font metrics for the layout engine.
//!
//! The renderer writes text with the PDF base-14 Helvetica faces, which every
//! viewer ships, so no font program is embedded. Measuring with the published
//! Adobe AFM advance widths of those same faces keeps wrapping decisions in
//! agreement with what ends up on the page.

use crate::config::PT_TO_MM;
use folio_traits::TextMeasurer;
use folio_types::FontWeight;

/// Advance widths (1/1000 em) of Helvetica for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// Advance widths (1/1000 em) of Helvetica-Bold for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the tables (close to the average glyph).
const FALLBACK_WIDTH: u16 = 556;

fn advance_units(c: char, weight: FontWeight) -> u16 {
    let bold = weight == FontWeight::Bold;
    match c {
        ' '..='~' => {
            let idx = c as usize - 0x20;
            if bold { HELVETICA_BOLD[idx] } else { HELVETICA[idx] }
        }
        '\u{00A0}' => 278,
        '\u{00B7}' => 278,
        '\u{2022}' => 350,
        '\u{2013}' => 556,
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2018}' | '\u{2019}' => if bold { 278 } else { 222 },
        '\u{201C}' | '\u{201D}' => if bold { 500 } else { 333 },
        _ => FALLBACK_WIDTH,
    }
}

/// Measures text with the standard Helvetica / Helvetica-Bold metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Sum of advance widths in 1/1000 em.
    pub fn units(text: &str, weight: FontWeight) -> u32 {
        text.chars().map(|c| advance_units(c, weight) as u32).sum()
    }
}

impl TextMeasurer for StandardFontMetrics {
    fn text_width(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        Self::units(text, weight) as f32 / 1000.0 * size * PT_TO_MM
    }

    fn name(&self) -> &'static str {
        "StandardFontMetrics"
    }
}

/// Every character is `char_width` millimetres wide regardless of size or
/// weight. Useful where exact, easily computed widths matter more than
/// typographic fidelity, e.g. in layout tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMetrics {
    pub char_width: f32,
}

impl FixedWidthMetrics {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl TextMeasurer for FixedWidthMetrics {
    fn text_width(&self, text: &str, _size: f32, _weight: FontWeight) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn name(&self) -> &'static str {
        "FixedWidthMetrics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_afm_widths() {
        assert_eq!(StandardFontMetrics::units("Hello", FontWeight::Regular), 722 + 556 + 222 + 222 + 556);
        assert_eq!(StandardFontMetrics::units("Hello", FontWeight::Bold), 722 + 556 + 278 + 278 + 611);
        assert_eq!(StandardFontMetrics::units(" ", FontWeight::Regular), 278);
        assert_eq!(StandardFontMetrics::units("~", FontWeight::Regular), 584);
    }

    #[test]
    fn bold_is_never_narrower_for_letters() {
        for c in ('a'..='z').chain('A'..='Z') {
            let s = c.to_string();
            assert!(
                StandardFontMetrics::units(&s, FontWeight::Bold)
                    >= StandardFontMetrics::units(&s, FontWeight::Regular),
                "{c}"
            );
        }
    }

    #[test]
    fn width_scales_with_size() {
        let m = StandardFontMetrics::new();
        let small = m.text_width("Portfolio", 10.0, FontWeight::Regular);
        let large = m.text_width("Portfolio", 20.0, FontWeight::Regular);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn one_thousand_units_at_72pt_is_an_inch() {
        let m = StandardFontMetrics::new();
        let em_dash = m.text_width("\u{2014}", 72.0, FontWeight::Regular);
        assert!((em_dash - 25.4).abs() < 1e-3);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        assert_eq!(StandardFontMetrics::units("\u{4e2d}", FontWeight::Regular), 556);
        assert_eq!(StandardFontMetrics::units("\u{00B7}", FontWeight::Bold), 278);
    }

    #[test]
    fn fixed_width_counts_chars() {
        let m = FixedWidthMetrics::new(2.0);
        assert_eq!(m.text_width("abcd", 99.0, FontWeight::Bold), 8.0);
        assert_eq!(m.text_width("", 10.0, FontWeight::Regular), 0.0);
    }
}
