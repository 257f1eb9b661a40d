//! Conversion of laid-out pages into `lopdf` content streams, plus the
//! document outline built from section marks.

use crate::writer::PdfWriter;
use folio_layout::{DrawOp, Page, SectionKind, SectionMark, Stroke};
use folio_render_core::RenderError;
use folio_render_core::utils::{flip_y, mm_to_pt, to_win_ansi};
use folio_types::{Color, FontWeight, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, ObjectId, StringFormat, dictionary};

/// Resource name of Helvetica in every page's font dictionary.
pub const FONT_REGULAR: &str = "F1";
/// Resource name of Helvetica-Bold.
pub const FONT_BOLD: &str = "F2";

/// Control-point distance for approximating a quarter circle with a cubic
/// Bezier curve.
const KAPPA: f32 = 0.552_284_8;

/// Fraction of the font size between the top of the line box and the baseline.
const BASELINE_RATIO: f32 = 0.8;

pub fn font_resource(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Regular => FONT_REGULAR,
        FontWeight::Bold => FONT_BOLD,
    }
}

/// Builds the content stream for one page. `page_height` is in millimetres.
pub fn page_content(page: &Page, page_height: f32) -> Result<Content, RenderError> {
    let mut page_ctx = PageContext::new(mm_to_pt(page_height));
    for op in &page.ops {
        page_ctx.draw(op)?;
    }
    Ok(page_ctx.finish())
}

/// Creates the PDF outline (bookmarks) with one entry per navigable section.
///
/// # Returns
/// The `ObjectId` of the root `Outlines` dictionary if any entries were created, otherwise `None`.
pub fn build_outlines(
    writer: &mut PdfWriter,
    sections: &[SectionMark],
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    struct OutlineItem {
        id: ObjectId,
        title: &'static str,
        dest: Vec<Object>,
    }

    let page_height_pt = mm_to_pt(page_height);
    let items: Vec<OutlineItem> = sections
        .iter()
        .filter(|mark| !matches!(mark.kind, SectionKind::Header | SectionKind::Footer))
        .filter_map(|mark| {
            let page_id = page_ids.get(mark.page)?;
            let y_dest = flip_y(mm_to_pt(mark.y), page_height_pt);
            Some((mark, *page_id, y_dest))
        })
        .map(|(mark, page_id, y_dest)| OutlineItem {
            id: writer.reserve_id(),
            title: mark.kind.title(),
            dest: vec![Object::Reference(page_id), "FitH".into(), y_dest.into()],
        })
        .collect();

    let (first, last) = match (items.first(), items.last()) {
        (Some(first), Some(last)) => (first.id, last.id),
        _ => return None,
    };

    let outline_root_id = writer.reserve_id();
    writer.set(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines", "First" => first, "Last" => last, "Count" => items.len() as i64,
        }
        .into(),
    );

    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::String(to_win_ansi(item.title), StringFormat::Literal),
            "Parent" => outline_root_id,
            "Dest" => item.dest.clone(),
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        writer.set(item.id, dict.into());
    }

    Some(outline_root_id)
}

// --- Internal Page Drawing Context ---

struct PageContext {
    page_height: f32,
    content: Content,
    state: LopdfPageRenderState,
}

/// Graphics state already set in the stream, so repeated values are not
/// re-emitted.
#[derive(Default, Clone, PartialEq)]
struct LopdfPageRenderState {
    font: Option<(&'static str, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw(&mut self, op: &DrawOp) -> Result<(), RenderError> {
        match op {
            DrawOp::Rect {
                rect,
                fill,
                stroke,
                radius,
                ..
            } => self.draw_rect(rect, *fill, *stroke, *radius),
            DrawOp::Text {
                x,
                y,
                text,
                size,
                weight,
                color,
                ..
            } => self.draw_text(text, *x, *y, *size, *weight, *color),
            DrawOp::Circle {
                cx, cy, radius, fill, ..
            } => self.draw_circle(*cx, *cy, *radius, *fill),
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rect, fill: Option<Color>, stroke: Option<Stroke>, radius: f32) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        if let Some(color) = fill {
            self.set_fill_color(color);
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }

        let x = mm_to_pt(rect.x);
        let w = mm_to_pt(rect.width);
        let h = mm_to_pt(rect.height);
        let y = flip_y(mm_to_pt(rect.y) + h, self.page_height);
        let r = mm_to_pt(radius).min(w / 2.0).min(h / 2.0);

        if r <= 0.0 {
            self.push("re", vec![x.into(), y.into(), w.into(), h.into()]);
        } else {
            self.rounded_rect_path(x, y, w, h, r);
        }

        let paint = match (fill.is_some(), stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            _ => "S",
        };
        self.push(paint, vec![]);
    }

    fn rounded_rect_path(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let k = r * KAPPA;
        let (right, top) = (x + w, y + h);

        self.push("m", vec![(x + r).into(), y.into()]);
        self.push("l", vec![(right - r).into(), y.into()]);
        self.curve(right - r + k, y, right, y + r - k, right, y + r);
        self.push("l", vec![right.into(), (top - r).into()]);
        self.curve(right, top - r + k, right - r + k, top, right - r, top);
        self.push("l", vec![(x + r).into(), top.into()]);
        self.curve(x + r - k, top, x, top - r + k, x, top - r);
        self.push("l", vec![x.into(), (y + r).into()]);
        self.curve(x, y + r - k, x + r - k, y, x + r, y);
        self.push("h", vec![]);
    }

    fn curve(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.push(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        );
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, fill: Color) {
        self.set_fill_color(fill);
        let cx = mm_to_pt(cx);
        let cy = flip_y(mm_to_pt(cy), self.page_height);
        let r = mm_to_pt(radius);
        let k = r * KAPPA;

        self.push("m", vec![(cx + r).into(), cy.into()]);
        self.curve(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        self.curve(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        self.curve(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        self.curve(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, weight: FontWeight, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(font_resource(weight), size);
        self.set_fill_color(color);
        let baseline_y = mm_to_pt(y) + size * BASELINE_RATIO;
        let pdf_y = flip_y(baseline_y, self.page_height);
        self.push("Td", vec![mm_to_pt(x).into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn set_font(&mut self, resource: &'static str, size: f32) {
        if self.state.font != Some((resource, size)) {
            self.push(
                "Tf",
                vec![Object::Name(resource.as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((resource, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        if self.state.stroke_color != Some(stroke.color) {
            let [r, g, b] = stroke.color.to_unit();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(stroke.color);
        }
        let width = mm_to_pt(stroke.width);
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_layout::Role;

    fn operators(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    fn text_op(text: &str, weight: FontWeight) -> DrawOp {
        DrawOp::Text {
            x: 14.0,
            y: 20.0,
            text: text.into(),
            size: 10.0,
            weight,
            color: Color::WHITE,
            role: Role::Body,
        }
    }

    #[test]
    fn text_uses_weight_specific_font() {
        let page = Page {
            index: 0,
            ops: vec![text_op("Regular", FontWeight::Regular), text_op("Bold", FontWeight::Bold)],
        };
        let content = page_content(&page, 297.0).unwrap();
        let fonts: Vec<_> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tf")
            .map(|op| op.operands[0].as_name().unwrap().to_vec())
            .collect();
        assert_eq!(fonts, [b"F1".to_vec(), b"F2".to_vec()]);
    }

    #[test]
    fn repeated_state_is_not_reemitted() {
        let page = Page {
            index: 0,
            ops: vec![
                text_op("one", FontWeight::Regular),
                text_op("two", FontWeight::Regular),
            ],
        };
        let content = page_content(&page, 297.0).unwrap();
        let ops = operators(&content);
        assert_eq!(ops.iter().filter(|o| **o == "Tf").count(), 1);
        assert_eq!(ops.iter().filter(|o| **o == "rg").count(), 1);
        assert_eq!(ops.iter().filter(|o| **o == "Tj").count(), 2);
    }

    #[test]
    fn blank_text_is_skipped() {
        let page = Page {
            index: 0,
            ops: vec![text_op("   ", FontWeight::Regular)],
        };
        assert!(page_content(&page, 297.0).unwrap().operations.is_empty());
    }

    #[test]
    fn square_rect_uses_re_and_rounded_uses_curves() {
        let square = DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            fill: Some(Color::BLACK),
            stroke: None,
            radius: 0.0,
            role: Role::Background,
        };
        let rounded = DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            fill: Some(Color::BLACK),
            stroke: Some(Stroke {
                color: Color::WHITE,
                width: 0.3,
            }),
            radius: 2.0,
            role: Role::Card,
        };
        let page = Page {
            index: 0,
            ops: vec![square, rounded],
        };
        let content = page_content(&page, 297.0).unwrap();
        let ops = operators(&content);
        assert!(ops.contains(&"re"));
        assert!(ops.contains(&"f"));
        assert_eq!(ops.iter().filter(|o| **o == "c").count(), 4);
        assert!(ops.contains(&"B"));
    }

    #[test]
    fn rect_position_is_flipped_into_pdf_space() {
        let page = Page {
            index: 0,
            ops: vec![DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 25.4, 25.4),
                fill: Some(Color::BLACK),
                stroke: None,
                radius: 0.0,
                role: Role::Card,
            }],
        };
        let content = page_content(&page, 254.0).unwrap();
        let re = content.operations.iter().find(|op| op.operator == "re").unwrap();
        let y = re.operands[1].as_float().unwrap();
        // 254mm = 720pt page, a one-inch box at the top starts at 648pt.
        assert!((y - 648.0).abs() < 0.01);
    }
}
