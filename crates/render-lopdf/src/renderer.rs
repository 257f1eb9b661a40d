use crate::helpers::{self, FONT_BOLD, FONT_REGULAR};
use crate::writer::PdfWriter;
use folio_layout::Document;
use folio_render_core::utils::mm_to_pt;
use folio_render_core::{DocumentRenderer, RenderError};
use folio_types::FontWeight;
use lopdf::{Dictionary, Object, StringFormat, dictionary};

const PDF_VERSION: &str = "1.7";
const PRODUCER: &str = "folio";

/// Renders documents to PDF with the base-14 Helvetica faces.
///
/// No font program is embedded, which keeps output small and matches the
/// metrics the layout engine measured with.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    title: Option<String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Title` entry of the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn font_dict() -> Dictionary {
        let mut font_dict = Dictionary::new();
        for (internal_name, weight) in [(FONT_REGULAR, FontWeight::Regular), (FONT_BOLD, FontWeight::Bold)] {
            let single_font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => weight.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            };
            font_dict.set(internal_name.as_bytes(), Object::Dictionary(single_font_dict));
        }
        font_dict
    }

    fn info_dict(&self) -> Dictionary {
        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Some(title) = &self.title {
            info.set(
                "Title",
                Object::String(folio_render_core::utils::to_win_ansi(title), StringFormat::Literal),
            );
        }
        info
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        if document.pages.is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        let mut writer = PdfWriter::new(Self::font_dict());
        let page_width = mm_to_pt(document.size.width);
        let page_height = mm_to_pt(document.size.height);

        // Page ids are reserved up front so the outline can point at them.
        let page_ids: Vec<_> = document.pages.iter().map(|_| writer.reserve_id()).collect();

        for (page, page_id) in document.pages.iter().zip(&page_ids) {
            let content = helpers::page_content(page, document.size.height)?;
            let content_id = writer.add_content(content)?;
            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => writer.pages_id(),
                "MediaBox" => vec![0.0.into(), 0.0.into(), page_width.into(), page_height.into()],
                "Contents" => Object::Reference(content_id),
                "Resources" => writer.resources_id(),
            };
            writer.set(*page_id, page_dict.into());
        }

        let outline_root_id =
            helpers::build_outlines(&mut writer, &document.sections, &page_ids, document.size.height);
        writer.set_outlines(outline_root_id);
        writer.set_info(self.info_dict());
        writer.set_pages(page_ids);

        let bytes = writer.into_bytes(PDF_VERSION)?;
        log::debug!(
            "Rendered {} page(s) into {} bytes",
            document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_layout::{LayoutConfig, LayoutEngine, SectionKind, StandardFontMetrics, TextStyle, Theme};
    use folio_types::Color;
    use std::sync::Arc;

    fn sample_document(paragraphs: usize) -> Document {
        let mut engine = LayoutEngine::new(
            LayoutConfig::a4(),
            Theme::dark(),
            Arc::new(StandardFontMetrics::new()),
        );
        engine.begin_section(SectionKind::Summary, 20.0);
        engine.section_title("Summary").unwrap();
        for i in 0..paragraphs {
            engine
                .wrapped_text(
                    &format!("Paragraph {i} \u{00B7} measured and wrapped to the content width."),
                    14.0,
                    TextStyle::regular(10.0, Color::WHITE),
                    182.0,
                )
                .unwrap();
        }
        engine.finish()
    }

    fn extract_tj_strings(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Vec<String> {
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok())
            .map(|bytes| bytes.iter().map(|&b| b as char).collect())
            .collect()
    }

    #[test]
    fn renders_loadable_pdf_with_one_page_per_document_page() {
        let document = sample_document(100);
        assert!(document.page_count() > 1);
        let bytes = LopdfRenderer::new().render(&document).unwrap();
        let pdf = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), document.page_count());
    }

    #[test]
    fn text_survives_round_trip() {
        let bytes = LopdfRenderer::new().render(&sample_document(1)).unwrap();
        let pdf = lopdf::Document::load_mem(&bytes).unwrap();
        let first_page = *pdf.get_pages().get(&1).unwrap();
        let texts = extract_tj_strings(&pdf, first_page);
        assert_eq!(texts[0], "SUMMARY");
        assert!(texts[1].starts_with("Paragraph 0 \u{00B7}"));
    }

    #[test]
    fn output_is_deterministic() {
        let document = sample_document(30);
        let renderer = LopdfRenderer::new().with_title("CV");
        assert_eq!(renderer.render(&document).unwrap(), renderer.render(&document).unwrap());
    }

    #[test]
    fn empty_document_is_rejected() {
        let mut document = sample_document(1);
        document.pages.clear();
        assert!(matches!(
            LopdfRenderer::new().render(&document),
            Err(RenderError::EmptyDocument)
        ));
    }

    #[test]
    fn sections_become_bookmarks() {
        let bytes = LopdfRenderer::new().render(&sample_document(1)).unwrap();
        let pdf = lopdf::Document::load_mem(&bytes).unwrap();
        let catalog = pdf.catalog().unwrap();
        assert!(catalog.get(b"Outlines").is_ok());
    }
}
