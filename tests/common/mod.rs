use folio::{ContentModel, ExportConfig};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn portfolio() -> ContentModel {
    ContentModel::from_json_str(include_str!("../data/portfolio.json")).expect("fixture parses")
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every `Tj` string operand on every page, in content order. The
    /// renderer writes one run per `Tj`, so each entry is one laid-out line.
    pub fn text_runs(&self) -> Vec<String> {
        let mut runs = Vec::new();
        for page_id in self.doc.get_pages().values() {
            let Ok(content) = self.doc.get_and_decode_page_content(*page_id) else {
                continue;
            };
            for op in content.operations {
                if op.operator != "Tj" {
                    continue;
                }
                if let Some(Ok(text)) = op.operands.first().map(|o| o.as_str()) {
                    runs.push(text.iter().map(|&b| decode_win_ansi(b)).collect());
                }
            }
        }
        runs
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Enough of WinAnsi to read back what the fixtures contain.
fn decode_win_ansi(byte: u8) -> char {
    match byte {
        0x85 => '\u{2026}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0xB7 => '\u{00B7}',
        b => b as char,
    }
}

pub fn render(content: &ContentModel) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = folio::render_pdf(content, &ExportConfig::default())?;
    GeneratedPdf::from_bytes(bytes)
}
