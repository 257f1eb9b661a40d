/// The two weights the CV layout uses. Each maps to one of the PDF base-14
/// Helvetica faces, so no font data has to be embedded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontWeight::Regular => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
        }
    }
}
