//! Object table and serialiser for a complete PDF file.
//!
//! Objects are collected by id and written in ascending id order once the
//! page tree is known, followed by a single-section xref table. Dictionary
//! keys are sorted and no dates or random ids are written, so the output is
//! a pure function of the objects added.

use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Write};

const RESOURCES_ID: ObjectId = (1, 0);
const PAGES_ID: ObjectId = (2, 0);
const CATALOG_ID: ObjectId = (3, 0);

/// Collects the objects of one PDF and serialises them with
/// [`PdfWriter::into_bytes`].
///
/// Ids 1 to 3 belong to the shared resource dictionary, the page tree and the
/// catalog; everything else is allocated on demand.
pub struct PdfWriter {
    objects: BTreeMap<u32, Object>,
    last_id: u32,
    page_ids: Vec<ObjectId>,
    outlines: Option<ObjectId>,
    info: Option<ObjectId>,
}

impl PdfWriter {
    /// Starts a file whose pages all share `fonts` as their font resources.
    pub fn new(fonts: Dictionary) -> Self {
        let mut objects = BTreeMap::new();
        objects.insert(RESOURCES_ID.0, Object::Dictionary(dictionary! { "Font" => fonts }));
        Self {
            objects,
            last_id: CATALOG_ID.0,
            page_ids: Vec::new(),
            outlines: None,
            info: None,
        }
    }

    pub fn resources_id(&self) -> ObjectId {
        RESOURCES_ID
    }

    pub fn pages_id(&self) -> ObjectId {
        PAGES_ID
    }

    /// Allocates an id whose object is supplied later with [`PdfWriter::set`].
    pub fn reserve_id(&mut self) -> ObjectId {
        self.last_id += 1;
        (self.last_id, 0)
    }

    pub fn add(&mut self, object: Object) -> ObjectId {
        let id = self.reserve_id();
        self.objects.insert(id.0, object);
        id
    }

    /// Stores `object` under a previously reserved id.
    pub fn set(&mut self, id: ObjectId, object: Object) {
        self.last_id = self.last_id.max(id.0);
        self.objects.insert(id.0, object);
    }

    pub fn add_content(&mut self, content: Content) -> Result<ObjectId, lopdf::Error> {
        let stream = Stream::new(Dictionary::new(), content.encode()?);
        Ok(self.add(Object::Stream(stream)))
    }

    /// Page objects in reading order, listed as the kids of the page tree.
    pub fn set_pages(&mut self, page_ids: Vec<ObjectId>) {
        self.page_ids = page_ids;
    }

    pub fn set_outlines(&mut self, root: Option<ObjectId>) {
        self.outlines = root;
    }

    /// Document information dictionary referenced from the trailer.
    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(self.add(Object::Dictionary(info)));
    }

    /// Completes the page tree and catalog and returns the file.
    pub fn into_bytes(mut self, version: &str) -> io::Result<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().copied().map(Object::Reference).collect();
        let count = kids.len() as i64;
        self.objects.insert(
            PAGES_ID.0,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => PAGES_ID };
        if let Some(root) = self.outlines {
            catalog.set("Outlines", root);
            catalog.set("PageMode", "UseOutlines");
        }
        self.objects.insert(CATALOG_ID.0, Object::Dictionary(catalog));

        let mut out = Vec::new();
        // The binary comment marks the file as 8-bit for transfer tools.
        write!(out, "%PDF-{version}\n%\u{e2}\u{e3}\u{cf}\u{d3}\n")?;

        let size = self.last_id + 1;
        let mut offsets = vec![None; size as usize];
        for (&id, object) in &self.objects {
            offsets[id as usize] = Some(out.len());
            write!(out, "{id} 0 obj\n")?;
            serialize(&mut out, object)?;
            out.write_all(b"\nendobj\n")?;
        }

        let xref_start = out.len();
        write!(out, "xref\n0 {size}\n")?;
        for offset in &offsets {
            match offset {
                Some(offset) => write!(out, "{offset:010} 00000 n \n")?,
                None => out.write_all(b"0000000000 65535 f \n")?,
            }
        }

        let mut trailer = dictionary! { "Size" => size as i64, "Root" => CATALOG_ID };
        if let Some(info) = self.info {
            trailer.set("Info", info);
        }
        out.write_all(b"trailer\n")?;
        serialize_dictionary(&mut out, &trailer)?;
        write!(out, "\nstartxref\n{xref_start}\n%%EOF")?;
        Ok(out)
    }
}

/// Shortest decimal form with at most three fractional digits.
fn real(value: f32) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn serialize(out: &mut Vec<u8>, object: &Object) -> io::Result<()> {
    match object {
        Object::Null => out.write_all(b"null"),
        Object::Boolean(value) => write!(out, "{value}"),
        Object::Integer(value) => write!(out, "{value}"),
        Object::Real(value) => out.write_all(real(*value).as_bytes()),
        Object::Name(name) => {
            out.push(b'/');
            out.write_all(name)
        }
        Object::String(bytes, StringFormat::Literal) => {
            out.push(b'(');
            for &byte in bytes {
                match byte {
                    b'(' | b')' | b'\\' => out.extend_from_slice(&[b'\\', byte]),
                    b'\r' => out.extend_from_slice(b"\\r"),
                    _ => out.push(byte),
                }
            }
            out.write_all(b")")
        }
        Object::String(bytes, StringFormat::Hexadecimal) => {
            out.push(b'<');
            for byte in bytes {
                write!(out, "{byte:02X}")?;
            }
            out.write_all(b">")
        }
        Object::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                serialize(out, item)?;
            }
            out.write_all(b"]")
        }
        Object::Dictionary(dict) => serialize_dictionary(out, dict),
        Object::Stream(stream) => {
            let mut dict = stream.dict.clone();
            dict.set("Length", stream.content.len() as i64);
            serialize_dictionary(out, &dict)?;
            out.write_all(b"\nstream\n")?;
            out.write_all(&stream.content)?;
            out.write_all(b"\nendstream")
        }
        Object::Reference((id, generation)) => write!(out, "{id} {generation} R"),
    }
}

/// Keys in byte order, so insertion order never reaches the output.
fn serialize_dictionary(out: &mut Vec<u8>, dict: &Dictionary) -> io::Result<()> {
    let entries: BTreeMap<&[u8], &Object> = dict.iter().map(|(key, value)| (key.as_slice(), value)).collect();
    out.write_all(b"<<")?;
    for (key, value) in entries {
        out.push(b'/');
        out.write_all(key)?;
        out.push(b' ');
        serialize(out, value)?;
        out.push(b' ');
    }
    out.write_all(b">>")
}
