//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the few document operations the
//! extractor needs, isolating the concrete PDF library (lopdf) from the
//! page-level decision logic.

use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{EmbeddedImage, ImageEncoding, Palette};

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Embedded text of page `index` (0-indexed), untrimmed.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Image XObjects referenced by page `index`, in resource order.
    fn page_images(&self, index: usize) -> Result<Vec<EmbeddedImage>>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    /// Page object ids in document order
    pages: Vec<ObjectId>,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(load_error)?;
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(load_error)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        // get_pages is keyed by 1-based page number, already sorted.
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.pages.get(index).copied().ok_or_else(|| Error::InvalidPages {
            invalid: vec![index as i64],
            page_count: self.pages.len(),
        })
    }

    /// Resolve a value that may be stored inline or behind a reference.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// The page's resource dictionary, inherited from ancestors if absent.
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.doc.get_dictionary(page_id).ok()?;
        // Bounded walk up the page tree guards against Parent cycles.
        for _ in 0..64 {
            if let Some(res) = node.get(b"Resources").ok().and_then(|r| self.resolve_dict(r)) {
                return Some(res);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    /// Decode an image XObject into an [`EmbeddedImage`].
    fn image_xobject(&self, name: &[u8], obj_ref: ObjectId) -> Option<EmbeddedImage> {
        let stream = match self.doc.get_object(obj_ref) {
            Ok(Object::Stream(stream)) => stream,
            _ => return None,
        };
        let dict = &stream.dict;

        match dict.get(b"Subtype").and_then(|s| s.as_name_str()) {
            Ok("Image") => {}
            _ => return None,
        }

        let filters: Vec<&str> = match dict.get(b"Filter") {
            Ok(Object::Name(n)) => vec![std::str::from_utf8(n).unwrap_or("")],
            Ok(Object::Array(arr)) => arr.iter().filter_map(|f| f.as_name_str().ok()).collect(),
            _ => Vec::new(),
        };

        let (encoding, data) = match filters.as_slice() {
            ["DCTDecode"] => (ImageEncoding::Jpeg, stream.content.clone()),
            ["JPXDecode"] => (ImageEncoding::Jpeg2000, stream.content.clone()),
            fs if fs.iter().any(|f| matches!(*f, "CCITTFaxDecode" | "JBIG2Decode")) => {
                (ImageEncoding::Opaque, stream.content.clone())
            }
            _ => {
                // Unfiltered streams make lopdf report an error; their content is already raw.
                let decoded = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                (ImageEncoding::Raw, decoded)
            }
        };

        let mut image = EmbeddedImage::new(String::from_utf8_lossy(name), data, encoding);

        let width = dict.get(b"Width").and_then(|w| w.as_i64()).ok();
        let height = dict.get(b"Height").and_then(|h| h.as_i64()).ok();
        if let (Some(w), Some(h)) = (width, height) {
            image = image.with_dimensions(w.max(0) as u32, h.max(0) as u32);
        }

        if let Ok(bits) = dict.get(b"BitsPerComponent").and_then(|b| b.as_i64()) {
            image = image.with_bits_per_component(bits.clamp(0, 16) as u8);
        }

        if let Some((cs_name, palette)) = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|cs| self.color_space(cs, true))
        {
            image = image.with_color_space(cs_name);
            if let Some(palette) = palette {
                image = image.with_palette(palette);
            }
        }

        Some(image)
    }

    fn deref<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(r) => self.doc.get_object(*r).ok(),
            other => Some(other),
        }
    }

    /// Name of the colour space family the samples are in.
    ///
    /// `ICCBased` resolves to the device space with the profile's component
    /// count. `Indexed` keeps its name and yields the palette; its base is
    /// resolved one level deep only.
    fn color_space(&self, obj: &Object, allow_indexed: bool) -> Option<(String, Option<Palette>)> {
        let arr = match self.deref(obj)? {
            Object::Name(n) => return Some((String::from_utf8_lossy(n).into_owned(), None)),
            Object::Array(arr) => arr,
            _ => return None,
        };

        let family = arr.first()?.as_name_str().ok()?;
        match family {
            "ICCBased" => {
                let components = arr.get(1).and_then(|profile| self.icc_components(profile));
                let name = match components {
                    Some(1) => "DeviceGray",
                    Some(3) => "DeviceRGB",
                    Some(4) => "DeviceCMYK",
                    _ => "ICCBased",
                };
                Some((name.to_string(), None))
            }
            "Indexed" if allow_indexed => {
                let (base, _) = self.color_space(arr.get(1)?, false)?;
                let hival = self.deref(arr.get(2)?)?.as_i64().ok()?.clamp(0, 255) as u8;
                let lookup = match self.deref(arr.get(3)?)? {
                    Object::String(bytes, _) => bytes.clone(),
                    Object::Stream(stream) => stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone()),
                    _ => return None,
                };
                Some(("Indexed".to_string(), Some(Palette::new(base, hival, lookup))))
            }
            other => Some((other.to_string(), None)),
        }
    }

    /// The `/N` entry of an ICC profile stream.
    fn icc_components(&self, profile: &Object) -> Option<i64> {
        let dict = match self.deref(profile)? {
            Object::Stream(stream) => &stream.dict,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        dict.get(b"N").and_then(|n| n.as_i64()).ok()
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.page_id(index)?;
        self.doc
            .extract_text(&[index as u32 + 1])
            .map_err(|e| Error::Processing(format!("page {}: {}", index, e)))
    }

    fn page_images(&self, index: usize) -> Result<Vec<EmbeddedImage>> {
        let page_id = self.page_id(index)?;

        let xobjects = self
            .page_resources(page_id)
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|x| self.resolve_dict(x));

        let Some(xobjects) = xobjects else {
            return Ok(Vec::new());
        };

        Ok(xobjects
            .iter()
            .filter_map(|(name, obj)| {
                let obj_ref = obj.as_reference().ok()?;
                self.image_xobject(name, obj_ref)
            })
            .collect())
    }
}

fn load_error(err: lopdf::Error) -> Error {
    match err {
        lopdf::Error::IO(e) if e.kind() != std::io::ErrorKind::UnexpectedEof => Error::Io(e),
        other => Error::Corrupted(other.to_string()),
    }
}
