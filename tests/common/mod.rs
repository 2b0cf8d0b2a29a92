//! Shared helpers for building test PDFs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use pdfsift::error::{Error, Result};
use pdfsift::ocr::{PageRenderer, TextRecognizer};

/// Content of one generated page.
pub enum PageSpec {
    /// A page drawing the given text
    Text(&'static str),
    /// A page showing one 2x2 grey image per level, and no text
    Images(Vec<u8>),
    /// Like `Images`, with the grey declared through a one-component ICC profile
    IccImages(Vec<u8>),
}

/// Build a PDF with the given pages.
pub fn build_pdf(pages: &[PageSpec]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|spec| add_page(&mut doc, pages_id, font_id, spec).into())
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn add_page(doc: &mut Document, pages_id: ObjectId, font_id: ObjectId, spec: &PageSpec) -> ObjectId {
    match spec {
        PageSpec::Text(text) => {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            })
        }
        PageSpec::Images(levels) => {
            image_page(doc, pages_id, font_id, levels, Object::Name(b"DeviceGray".to_vec()))
        }
        PageSpec::IccImages(levels) => {
            let profile_id = doc.add_object(Stream::new(dictionary! { "N" => 1 }, vec![0; 16]));
            let color_space = Object::Array(vec![
                Object::Name(b"ICCBased".to_vec()),
                Object::Reference(profile_id),
            ]);
            image_page(doc, pages_id, font_id, levels, color_space)
        }
    }
}

fn image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    levels: &[u8],
    color_space: Object,
) -> ObjectId {
    let mut xobjects = lopdf::Dictionary::new();
    let mut operations = Vec::new();
    for (i, level) in levels.iter().enumerate() {
        let name = format!("Im{}", i + 1);
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 2,
                "ColorSpace" => color_space.clone(),
                "BitsPerComponent" => 8,
            },
            vec![*level; 4],
        ));
        xobjects.set(name.as_bytes().to_vec(), image_id);
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![100.into(), 0.into(), 0.into(), 100.into(), 72.into(), 500.into()],
        ));
        operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        operations.push(Operation::new("Q", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => xobjects,
        },
    })
}

/// Write `bytes` as `name` inside `dir`.
pub fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Long enough to be accepted without OCR.
pub const LONG_TEXT: &str = "This page carries plenty of embedded text to skip OCR entirely.";

/// Recognizer that answers from the first pixel's grey level.
pub struct PixelRecognizer;

impl TextRecognizer for PixelRecognizer {
    fn name(&self) -> &str {
        "pixel"
    }

    fn recognize(&self, image: &DynamicImage, _language: &str) -> Result<String> {
        Ok(match image.to_luma8().get_pixel(0, 0).0[0] {
            0 => String::new(),
            200 => "Rendered page text".to_string(),
            v => format!("Image text {}", v),
        })
    }
}

/// Renderer producing a uniform grey page, or failing when `level` is `None`.
pub struct FlatRenderer {
    pub level: Option<u8>,
}

impl PageRenderer for FlatRenderer {
    fn render_page(&self, _source: &Path, page: usize, _dpi: u32) -> Result<DynamicImage> {
        match self.level {
            Some(level) => Ok(DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
                4,
                4,
                image::Luma([level]),
            ))),
            None => Err(Error::Render {
                page,
                reason: "renderer disabled".into(),
            }),
        }
    }
}
