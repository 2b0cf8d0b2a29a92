//! Raster images embedded in a page's resources.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the image bytes of an [`EmbeddedImage`] are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageEncoding {
    /// A complete JPEG file (`DCTDecode`)
    Jpeg,
    /// A complete JPEG 2000 codestream (`JPXDecode`)
    Jpeg2000,
    /// Decompressed samples, packed row by row
    Raw,
    /// Bytes in a filter we cannot decode (CCITT, JBIG2, ...)
    Opaque,
}

/// An image XObject pulled out of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedImage {
    /// Resource name on the page (e.g. "Im0")
    pub name: String,

    /// Image payload
    #[serde(skip_serializing)]
    pub data: Vec<u8>,

    /// Payload encoding
    pub encoding: ImageEncoding,

    /// Width in pixels
    pub width: Option<u32>,

    /// Height in pixels
    pub height: Option<u32>,

    /// Colour space (e.g. "DeviceRGB", "DeviceCMYK", "DeviceGray")
    pub color_space: Option<String>,

    /// Bits per component (e.g. 8)
    pub bits_per_component: Option<u8>,

    /// Colour table of an `Indexed` image
    #[serde(skip)]
    pub palette: Option<Palette>,
}

/// Colour table of an `Indexed` colour space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Colour space of the table entries (e.g. "DeviceRGB")
    pub base: String,

    /// Highest valid index
    pub hival: u8,

    /// Table entries, packed in the base colour space
    pub lookup: Vec<u8>,
}

impl Palette {
    /// Create a palette.
    pub fn new(base: impl Into<String>, hival: u8, lookup: Vec<u8>) -> Self {
        Self {
            base: base.into(),
            hival,
            lookup,
        }
    }

    /// Replace each index with its table entry. Indices above `hival` are clamped.
    fn expand(&self, indices: &[u8], name: &str) -> Result<Vec<u8>> {
        let components = components_of(&self.base).ok_or_else(|| {
            Error::Ocr(format!("image {} has unsupported palette base {}", name, self.base))
        })?;

        let mut out = Vec::with_capacity(indices.len() * components);
        for &index in indices {
            let start = index.min(self.hival) as usize * components;
            let entry = self
                .lookup
                .get(start..start + components)
                .ok_or_else(|| Error::Ocr(format!("image {} has a short palette", name)))?;
            out.extend_from_slice(entry);
        }
        Ok(out)
    }
}

impl EmbeddedImage {
    /// Create a new embedded image.
    pub fn new(name: impl Into<String>, data: Vec<u8>, encoding: ImageEncoding) -> Self {
        Self {
            name: name.into(),
            data,
            encoding,
            width: None,
            height: None,
            color_space: None,
            bits_per_component: None,
            palette: None,
        }
    }

    /// Set image dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set colour space.
    pub fn with_color_space(mut self, color_space: impl Into<String>) -> Self {
        self.color_space = Some(color_space.into());
        self
    }

    /// Set bits per component.
    pub fn with_bits_per_component(mut self, bits: u8) -> Self {
        self.bits_per_component = Some(bits);
        self
    }

    /// Set the colour table of an `Indexed` image.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Produce a self-describing image file (JPEG, PNG, ...) for the OCR engine.
    ///
    /// Raw samples are packed into a PNG. Encoded payloads are returned
    /// unchanged; if the decoder cannot read them the OCR call fails.
    pub fn to_image_bytes(&self) -> Result<Vec<u8>> {
        match self.encoding {
            ImageEncoding::Raw => {
                let image = self.raw_to_dynamic()?;
                let mut out = Vec::new();
                image.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
                Ok(out)
            }
            _ => Ok(self.data.clone()),
        }
    }

    /// Interpret raw samples according to colour space and depth.
    fn raw_to_dynamic(&self) -> Result<DynamicImage> {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(Error::Ocr(format!("image {} has no dimensions", self.name))),
        };
        let bits = self.bits_per_component.unwrap_or(8);
        let pixels = width as usize * height as usize;
        let color_space = self.color_space.as_deref().unwrap_or("DeviceRGB");

        if color_space == "Indexed" {
            return self.indexed_to_dynamic(width, height, bits);
        }

        let image = match (color_space, bits) {
            ("DeviceGray" | "CalGray", 8) => {
                let data = take_exact(&self.data, pixels, &self.name)?;
                GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
            }
            ("DeviceGray" | "CalGray", 1) => {
                let data = unpack_bilevel(&self.data, width as usize, height as usize, &self.name)?;
                GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
            }
            ("DeviceRGB" | "CalRGB", 8) => {
                let data = take_exact(&self.data, pixels * 3, &self.name)?;
                RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
            }
            ("DeviceCMYK", 8) => {
                let data = take_exact(&self.data, pixels * 4, &self.name)?;
                RgbImage::from_raw(width, height, cmyk_to_rgb(&data)).map(DynamicImage::ImageRgb8)
            }
            _ => None,
        };

        image.ok_or_else(|| {
            Error::Ocr(format!(
                "unsupported raw image {} ({} at {} bpc)",
                self.name, color_space, bits
            ))
        })
    }

    /// Look every sample up in the palette and decode the result as 8-bit base colour.
    fn indexed_to_dynamic(&self, width: u32, height: u32, bits: u8) -> Result<DynamicImage> {
        let palette = self
            .palette
            .as_ref()
            .ok_or_else(|| Error::Ocr(format!("image {} has no palette", self.name)))?;
        let indices = unpack_samples(&self.data, width as usize, height as usize, bits, &self.name)?;

        EmbeddedImage::new(self.name.as_str(), palette.expand(&indices, &self.name)?, ImageEncoding::Raw)
            .with_dimensions(width, height)
            .with_color_space(palette.base.as_str())
            .with_bits_per_component(8)
            .raw_to_dynamic()
    }
}

/// Number of components per sample in a device colour space.
fn components_of(color_space: &str) -> Option<usize> {
    match color_space {
        "DeviceGray" | "CalGray" => Some(1),
        "DeviceRGB" | "CalRGB" => Some(3),
        "DeviceCMYK" => Some(4),
        _ => None,
    }
}

/// Split rows of 1, 2, 4 or 8-bit samples into one byte per sample.
fn unpack_samples(data: &[u8], width: usize, height: usize, bits: u8, name: &str) -> Result<Vec<u8>> {
    if !matches!(bits, 1 | 2 | 4 | 8) {
        return Err(Error::Ocr(format!("image {} has unsupported depth {}", name, bits)));
    }
    let bits = bits as usize;
    let stride = (width * bits).div_ceil(8);
    if data.len() < stride * height {
        return Err(Error::Ocr(format!("image {} is truncated", name)));
    }

    let mask = (1u16 << bits) - 1;
    let mut out = Vec::with_capacity(width * height);
    for row in data.chunks(stride).take(height) {
        for x in 0..width {
            let offset = x * bits;
            let shift = 8 - bits - offset % 8;
            out.push(((row[offset / 8] as u16 >> shift) & mask) as u8);
        }
    }
    Ok(out)
}

fn take_exact(data: &[u8], len: usize, name: &str) -> Result<Vec<u8>> {
    data.get(..len)
        .map(|d| d.to_vec())
        .ok_or_else(|| Error::Ocr(format!("image {} is truncated", name)))
}

/// Expand 1-bit rows (0 = black) into 8-bit grey samples.
fn unpack_bilevel(data: &[u8], width: usize, height: usize, name: &str) -> Result<Vec<u8>> {
    let stride = width.div_ceil(8);
    if data.len() < stride * height {
        return Err(Error::Ocr(format!("image {} is truncated", name)));
    }

    let mut out = Vec::with_capacity(width * height);
    for row in data.chunks(stride).take(height) {
        for x in 0..width {
            let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
            out.push(if bit == 1 { 255 } else { 0 });
        }
    }
    Ok(out)
}

fn cmyk_to_rgb(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u16;
            [
                ((255 - px[0] as u16) * k / 255) as u8,
                ((255 - px[1] as u16) * k / 255) as u8,
                ((255 - px[2] as u16) * k / 255) as u8,
            ]
        })
        .collect()
}
