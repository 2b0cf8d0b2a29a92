//! OCR fallback chain for pages with too little embedded text.
//!
//! Strategies run in order until one yields text. A strategy that errors
//! or finds nothing hands over to the next one; the chain as a whole never
//! fails, it only reports that no text was recovered.

use std::path::Path;

use crate::error::Error;
use crate::ocr::{OcrEngine, PageRenderer, RENDER_DPI};

use super::backend::PdfBackend;

/// One way of recovering a page's text through OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrStrategy {
    /// Recognize every image XObject on the page
    EmbeddedImages,
    /// Rasterize the whole page and recognize the rendering
    RenderedPage,
}

/// Strategies in the order they are attempted.
pub const OCR_STRATEGIES: [OcrStrategy; 2] = [OcrStrategy::EmbeddedImages, OcrStrategy::RenderedPage];

/// What a single strategy produced.
#[derive(Debug)]
pub enum OcrOutcome {
    /// Non-empty recognized text
    Text(String),
    /// The strategy ran but found nothing to recognize or recognized nothing
    NoResult,
    /// The strategy failed
    Failed(Error),
}

/// Everything the chain needs to OCR pages of one document.
pub struct PageOcr<'a> {
    pub(crate) engine: &'a OcrEngine,
    pub(crate) renderer: &'a dyn PageRenderer,
    pub(crate) backend: &'a dyn PdfBackend,
    pub(crate) source: &'a Path,
    pub(crate) language: &'a str,
}

impl PageOcr<'_> {
    /// Run the chain on page `index`, returning the first text recovered.
    pub fn run(&self, index: usize) -> Option<String> {
        for strategy in OCR_STRATEGIES {
            match self.attempt(strategy, index) {
                OcrOutcome::Text(text) => {
                    log::debug!("Page {}: OCR via {:?} succeeded", index, strategy);
                    return Some(text);
                }
                OcrOutcome::NoResult => {
                    log::debug!("Page {}: OCR via {:?} found no text", index, strategy);
                }
                OcrOutcome::Failed(e) => {
                    log::warn!("Page {}: OCR via {:?} failed: {}", index, strategy, e);
                }
            }
        }
        None
    }

    /// Run a single strategy.
    pub fn attempt(&self, strategy: OcrStrategy, index: usize) -> OcrOutcome {
        match strategy {
            OcrStrategy::EmbeddedImages => self.from_images(index),
            OcrStrategy::RenderedPage => self.from_rendering(index),
        }
    }

    /// OCR every embedded image; any single failure fails the whole strategy.
    fn from_images(&self, index: usize) -> OcrOutcome {
        let images = match self.backend.page_images(index) {
            Ok(images) => images,
            Err(e) => return OcrOutcome::Failed(e),
        };

        let mut texts = Vec::new();
        for image in &images {
            let recognized = image
                .to_image_bytes()
                .and_then(|bytes| self.engine.extract_text(&bytes, self.language));
            match recognized {
                Ok(text) if !text.is_empty() => texts.push(text),
                Ok(_) => {}
                Err(e) => return OcrOutcome::Failed(e),
            }
        }

        if texts.is_empty() {
            OcrOutcome::NoResult
        } else {
            OcrOutcome::Text(texts.join("\n\n"))
        }
    }

    fn from_rendering(&self, index: usize) -> OcrOutcome {
        let rendered = self
            .renderer
            .render_page(self.source, index, RENDER_DPI)
            .and_then(|image| self.engine.extract_text_from_image(&image, self.language));

        match rendered {
            Ok(text) if !text.is_empty() => OcrOutcome::Text(text),
            Ok(_) => OcrOutcome::NoResult,
            Err(e) => OcrOutcome::Failed(e),
        }
    }
}
