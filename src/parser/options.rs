//! Extraction options and configuration.

use crate::error::{Error, Result};
use crate::ocr::DEFAULT_LANGUAGE;

/// Options for extracting text from a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Page indices to extract (0-indexed), in the order given.
    /// `None` extracts every page.
    pub pages: Option<Vec<i64>>,

    /// Whether pages with too little embedded text may be OCR'd
    pub enable_ocr: bool,

    /// Tesseract language code
    pub language: String,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict extraction to the given page indices.
    pub fn with_pages(mut self, pages: impl IntoIterator<Item = i64>) -> Self {
        self.pages = Some(pages.into_iter().collect());
        self
    }

    /// Enable or disable the OCR fallback.
    pub fn with_ocr(mut self, enable: bool) -> Self {
        self.enable_ocr = enable;
        self
    }

    /// Disable the OCR fallback.
    pub fn without_ocr(mut self) -> Self {
        self.enable_ocr = false;
        self
    }

    /// Set the OCR language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Resolve the selection against a document of `page_count` pages.
    ///
    /// Every out-of-range index is reported in a single error.
    pub fn resolve_pages(&self, page_count: usize) -> Result<Vec<usize>> {
        let Some(pages) = &self.pages else {
            return Ok((0..page_count).collect());
        };

        let invalid: Vec<i64> = pages
            .iter()
            .copied()
            .filter(|&p| p < 0 || p as u64 >= page_count as u64)
            .collect();

        if !invalid.is_empty() {
            return Err(Error::InvalidPages {
                invalid,
                page_count,
            });
        }

        Ok(pages.iter().map(|&p| p as usize).collect())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            enable_ocr: true,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
