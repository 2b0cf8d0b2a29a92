//! Page-level types.

use serde::{Deserialize, Serialize};

/// Where a page's final text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// Text encoded in the page's content stream
    Embedded,
    /// Text recognized from embedded images or a page rendering
    Ocr,
}

/// The extracted text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page index (0-indexed)
    pub index: usize,

    /// Final page text
    pub text: String,

    /// Origin of `text`
    pub source: TextSource,
}

impl PageText {
    /// Page text taken from the content stream.
    pub fn embedded(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            source: TextSource::Embedded,
        }
    }

    /// Page text produced by OCR.
    pub fn ocr(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            source: TextSource::Ocr,
        }
    }

    /// Page number as shown to readers (1-indexed).
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Whether OCR supplied this page's text.
    pub fn used_ocr(&self) -> bool {
        self.source == TextSource::Ocr
    }

    /// The labelled form used in extraction results, e.g. `Page 3: ...`.
    pub fn label(&self) -> String {
        format!("Page {}: {}", self.number(), self.text)
    }
}
