//! Extraction and summarization results.

use serde::{Deserialize, Serialize};

use super::PageText;

/// Result of extracting text from a PDF.
///
/// `ocr_used` is true exactly when `ocr_pages` is present and non-empty;
/// both are derived from the page list in [`ExtractionResult::from_pages`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Source file name (no directory)
    pub file: String,

    /// Total pages in the document, regardless of selection
    pub page_count: usize,

    /// Labelled page texts in selection order
    pub content: Vec<String>,

    ocr_used: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    ocr_pages: Option<Vec<usize>>,

    /// Summary of the joined content, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Detected focus, when requested and found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl ExtractionResult {
    /// Build a result from the processed pages.
    pub fn from_pages(file: impl Into<String>, page_count: usize, pages: &[PageText]) -> Self {
        let ocr_pages: Vec<usize> = pages
            .iter()
            .filter(|p| p.used_ocr())
            .map(|p| p.index)
            .collect();

        Self {
            file: file.into(),
            page_count,
            content: pages.iter().map(PageText::label).collect(),
            ocr_used: !ocr_pages.is_empty(),
            ocr_pages: if ocr_pages.is_empty() {
                None
            } else {
                Some(ocr_pages)
            },
            summary: None,
            focus: None,
        }
    }

    /// Whether any page's text came from OCR.
    pub fn ocr_used(&self) -> bool {
        self.ocr_used
    }

    /// Indices of pages whose text came from OCR, in processing order.
    pub fn ocr_pages(&self) -> Option<&[usize]> {
        self.ocr_pages.as_deref()
    }

    /// All page texts joined with a blank line, as fed to the summarizer.
    pub fn full_text(&self) -> String {
        self.content.join("\n\n")
    }

    /// Attach a summary; `focus` is only set when the summary carries one.
    pub fn with_summary(mut self, summary: SummaryResult) -> Self {
        self.summary = Some(summary.summary);
        self.focus = summary.focus;
        self
    }
}

/// Result of summarizing a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Extractive summary (possibly empty)
    pub summary: String,

    /// Theme label, only when context was supplied and matched
    pub focus: Option<String>,
}

impl SummaryResult {
    /// Create a summary result.
    pub fn new(summary: impl Into<String>, focus: Option<String>) -> Self {
        Self {
            summary: summary.into(),
            focus,
        }
    }

    /// The result for empty input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the summary text is empty.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}
