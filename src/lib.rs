//! # pdfsift
//!
//! PDF text extraction with an OCR fallback and extractive summarization.
//!
//! Each page's embedded text is used when it is long enough; otherwise the
//! page's images, or a full-page rendering, are run through Tesseract.
//! Extracted text can be condensed into a summary with a detected focus.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{extract_file, summarize, SummarizeOptions};
//!
//! fn main() -> pdfsift::Result<()> {
//!     let result = extract_file("report.pdf")?;
//!     for page in &result.content {
//!         println!("{}", page);
//!     }
//!
//!     let options = SummarizeOptions::new().with_context("highlight OCT findings");
//!     let summary = summarize(&result.full_text(), &options);
//!     println!("{}", summary.summary);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **OCR fallback**: embedded images first, then a 300 DPI page rendering
//! - **Graceful degradation**: pages keep their embedded text when OCR is
//!   missing or fails
//! - **LSA summaries**: stemmed, stop-word filtered sentence ranking
//! - **Focus detection**: keyword themes matched against caller context
//! - **Tool responses**: JSON results or tagged `{error, type}` objects

pub mod detect;
pub mod error;
pub mod model;
pub mod ocr;
pub mod parser;
pub mod summary;
pub mod tools;

// Re-export commonly used types
pub use detect::{
    detect_header_from_bytes, detect_header_from_path, is_pdf_bytes, validate_file, PdfHeader,
    MAX_FILE_SIZE_MB,
};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    EmbeddedImage, ExtractionResult, ImageEncoding, PageText, Palette, SummaryResult, TextSource,
};
pub use ocr::{OcrConfig, OcrEngine, PageRenderer, TextRecognizer};
pub use parser::{ExtractOptions, PdfExtractor, MIN_TEXT_LENGTH};
pub use summary::{SummarizeOptions, Summarizer};
pub use tools::{ExtractRequest, JsonFormat, SummarizeRequest, ToolResponse, Toolbox};

use std::path::Path;

/// Extract every page of a PDF file.
///
/// OCR tools are located from the environment on each call; build a
/// [`PdfExtractor`] once to reuse the probe.
///
/// # Example
///
/// ```no_run
/// use pdfsift::extract_file;
///
/// let result = extract_file("report.pdf").unwrap();
/// println!("Pages: {}", result.page_count);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    extract_file_with_options(path, &ExtractOptions::default())
}

/// Extract a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfsift::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().with_pages([0, 2]).without_ocr();
/// let result = extract_file_with_options("report.pdf", &options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    PdfExtractor::new().extract(path, options)
}

/// Summarize text.
pub fn summarize(text: &str, options: &SummarizeOptions) -> SummaryResult {
    Summarizer::new().summarize(text, options)
}

/// Extract a PDF file on the blocking thread pool.
#[cfg(feature = "async")]
pub async fn extract_file_async(
    path: impl Into<std::path::PathBuf>,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    let path = path.into();
    tokio::task::spawn_blocking(move || extract_file_with_options(&path, &options))
        .await
        .map_err(|e| Error::Processing(format!("extraction task failed: {}", e)))?
}

/// Summarize text on the blocking thread pool.
#[cfg(feature = "async")]
pub async fn summarize_async(text: String, options: SummarizeOptions) -> Result<SummaryResult> {
    tokio::task::spawn_blocking(move || summarize(&text, &options))
        .await
        .map_err(|e| Error::Processing(format!("summarization task failed: {}", e)))
}
