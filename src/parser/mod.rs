//! PDF page extraction.

mod backend;
mod extractor;
mod fallback;
mod options;

pub use backend::{LopdfBackend, PdfBackend};
pub use extractor::{needs_ocr, PdfExtractor, MIN_TEXT_LENGTH};
pub use fallback::{OcrOutcome, OcrStrategy, PageOcr, OCR_STRATEGIES};
pub use options::ExtractOptions;
