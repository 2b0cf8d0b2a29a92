//! Value types shared by the extractor, the OCR engine and the summarizer.

mod embedded;
mod page;
mod result;

pub use embedded::{EmbeddedImage, ImageEncoding, Palette};
pub use page::{PageText, TextSource};
pub use result::{ExtractionResult, SummaryResult};
