//! OCR engine.
//!
//! Availability is probed once when the engine is built. An
//! [`OcrEngine::Unavailable`] engine answers every request with
//! [`Error::EngineUnavailable`] instead of re-checking for Tesseract.
//!
//! ```no_run
//! use pdfsift::ocr::OcrEngine;
//!
//! let engine = OcrEngine::detect();
//! if engine.is_available() {
//!     let bytes = std::fs::read("scan.png")?;
//!     println!("{}", engine.extract_text(&bytes, "eng")?);
//! }
//! # Ok::<(), pdfsift::Error>(())
//! ```

mod color;
mod config;
mod render;
mod tesseract;

pub use color::{classify, normalize, ColorMode};
pub use config::{OcrConfig, PDFTOPPM_CMD_ENV, TESSERACT_CMD_ENV, WINDOWS_TESSERACT_PATHS};
pub use render::{PageRenderer, PdftoppmRenderer, RENDER_DPI};
pub use tesseract::TesseractCli;

use image::DynamicImage;

use crate::error::{Error, Result};

/// Tesseract language used when the caller does not choose one.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// A text recognition backend.
pub trait TextRecognizer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Recognize text in an 8-bit grey or RGB image.
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String>;
}

/// OCR capability, fixed at construction.
pub enum OcrEngine {
    /// A working recognizer
    Available(Box<dyn TextRecognizer>),
    /// No recognizer installed; every call reports [`Error::EngineUnavailable`]
    Unavailable,
}

impl OcrEngine {
    /// Probe for Tesseract using configuration from the environment.
    pub fn detect() -> Self {
        Self::detect_with(&OcrConfig::from_env())
    }

    /// Probe for Tesseract using explicit configuration.
    pub fn detect_with(config: &OcrConfig) -> Self {
        match TesseractCli::probe(config) {
            Some(cli) => Self::with_recognizer(cli),
            None => {
                log::info!("Tesseract not found; OCR disabled");
                Self::Unavailable
            }
        }
    }

    /// Build an engine around a specific recognizer.
    pub fn with_recognizer(recognizer: impl TextRecognizer + 'static) -> Self {
        Self::Available(Box::new(recognizer))
    }

    /// An engine with no OCR capability.
    pub fn unavailable() -> Self {
        Self::Unavailable
    }

    /// Whether OCR can run. Cached from construction.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    fn recognizer(&self) -> Result<&dyn TextRecognizer> {
        match self {
            Self::Available(r) => Ok(r.as_ref()),
            Self::Unavailable => Err(Error::EngineUnavailable),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) and recognize its text.
    ///
    /// The returned text is trimmed.
    pub fn extract_text(&self, image_bytes: &[u8], language: &str) -> Result<String> {
        let recognizer = self.recognizer()?;
        let image = image::load_from_memory(image_bytes)?;
        recognize_trimmed(recognizer, image, language)
    }

    /// Recognize text in an already decoded image.
    pub fn extract_text_from_image(&self, image: &DynamicImage, language: &str) -> Result<String> {
        let recognizer = self.recognizer()?;
        recognize_trimmed(recognizer, image.clone(), language)
    }
}

impl std::fmt::Debug for OcrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(r) => f.debug_tuple("Available").field(&r.name()).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

fn recognize_trimmed(
    recognizer: &dyn TextRecognizer,
    image: DynamicImage,
    language: &str,
) -> Result<String> {
    let image = normalize(image);
    let text = recognizer.recognize(&image, language).map_err(|e| match e {
        Error::Ocr(_) => e,
        other => Error::Ocr(other.to_string()),
    })?;
    Ok(text.trim().to_string())
}

/// Instructions for installing Tesseract.
pub fn installation_message() -> &'static str {
    "\
Tesseract OCR is not installed on your system.

To enable OCR functionality, install Tesseract:

Windows:
  1. Download installer from: https://github.com/UB-Mannheim/tesseract/wiki
  2. Run the installer
  3. Add Tesseract to PATH or set TESSERACT_CMD

macOS:
  brew install tesseract poppler

Linux (Ubuntu/Debian):
  sudo apt-get install tesseract-ocr poppler-utils

Linux (Fedora):
  sudo dnf install tesseract poppler-utils
"
}
