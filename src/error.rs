//! Error types for pdfsift.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for pdfsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and summarization.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files or talking to an external tool.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input path exists but is not a regular file.
    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The input file has zero bytes.
    #[error("File is empty")]
    EmptyFile,

    /// The input file is larger than the accepted maximum.
    #[error("File size ({size_mb:.2} MB) exceeds limit of {limit_mb} MB")]
    FileTooLarge {
        /// Actual size in megabytes
        size_mb: f64,
        /// Accepted maximum in megabytes
        limit_mb: u64,
    },

    /// One or more requested page indices fall outside the document.
    #[error(
        "Invalid page numbers {invalid:?}. PDF has {page_count} pages (0-{})",
        .page_count.saturating_sub(1)
    )]
    InvalidPages {
        /// Every offending index, in request order
        invalid: Vec<i64>,
        /// Total pages in the document
        page_count: usize,
    },

    /// The PDF stream could not be parsed.
    #[error("Corrupted or invalid PDF file: {0}")]
    Corrupted(String),

    /// OCR was invoked but no recognition engine is installed.
    #[error(
        "Tesseract OCR is not installed. Please install Tesseract to use OCR features. \
         Installation instructions: https://github.com/tesseract-ocr/tesseract#installing-tesseract"
    )]
    EngineUnavailable,

    /// Image decoding or text recognition failed.
    #[error("Failed to extract text from image using OCR: {0}")]
    Ocr(String),

    /// Rendering a page to a raster image failed.
    #[error("Failed to render page {page}: {reason}")]
    Render {
        /// 0-based page index
        page: usize,
        /// Underlying cause
        reason: String,
    },

    /// The statistical summarizer could not rank the input.
    #[error("Summarization error: {0}")]
    Summarize(String),

    /// Catch-all for unexpected failures during extraction.
    #[error("Failed to extract text from PDF: {0}")]
    Processing(String),
}

/// Coarse classification surfaced at the tool boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Caller-correctable input problem
    #[serde(rename = "validation_error")]
    Validation,
    /// Failure while processing otherwise valid input
    #[serde(rename = "processing_error")]
    Processing,
}

impl ErrorKind {
    /// Wire name used in tagged error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Processing => "processing_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error for the tool boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_)
            | Error::NotAFile(_)
            | Error::EmptyFile
            | Error::FileTooLarge { .. }
            | Error::InvalidPages { .. } => ErrorKind::Validation,
            _ => ErrorKind::Processing,
        }
    }

    /// Whether this is a caller-correctable validation failure.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Corrupted(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Ocr(err.to_string())
    }
}
