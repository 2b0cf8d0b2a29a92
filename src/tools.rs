//! Tool-level entry points.
//!
//! Every entry point returns a [`ToolResponse`]; library errors are folded
//! into a tagged `{"error", "type"}` object instead of being returned as `Err`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::model::{ExtractionResult, SummaryResult};
use crate::ocr::DEFAULT_LANGUAGE;
use crate::parser::{ExtractOptions, PdfExtractor};
use crate::summary::{SummarizeOptions, Summarizer};

/// Tool name for PDF extraction.
pub const EXTRACT_TOOL: &str = "extract_text_from_pdf";

/// Tool name for summarizing raw text.
pub const SUMMARIZE_TOOL: &str = "summarize_pdf_section";

/// Arguments of [`EXTRACT_TOOL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Path to the PDF file
    pub file_path: String,

    /// 0-indexed pages to extract; all pages when absent
    #[serde(default)]
    pub pages: Option<Vec<i64>>,

    /// Attach a summary of the extracted text
    #[serde(default)]
    pub summarize: bool,

    /// Guidance for focus detection
    #[serde(default)]
    pub context: Option<String>,

    /// Sentence cap for the summary
    #[serde(default)]
    pub max_sentences: Option<usize>,

    /// Allow OCR for pages with too little embedded text
    #[serde(default = "default_true")]
    pub enable_ocr: bool,

    /// OCR language code
    #[serde(default = "default_language")]
    pub language: String,
}

impl ExtractRequest {
    /// A request for every page of `file_path` with default settings.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            pages: None,
            summarize: false,
            context: None,
            max_sentences: None,
            enable_ocr: true,
            language: default_language(),
        }
    }

    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            pages: self.pages.clone(),
            enable_ocr: self.enable_ocr,
            language: self.language.clone(),
        }
    }

    fn summarize_options(&self) -> SummarizeOptions {
        SummarizeOptions {
            context: self.context.clone(),
            max_sentences: self.max_sentences,
        }
    }
}

/// Arguments of [`SUMMARIZE_TOOL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Raw text to summarize
    pub pdf_text: String,

    /// Guidance for focus detection
    #[serde(default)]
    pub context: Option<String>,

    /// Sentence cap for the summary
    #[serde(default)]
    pub max_sentences: Option<usize>,
}

impl SummarizeRequest {
    /// A request to summarize `pdf_text` with default settings.
    pub fn new(pdf_text: impl Into<String>) -> Self {
        Self {
            pdf_text: pdf_text.into(),
            ..Self::default()
        }
    }
}

/// A named tool invocation, as read by the `serve` loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub tool: String,

    /// Tool arguments
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Tagged error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    /// Human readable message
    pub error: String,

    /// Error class
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ToolError {
    /// A validation failure with a custom message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            kind: ErrorKind::Validation,
        }
    }
}

impl From<&Error> for ToolError {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Outcome of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    /// Extraction result, possibly with summary and focus
    Extraction(ExtractionResult),
    /// Summary of raw text
    Summary(SummaryResult),
    /// Tagged failure
    Error(ToolError),
}

impl ToolResponse {
    /// Whether this response carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The error payload, if any.
    pub fn error(&self) -> Option<&ToolError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for ToolResponse {
    fn from(err: Error) -> Self {
        Self::Error(ToolError::from(&err))
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON on a single line
    Compact,
}

/// Render a response as JSON.
pub fn to_json(response: &ToolResponse, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(response),
        JsonFormat::Compact => serde_json::to_string(response),
    };

    result.map_err(|e| Error::Processing(format!("JSON serialization error: {}", e)))
}

/// Extractor and summarizer shared by every tool call.
///
/// The OCR engine is probed once, when the toolbox is built.
pub struct Toolbox {
    extractor: PdfExtractor,
    summarizer: Summarizer,
}

impl Toolbox {
    /// Create a toolbox, probing for OCR tools configured by the environment.
    pub fn new() -> Self {
        Self::with_extractor(PdfExtractor::new())
    }

    /// Create a toolbox around a configured extractor.
    pub fn with_extractor(extractor: PdfExtractor) -> Self {
        Self {
            extractor,
            summarizer: Summarizer::new(),
        }
    }

    /// The extractor in use.
    pub fn extractor(&self) -> &PdfExtractor {
        &self.extractor
    }

    /// Extract text from a PDF, optionally summarizing it.
    pub fn extract_text_from_pdf(&self, request: &ExtractRequest) -> ToolResponse {
        let result = match self
            .extractor
            .extract(&request.file_path, &request.extract_options())
        {
            Ok(result) => result,
            Err(e) => {
                log::warn!("{} failed for {}: {}", EXTRACT_TOOL, request.file_path, e);
                return e.into();
            }
        };

        if !request.summarize {
            return ToolResponse::Extraction(result);
        }

        let summary = self
            .summarizer
            .summarize(&result.full_text(), &request.summarize_options());
        ToolResponse::Extraction(result.with_summary(summary))
    }

    /// Summarize caller-supplied text.
    pub fn summarize_pdf_section(&self, request: &SummarizeRequest) -> ToolResponse {
        if request.pdf_text.trim().is_empty() {
            return ToolResponse::Error(ToolError::validation("pdf_text cannot be empty"));
        }

        let options = SummarizeOptions {
            context: request.context.clone(),
            max_sentences: request.max_sentences,
        };
        ToolResponse::Summary(self.summarizer.summarize(&request.pdf_text, &options))
    }

    /// Route a named call to its tool.
    pub fn dispatch(&self, call: &ToolCall) -> ToolResponse {
        match call.tool.as_str() {
            EXTRACT_TOOL => match parse_arguments::<ExtractRequest>(call) {
                Ok(request) => self.extract_text_from_pdf(&request),
                Err(e) => ToolResponse::Error(e),
            },
            SUMMARIZE_TOOL => match parse_arguments::<SummarizeRequest>(call) {
                Ok(request) => self.summarize_pdf_section(&request),
                Err(e) => ToolResponse::Error(e),
            },
            other => ToolResponse::Error(ToolError::validation(format!("Unknown tool: {}", other))),
        }
    }
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_arguments<T: serde::de::DeserializeOwned>(call: &ToolCall) -> std::result::Result<T, ToolError> {
    serde_json::from_value(call.arguments.clone()).map_err(|e| {
        ToolError::validation(format!("Invalid arguments for {}: {}", call.tool, e))
    })
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
