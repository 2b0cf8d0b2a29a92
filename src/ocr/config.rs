//! OCR tool configuration.

use std::path::PathBuf;

/// Environment variable overriding the Tesseract executable.
pub const TESSERACT_CMD_ENV: &str = "TESSERACT_CMD";

/// Environment variable overriding the pdftoppm executable.
pub const PDFTOPPM_CMD_ENV: &str = "PDFTOPPM_CMD";

/// Common Tesseract install locations tried when it is not on `PATH`.
pub const WINDOWS_TESSERACT_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    r"C:\Tesseract-OCR\tesseract.exe",
];

/// Where to find the external OCR and rendering tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Tesseract executable
    pub tesseract_cmd: PathBuf,

    /// Poppler `pdftoppm` executable
    pub pdftoppm_cmd: PathBuf,
}

impl OcrConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `TESSERACT_CMD` / `PDFTOPPM_CMD` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(cmd) = std::env::var_os(TESSERACT_CMD_ENV).filter(|v| !v.is_empty()) {
            config.tesseract_cmd = PathBuf::from(cmd);
        }
        if let Some(cmd) = std::env::var_os(PDFTOPPM_CMD_ENV).filter(|v| !v.is_empty()) {
            config.pdftoppm_cmd = PathBuf::from(cmd);
        }
        config
    }

    /// Set the Tesseract executable.
    pub fn with_tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.tesseract_cmd = cmd.into();
        self
    }

    /// Set the pdftoppm executable.
    pub fn with_pdftoppm_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.pdftoppm_cmd = cmd.into();
        self
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
        }
    }
}
