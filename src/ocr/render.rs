//! Whole-page rasterization for OCR.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;

use super::config::OcrConfig;
use crate::error::{Error, Result};

/// Resolution used to rasterize pages for OCR.
pub const RENDER_DPI: u32 = 300;

/// Renders one page of a PDF to a raster image.
pub trait PageRenderer: Send + Sync {
    /// Rasterize page `page_index` (0-indexed) of `source` at `dpi`.
    fn render_page(&self, source: &Path, page_index: usize, dpi: u32) -> Result<DynamicImage>;
}

/// Renderer backed by Poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    command: PathBuf,
}

impl PdftoppmRenderer {
    /// Create a renderer using the given `pdftoppm` executable.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Create a renderer from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.pdftoppm_cmd.clone())
    }

    /// Path of the `pdftoppm` executable.
    pub fn command(&self) -> &Path {
        &self.command
    }

    /// Whether the executable can be launched.
    pub fn is_available(&self) -> bool {
        Command::new(&self.command).arg("-v").output().is_ok()
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_page(&self, source: &Path, page_index: usize, dpi: u32) -> Result<DynamicImage> {
        let render_err = |reason: String| Error::Render {
            page: page_index,
            reason,
        };

        let scratch = tempfile::tempdir()?;
        let prefix = scratch.path().join("page");
        let page_number = (page_index + 1).to_string();

        // `-r dpi` scales 72-DPI user space by dpi/72 on both axes.
        let output = Command::new(&self.command)
            .arg("-f")
            .arg(&page_number)
            .arg("-l")
            .arg(&page_number)
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(source)
            .arg(&prefix)
            .output()
            .map_err(|e| render_err(format!("failed to run pdftoppm: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(render_err(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        image::open(prefix.with_extension("png")).map_err(|e| render_err(e.to_string()))
    }
}
