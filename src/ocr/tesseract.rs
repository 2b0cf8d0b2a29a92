//! Tesseract command-line recognizer.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{DynamicImage, ImageFormat};

use super::config::{OcrConfig, WINDOWS_TESSERACT_PATHS};
use super::TextRecognizer;
use crate::error::{Error, Result};

/// Recognizer that shells out to the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: PathBuf,
    version: String,
}

impl TesseractCli {
    /// Locate a working Tesseract, trying the configured command first and
    /// then the usual Windows install locations.
    pub fn probe(config: &OcrConfig) -> Option<Self> {
        let candidates = std::iter::once(config.tesseract_cmd.clone())
            .chain(WINDOWS_TESSERACT_PATHS.iter().map(PathBuf::from));

        for command in candidates {
            match query_version(&command) {
                Some(version) => {
                    log::info!("Using {} ({})", version, command.display());
                    return Some(Self { command, version });
                }
                None => log::debug!("No usable tesseract at {}", command.display()),
            }
        }
        None
    }

    /// Path of the Tesseract executable in use.
    pub fn command(&self) -> &Path {
        &self.command
    }

    /// Version banner reported by `tesseract --version`.
    pub fn version(&self) -> &str {
        &self.version
    }

    fn run(&self, image_path: &Path, language: &str) -> Result<String> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|e| Error::Ocr(format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TextRecognizer for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String> {
        let mut scratch = tempfile::Builder::new()
            .prefix("pdfsift-ocr-")
            .suffix(".png")
            .tempfile()?;
        image.write_to(scratch.as_file_mut(), ImageFormat::Png)?;

        self.run(scratch.path(), language)
    }
}

/// Ask a candidate executable for its version; `None` if it cannot run.
fn query_version(command: &Path) -> Option<String> {
    let output = Command::new(command).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    // Older releases print the banner on stderr.
    let banner = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    let banner = String::from_utf8_lossy(&banner);
    Some(
        banner
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or("tesseract")
            .to_string(),
    )
}
