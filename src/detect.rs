//! Input file validation and PDF header detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Largest accepted input, in megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 70;

/// Largest accepted input, in bytes.
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Readers are required to accept the header anywhere in the first 1024 bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Check that `path` names a readable, non-empty regular file within the size limit.
///
/// Checks run in a fixed order: existence, file type, size limit, emptiness.
/// Returns the file size in bytes.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let meta = std::fs::metadata(path)?;
    if !meta.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    let size = meta.len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(Error::FileTooLarge {
            size_mb: size as f64 / 1024.0 / 1024.0,
            limit_mb: MAX_FILE_SIZE_MB,
        });
    }

    if size == 0 {
        return Err(Error::EmptyFile);
    }

    Ok(size)
}

/// Read the PDF header from a file.
///
/// A file without a `%PDF-x.y` marker is reported as [`Error::Corrupted`].
pub fn detect_header_from_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    file.take(HEADER_SEARCH_WINDOW as u64).read_to_end(&mut head)?;
    detect_header_from_bytes(&head)
}

/// Read the PDF header from the leading bytes of a document.
pub fn detect_header_from_bytes(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or_else(|| Error::Corrupted("missing %PDF- header".to_string()))?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or_else(|| Error::Corrupted("truncated PDF header".to_string()))?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::Corrupted(format!(
            "unsupported PDF version '{}'",
            version
        )));
    }

    Ok(PdfHeader { version, offset })
}

/// Check if a version string looks like `d.d`.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start (within the header window) with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_header_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let header = detect_header_from_bytes(data).unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
    }

    #[test]
    fn test_detect_header_after_junk() {
        let data = b"\x00\x00junk%PDF-1.4\n";
        let header = detect_header_from_bytes(data).unwrap();
        assert_eq!(header.version, "1.4");
        assert_eq!(header.offset, 6);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_header_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_detect_truncated() {
        let result = detect_header_from_bytes(b"%PDF-1");
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");
        let err = validate_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotAFile(_)));
    }

    #[test]
    fn test_validate_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = validate_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyFile));
    }

    #[test]
    fn test_validate_oversized_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_FILE_SIZE_BYTES + 1).unwrap();
        let err = validate_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { limit_mb: 70, .. }));
    }

    #[test]
    fn test_validate_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4\n").unwrap();
        assert_eq!(validate_file(file.path()).unwrap(), 9);
        assert_eq!(detect_header_from_path(file.path()).unwrap().version, "1.4");
    }
}
