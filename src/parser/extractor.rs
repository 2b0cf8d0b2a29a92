//! Page extractor: embedded text first, OCR when a page has too little.

use std::path::Path;

use crate::detect::{detect_header_from_path, validate_file};
use crate::error::{Error, Result};
use crate::model::{ExtractionResult, PageText};
use crate::ocr::{OcrConfig, OcrEngine, PageRenderer, PdftoppmRenderer};

use super::backend::{LopdfBackend, PdfBackend};
use super::fallback::PageOcr;
use super::options::ExtractOptions;

/// Pages whose trimmed embedded text has at least this many characters are
/// accepted as-is and never OCR'd.
pub const MIN_TEXT_LENGTH: usize = 50;

/// Extracts per-page text from PDF files.
///
/// # Example
///
/// ```no_run
/// use pdfsift::{ExtractOptions, PdfExtractor};
///
/// let extractor = PdfExtractor::new();
/// let result = extractor.extract("report.pdf", &ExtractOptions::new().with_pages([0, 2]))?;
/// for page in &result.content {
///     println!("{}", page);
/// }
/// # Ok::<(), pdfsift::Error>(())
/// ```
pub struct PdfExtractor {
    ocr: OcrEngine,
    renderer: Box<dyn PageRenderer>,
}

impl PdfExtractor {
    /// Create an extractor, probing for OCR tools configured by the environment.
    pub fn new() -> Self {
        Self::with_config(&OcrConfig::from_env())
    }

    /// Create an extractor from explicit OCR configuration.
    pub fn with_config(config: &OcrConfig) -> Self {
        Self {
            ocr: OcrEngine::detect_with(config),
            renderer: Box::new(PdftoppmRenderer::from_config(config)),
        }
    }

    /// Create an extractor around an existing OCR engine.
    pub fn with_engine(ocr: OcrEngine) -> Self {
        Self {
            ocr,
            renderer: Box::new(PdftoppmRenderer::default()),
        }
    }

    /// Replace the page renderer.
    pub fn with_renderer(mut self, renderer: impl PageRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// The OCR engine in use.
    pub fn ocr_engine(&self) -> &OcrEngine {
        &self.ocr
    }

    /// Extract text from a PDF file.
    ///
    /// File validation runs before the document is opened; page selection is
    /// validated before any page is read.
    pub fn extract<P: AsRef<Path>>(&self, path: P, options: &ExtractOptions) -> Result<ExtractionResult> {
        let path = path.as_ref();
        validate_file(path)?;

        self.extract_validated(path, options).map_err(|e| match e {
            Error::Corrupted(_) | Error::InvalidPages { .. } | Error::Processing(_) => e,
            other => Error::Processing(other.to_string()),
        })
    }

    fn extract_validated(&self, path: &Path, options: &ExtractOptions) -> Result<ExtractionResult> {
        detect_header_from_path(path)?;
        let backend = LopdfBackend::load_file(path)?;
        log::debug!(
            "Opened {} (PDF {}, {} pages)",
            path.display(),
            backend.version(),
            backend.page_count()
        );

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.extract_from_backend(&backend, path, &file_name, options)
    }

    /// Run extraction over an already opened document.
    ///
    /// `source` is the file handed to the page renderer.
    pub fn extract_from_backend(
        &self,
        backend: &dyn PdfBackend,
        source: &Path,
        file_name: &str,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult> {
        let page_count = backend.page_count();
        let selection = options.resolve_pages(page_count)?;

        let chain = PageOcr {
            engine: &self.ocr,
            renderer: self.renderer.as_ref(),
            backend,
            source,
            language: &options.language,
        };

        let pages: Vec<PageText> = selection
            .into_iter()
            .map(|index| self.process_page(&chain, index, options.enable_ocr))
            .collect();

        let result = ExtractionResult::from_pages(file_name, page_count, &pages);
        log::info!(
            "Extracted {} of {} pages from {} (OCR pages: {:?})",
            pages.len(),
            page_count,
            file_name,
            result.ocr_pages().unwrap_or_default()
        );
        Ok(result)
    }

    fn process_page(&self, chain: &PageOcr<'_>, index: usize, enable_ocr: bool) -> PageText {
        let embedded = match chain.backend.page_text(index) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                log::warn!("Page {}: embedded text unreadable: {}", index, e);
                String::new()
            }
        };

        if !needs_ocr(&embedded) {
            return PageText::embedded(index, embedded);
        }

        if !enable_ocr {
            return PageText::embedded(index, embedded);
        }

        if !self.ocr.is_available() {
            log::debug!("Page {}: short text but OCR unavailable", index);
            return PageText::embedded(index, embedded);
        }

        match chain.run(index) {
            Some(text) => PageText::ocr(index, text),
            None => PageText::embedded(index, embedded),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether trimmed embedded text is too short to trust.
pub fn needs_ocr(trimmed: &str) -> bool {
    trimmed.chars().count() < MIN_TEXT_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmbeddedImage;
    use crate::ocr::TextRecognizer;
    use image::DynamicImage;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingRecognizer {
        calls: Arc<AtomicUsize>,
        text: &'static str,
    }

    impl TextRecognizer for CountingRecognizer {
        fn name(&self) -> &str {
            "counting"
        }

        fn recognize(&self, _image: &DynamicImage, _language: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.to_string())
        }
    }

    struct BlankRenderer;

    impl PageRenderer for BlankRenderer {
        fn render_page(&self, _source: &Path, _page: usize, _dpi: u32) -> Result<DynamicImage> {
            Ok(DynamicImage::new_luma8(4, 4))
        }
    }

    struct MemoryBackend {
        texts: Vec<String>,
    }

    impl PdfBackend for MemoryBackend {
        fn page_count(&self) -> usize {
            self.texts.len()
        }

        fn page_text(&self, index: usize) -> Result<String> {
            let text = &self.texts[index];
            if text == "<broken>" {
                return Err(Error::Processing("bad font".into()));
            }
            Ok(text.clone())
        }

        fn page_images(&self, _index: usize) -> Result<Vec<EmbeddedImage>> {
            Ok(Vec::new())
        }
    }

    fn long_text() -> String {
        "This page carries plenty of embedded text to skip OCR entirely.".to_string()
    }

    fn extractor(text: &'static str) -> (PdfExtractor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = OcrEngine::with_recognizer(CountingRecognizer {
            calls: calls.clone(),
            text,
        });
        (PdfExtractor::with_engine(engine).with_renderer(BlankRenderer), calls)
    }

    fn run(extractor: &PdfExtractor, texts: Vec<String>, options: &ExtractOptions) -> Result<ExtractionResult> {
        let backend = MemoryBackend { texts };
        extractor.extract_from_backend(&backend, &PathBuf::from("doc.pdf"), "doc.pdf", options)
    }

    #[test]
    fn test_needs_ocr_threshold() {
        assert!(needs_ocr(""));
        assert!(needs_ocr(&"a".repeat(49)));
        assert!(!needs_ocr(&"a".repeat(50)));
        // Counted in characters, not bytes.
        assert!(needs_ocr(&"é".repeat(49)));
    }

    #[test]
    fn test_long_text_never_ocrd() {
        let (extractor, calls) = extractor("ocr text");
        let result = run(&extractor, vec![long_text(), long_text()], &ExtractOptions::default()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!result.ocr_used());
        assert!(result.ocr_pages().is_none());
        assert_eq!(result.content[1], format!("Page 2: {}", long_text()));
    }

    #[test]
    fn test_short_text_replaced_by_ocr() {
        let (extractor, calls) = extractor("recognized from scan");
        let texts = vec![long_text(), "  short  ".to_string(), String::new()];
        let result = run(&extractor, texts, &ExtractOptions::default()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(result.ocr_used());
        assert_eq!(result.ocr_pages(), Some(&[1, 2][..]));
        assert_eq!(result.content[1], "Page 2: recognized from scan");
        assert_eq!(result.page_count, 3);
    }

    #[test]
    fn test_ocr_disabled_keeps_short_text() {
        let (extractor, calls) = extractor("recognized");
        let options = ExtractOptions::new().without_ocr();
        let result = run(&extractor, vec!["  tiny ".to_string()], &options).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!result.ocr_used());
        assert_eq!(result.content, vec!["Page 1: tiny"]);
    }

    #[test]
    fn test_unavailable_engine_keeps_short_text() {
        let extractor = PdfExtractor::with_engine(OcrEngine::unavailable()).with_renderer(BlankRenderer);
        let texts = vec!["a".to_string(), "b".to_string()];
        let result = run(&extractor, texts, &ExtractOptions::default()).unwrap();

        assert!(!result.ocr_used());
        assert_eq!(result.content, vec!["Page 1: a", "Page 2: b"]);
    }

    #[test]
    fn test_empty_ocr_keeps_original() {
        let (extractor, calls) = extractor("   ");
        let result = run(&extractor, vec!["short".to_string()], &ExtractOptions::default()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!result.ocr_used());
        assert_eq!(result.content, vec!["Page 1: short"]);
    }

    #[test]
    fn test_unreadable_text_recovered_by_ocr() {
        let (extractor, _) = extractor("from the scan");
        let result = run(&extractor, vec!["<broken>".to_string()], &ExtractOptions::default()).unwrap();
        assert_eq!(result.content, vec!["Page 1: from the scan"]);
    }

    #[test]
    fn test_pages_rendered_at_fixed_dpi() {
        struct DpiRenderer(Arc<AtomicUsize>);

        impl PageRenderer for DpiRenderer {
            fn render_page(&self, _source: &Path, _page: usize, dpi: u32) -> Result<DynamicImage> {
                self.0.store(dpi as usize, Ordering::SeqCst);
                Ok(DynamicImage::new_luma8(4, 4))
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let (extractor, _) = extractor("rendered");
        let extractor = extractor.with_renderer(DpiRenderer(seen.clone()));
        run(&extractor, vec!["short".to_string()], &ExtractOptions::default()).unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), crate::ocr::RENDER_DPI as usize);
    }

    #[test]
    fn test_selection_order_and_invalid_pages() {
        let (extractor, _) = extractor("x");
        let texts = vec![long_text(), "p2 short".to_string(), long_text()];

        let options = ExtractOptions::new().with_pages([2, 0]);
        let result = run(&extractor, texts.clone(), &options).unwrap();
        assert!(result.content[0].starts_with("Page 3: "));
        assert!(result.content[1].starts_with("Page 1: "));

        let options = ExtractOptions::new().with_pages([0, 5, 9]);
        let err = run(&extractor, texts, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidPages { ref invalid, .. } if invalid == &vec![5, 9]));
    }

    #[test]
    fn test_extract_validates_before_opening() {
        let (extractor, _) = extractor("x");
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.pdf");
        std::fs::write(&empty, b"").unwrap();
        let err = extractor.extract(&empty, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyFile));

        let not_pdf = dir.path().join("notes.pdf");
        std::fs::write(&not_pdf, b"just some text").unwrap();
        let err = extractor.extract(&not_pdf, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Corrupted(_)));
        assert!(!err.is_validation());
    }
}
