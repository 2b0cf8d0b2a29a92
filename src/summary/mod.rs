//! Extractive summarization with focus detection.
//!
//! Sentences are ranked by latent semantic analysis; when ranking fails the
//! summarizer falls back to the leading sentences of the text.
//!
//! ```
//! use pdfsift::summary::{SummarizeOptions, Summarizer};
//!
//! let summarizer = Summarizer::new();
//! let options = SummarizeOptions::new().with_context("focus on the prescription");
//! let result = summarizer.summarize("Take one tablet daily. Review in two weeks.", &options);
//! assert_eq!(result.focus.as_deref(), Some("Prescription"));
//! ```

mod focus;
mod lsa;
mod sentences;

pub use focus::{detect_focus, Theme, THEMES};
pub use lsa::{LsaRanker, STOPWORDS};
pub use sentences::{
    SentenceSplitter, AUTO_SUMMARY_RATIO, MAX_AUTO_SENTENCES, MIN_AUTO_SENTENCES,
};

use crate::error::Result;
use crate::model::SummaryResult;

/// Options for summarizing text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeOptions {
    /// Free-text guidance used for focus detection
    pub context: Option<String>,

    /// Sentence cap; computed from the input when `None`
    pub max_sentences: Option<usize>,
}

impl SummarizeOptions {
    /// Create new summarize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the focus context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set an explicit sentence cap. The value is used as given.
    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = Some(max_sentences);
        self
    }
}

/// One way of producing a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStrategy {
    /// Rank sentences with latent semantic analysis
    Lsa,
    /// Keep the leading sentences
    Leading,
}

/// Strategies in the order they are attempted.
pub const SUMMARY_STRATEGIES: [SummaryStrategy; 2] = [SummaryStrategy::Lsa, SummaryStrategy::Leading];

/// Extractive summarizer.
pub struct Summarizer {
    splitter: SentenceSplitter,
    ranker: LsaRanker,
}

impl Summarizer {
    /// Create a summarizer.
    pub fn new() -> Self {
        Self {
            splitter: SentenceSplitter::new(),
            ranker: LsaRanker::new(),
        }
    }

    /// Summarize `text`.
    ///
    /// Blank input yields an empty summary with no focus. Focus is only
    /// detected when a non-empty context is given.
    pub fn summarize(&self, text: &str, options: &SummarizeOptions) -> SummaryResult {
        if text.trim().is_empty() {
            return SummaryResult::empty();
        }

        let count = options
            .max_sentences
            .unwrap_or_else(|| self.splitter.auto_max_sentences(text));
        let summary = self.run(text, count);

        let focus = options
            .context
            .as_deref()
            .filter(|c| !c.is_empty())
            .and_then(|c| detect_focus(text, c))
            .map(String::from);

        SummaryResult::new(summary.trim(), focus)
    }

    /// The automatic sentence cap for `text`.
    pub fn auto_max_sentences(&self, text: &str) -> usize {
        self.splitter.auto_max_sentences(text)
    }

    fn run(&self, text: &str, count: usize) -> String {
        for strategy in SUMMARY_STRATEGIES {
            match self.attempt(strategy, text, count) {
                Ok(summary) => return summary,
                Err(e) => log::warn!("Summary via {:?} failed: {}", strategy, e),
            }
        }
        String::new()
    }

    /// Run a single strategy.
    pub fn attempt(&self, strategy: SummaryStrategy, text: &str, count: usize) -> Result<String> {
        match strategy {
            SummaryStrategy::Lsa => self.ranker.summarize(&self.splitter, text, count),
            SummaryStrategy::Leading => Ok(self.splitter.leading_sentences(text, count)),
        }
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}
