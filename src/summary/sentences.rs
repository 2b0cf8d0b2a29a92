//! Sentence and word segmentation.

use regex::Regex;

/// Share of the input's sentences kept when no cap is given.
pub const AUTO_SUMMARY_RATIO: f64 = 0.3;

/// Lower bound of the automatic sentence cap.
pub const MIN_AUTO_SENTENCES: usize = 5;

/// Upper bound of the automatic sentence cap.
pub const MAX_AUTO_SENTENCES: usize = 15;

/// Splits text into sentences and words.
pub struct SentenceSplitter {
    terminators: Regex,
    boundary: Regex,
    word: Regex,
}

impl SentenceSplitter {
    /// Create a splitter.
    pub fn new() -> Self {
        Self {
            terminators: Regex::new(r"[.!?]+").unwrap(),
            boundary: Regex::new(r"([.!?]+)(?:\s+|$)").unwrap(),
            word: Regex::new(r"[^\W\d_](?:[^\W\d_]|['\-])*").unwrap(),
        }
    }

    /// Number of segments left after splitting on terminal punctuation,
    /// counting a trailing empty segment.
    pub fn segment_count(&self, text: &str) -> usize {
        self.terminators.split(text).count()
    }

    /// The automatic sentence cap for `text`.
    pub fn auto_max_sentences(&self, text: &str) -> usize {
        let count = self.segment_count(text);
        let scaled = (count as f64 * AUTO_SUMMARY_RATIO) as usize;
        scaled.clamp(MIN_AUTO_SENTENCES, MAX_AUTO_SENTENCES)
    }

    /// Sentences with their terminal punctuation kept.
    ///
    /// A terminator only ends a sentence when followed by whitespace or the
    /// end of input, so decimals such as `2.5` stay intact.
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for caps in self.boundary.captures_iter(text) {
            let (Some(whole), Some(punct)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_sentence(&mut sentences, &text[start..punct.end()]);
            start = whole.end();
        }
        push_sentence(&mut sentences, &text[start..]);

        sentences
    }

    /// Lower-cased word tokens; numbers and punctuation are dropped.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        self.word
            .find_iter(sentence)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Plain truncation: the first `count` non-empty segments, joined with
    /// `". "` and closed with a period.
    pub fn leading_sentences(&self, text: &str, count: usize) -> String {
        let kept: Vec<&str> = self
            .terminators
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(count)
            .collect();
        format!("{}.", kept.join(". "))
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(trimmed);
    }
}
