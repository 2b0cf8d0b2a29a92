//! Integration tests for summarization and focus detection.

use pdfsift::summary::{SentenceSplitter, SummaryStrategy, THEMES};
use pdfsift::{summarize, SummarizeOptions, Summarizer, SummaryResult};

const CLINIC_NOTE: &str = "Patient presented for a routine eye examination. \
    Optical coherence tomography showed mild macular thickening in the left eye. \
    Retinal layers were otherwise intact. \
    The waiting room was busy that afternoon. \
    Impression: early diabetic macular edema. \
    Prescription: one tablet of the new medication daily. \
    Follow-up OCT is scheduled in three months. \
    Parking validation was provided at the front desk.";

fn sentences_of(text: &str) -> usize {
    SentenceSplitter::new().sentences(text).len()
}

#[test]
fn test_empty_input_has_no_focus() {
    let result = summarize("", &SummarizeOptions::new().with_context("anything"));
    assert_eq!(result, SummaryResult::empty());
}

#[test]
fn test_prescription_focus() {
    let options = SummarizeOptions::new().with_context("please review the prescription");

    let with_keyword = summarize("Increase the dose next week. Review in a month.", &options);
    assert_eq!(with_keyword.focus.as_deref(), Some("Prescription"));

    let without_keyword = summarize("The weather was mild. Review in a month.", &options);
    assert!(without_keyword.focus.is_none());
    assert!(!without_keyword.summary.is_empty());
}

#[test]
fn test_twenty_delimiters_cap_at_six() {
    let text = (1..=20)
        .map(|i| format!("Measurement {} was recorded for the left eye", i))
        .collect::<Vec<_>>()
        .join(". ")
        + ".";

    let summarizer = Summarizer::new();
    assert_eq!(summarizer.auto_max_sentences(&text), 6);

    let leading = summarizer
        .attempt(SummaryStrategy::Leading, &text, 6)
        .unwrap();
    assert!(sentences_of(&leading) <= 6);
    assert!(leading.starts_with("Measurement 1 was recorded"));

    let result = summarizer.summarize(&text, &SummarizeOptions::new());
    assert!(sentences_of(&result.summary) <= 6);
}

#[test]
fn test_summary_preserves_document_order() {
    let result = summarize(CLINIC_NOTE, &SummarizeOptions::new().with_max_sentences(3));
    let picked = SentenceSplitter::new().sentences(&result.summary);
    assert_eq!(picked.len(), 3);

    let positions: Vec<usize> = picked
        .iter()
        .map(|s| CLINIC_NOTE.find(s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_focus_first_context_theme_wins() {
    // The context names both OCT findings and a diagnosis; OCT comes first.
    let options = SummarizeOptions::new().with_context("check the diagnosis and OCT findings");
    let result = summarize(CLINIC_NOTE, &options);
    assert_eq!(result.focus.as_deref(), Some("Oct Findings"));
}

#[test]
fn test_focus_labels_are_title_case() {
    for theme in THEMES {
        let expected: Vec<String> = theme
            .key
            .split(' ')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();
        assert_eq!(theme.label, expected.join(" "));
    }
}

#[test]
fn test_whole_note_fits_under_cap() {
    let result = summarize(CLINIC_NOTE, &SummarizeOptions::new().with_max_sentences(50));
    assert_eq!(sentences_of(&result.summary), 8);
    assert_eq!(result.summary, CLINIC_NOTE.split_whitespace().collect::<Vec<_>>().join(" "));
}
