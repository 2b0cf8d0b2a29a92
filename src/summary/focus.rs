//! Keyword-driven focus detection.

/// A named subject with the keywords that signal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Lower-case theme key
    pub key: &'static str,
    /// Title-cased label reported as the focus
    pub label: &'static str,
    /// Lower-case keywords, matched as substrings
    pub keywords: &'static [&'static str],
}

impl Theme {
    /// Whether any keyword occurs in already lower-cased `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k))
    }
}

/// Themes in match priority order.
pub const THEMES: [Theme; 5] = [
    Theme {
        key: "prescription",
        label: "Prescription",
        keywords: &["prescription", "medication", "dose", "rx", "tablet", "pill"],
    },
    Theme {
        key: "oct findings",
        label: "Oct Findings",
        keywords: &["oct", "optical coherence", "retinal", "macula", "thickness"],
    },
    Theme {
        key: "diagnosis",
        label: "Diagnosis",
        keywords: &["diagnosis", "impression", "findings", "condition"],
    },
    Theme {
        key: "patient information",
        label: "Patient Information",
        keywords: &["patient", "name", "age", "gender", "dob"],
    },
    Theme {
        key: "test results",
        label: "Test Results",
        keywords: &["results", "test", "lab", "value", "measurement"],
    },
];

/// Detect the focus of `text` as requested by `context`.
///
/// Only the first theme mentioned by the context is considered; its label is
/// returned when the text mentions it as well.
pub fn detect_focus(text: &str, context: &str) -> Option<&'static str> {
    let context = context.to_lowercase();
    let theme = THEMES.iter().find(|t| t.matches(&context))?;

    if theme.matches(&text.to_lowercase()) {
        Some(theme.label)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_order() {
        let keys: Vec<&str> = THEMES.iter().map(|t| t.key).collect();
        assert_eq!(
            keys,
            vec![
                "prescription",
                "oct findings",
                "diagnosis",
                "patient information",
                "test results"
            ]
        );
    }

    #[test]
    fn test_prescription_focus() {
        let context = "please review the prescription";
        assert_eq!(
            detect_focus("Take one DOSE twice daily.", context),
            Some("Prescription")
        );
        assert_eq!(detect_focus("The weather was mild.", context), None);
    }

    #[test]
    fn test_first_context_theme_only() {
        // Context mentions prescription first in table order, and diagnosis too;
        // text only mentions diagnosis keywords.
        let context = "medication and diagnosis";
        assert_eq!(detect_focus("Final diagnosis: glaucoma.", context), None);
    }

    #[test]
    fn test_substring_matching() {
        // "rx" inside a longer word still counts.
        assert_eq!(
            detect_focus("Notes on Marx were filed.", "check the Rx"),
            Some("Prescription")
        );
        assert_eq!(
            detect_focus("MACULA appears normal", "highlight abnormal OCT findings"),
            Some("Oct Findings")
        );
    }

    #[test]
    fn test_no_theme_in_context() {
        assert_eq!(detect_focus("dose and retinal scan", "quick overview"), None);
    }
}
