//! Post-translation check that untranslatable tokens survived.
//!
//! Resource strings carry interpolation placeholders (`{{count}}`), nested
//! i18n calls (`$t(common.ok)`) and inline markup (`<button>`). The model is
//! told to keep them verbatim; this module reports when it did not. Findings
//! are warnings only and never fail a job.

use regex::Regex;
use std::sync::OnceLock;

/// Mismatches found between a source text and its translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub struct PlaceholderValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static NESTED_CALL_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

impl PlaceholderValidator {
    /// Compare the protected tokens of `original` and `translated`.
    ///
    /// Order is ignored (word order legitimately changes between languages)
    /// but counts are not.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let checks: [(&str, fn(&str) -> Vec<String>); 3] = [
            ("Placeholder", Self::extract_placeholders),
            ("Nested translation call", Self::extract_nested_calls),
            ("Markup tag", Self::extract_tags),
        ];

        for (label, extract) in checks {
            let expected = extract(original);
            let actual = extract(translated);
            if expected != actual {
                report.warnings.push(format!(
                    "{} mismatch: original has {:?}, translation has {:?}",
                    label, expected, actual
                ));
            }
        }

        report
    }

    /// `{{name}}` interpolation placeholders
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{\{\s*[^{}]+?\s*\}\}").expect("valid regex"));
        sorted_matches(regex, text)
    }

    /// `$t(key)` nested translation calls
    fn extract_nested_calls(text: &str) -> Vec<String> {
        let regex =
            NESTED_CALL_REGEX.get_or_init(|| Regex::new(r"\$t\([^)]*\)").expect("valid regex"));
        sorted_matches(regex, text)
    }

    /// Opening, closing and self-closing tag names, attributes dropped
    fn extract_tags(text: &str) -> Vec<String> {
        let regex = TAG_REGEX
            .get_or_init(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9_-]*)[^<>]*?(/?)>").expect("valid regex"));

        let mut tags: Vec<String> = regex
            .captures_iter(text)
            .map(|cap| format!("<{}{}{}>", &cap[1], &cap[2], &cap[3]))
            .collect();
        tags.sort();
        tags
    }
}

fn sorted_matches(regex: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = regex
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    found.sort();
    found
}
