//! Error types shared across the crate.
//!
//! Job construction failures are fatal for the whole run. Translation
//! failures only ever fail the single job that hit them.

use std::path::PathBuf;
use thiserror::Error;

/// Longest slice of a raw model response kept in an error message
const RAW_PREVIEW_CHARS: usize = 500;

/// Failure while turning the source location into a job list
#[derive(Debug, Error)]
pub enum JobBuildError {
    #[error("source path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("source file must be a .json file: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("failed to inspect {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Failure reported by a translation backend
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to send request to translation backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation backend error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("translation backend response contained no choices")]
    EmptyChoices,

    #[error("translation backend returned malformed JSON ({source}); raw response: {}", preview(.raw))]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("no translations returned")]
    NoTranslations,

    #[error("translated text is empty in backend result")]
    EmptyTranslation,

    #[error("failed to encode translation request: {0}")]
    Serialize(serde_json::Error),
}

impl TranslateError {
    /// Transport failures, rate limiting and server errors are transient.
    /// Client errors and bad model output are not worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Transport(_) => true,
            TranslateError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

fn preview(raw: &str) -> String {
    if raw.chars().count() <= RAW_PREVIEW_CHARS {
        return raw.to_string();
    }
    let cut: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_api_error_retryable_statuses() {
        for status in [429, 500, 502, 503] {
            let error = TranslateError::Api {
                status,
                body: String::new(),
            };
            assert!(error.is_retryable(), "{} should be retryable", status);
        }
    }

    #[test]
    fn test_api_error_client_statuses_not_retryable() {
        for status in [400, 401, 403, 404] {
            let error = TranslateError::Api {
                status,
                body: String::new(),
            };
            assert!(!error.is_retryable(), "{} should not be retryable", status);
        }
    }

    #[test]
    fn test_output_errors_not_retryable() {
        assert!(!TranslateError::EmptyChoices.is_retryable());
        assert!(!TranslateError::NoTranslations.is_retryable());
        assert!(!TranslateError::EmptyTranslation.is_retryable());
        assert!(!TranslateError::MalformedPayload {
            source: parse_error(),
            raw: "oops".to_string(),
        }
        .is_retryable());
    }

    #[test]
    fn test_malformed_payload_keeps_raw_response() {
        let error = TranslateError::MalformedPayload {
            source: parse_error(),
            raw: "Sorry, I cannot help with that".to_string(),
        };
        assert!(error.to_string().contains("Sorry, I cannot help with that"));
    }

    #[test]
    fn test_malformed_payload_truncates_long_response() {
        let error = TranslateError::MalformedPayload {
            source: parse_error(),
            raw: "x".repeat(5000),
        };
        let message = error.to_string();
        assert!(message.ends_with("..."));
        assert!(message.len() < 1000);
    }

    #[test]
    fn test_job_build_error_messages() {
        let not_found = JobBuildError::NotFound(PathBuf::from("locales/xx"));
        assert_eq!(
            not_found.to_string(),
            "source path does not exist: locales/xx"
        );

        let invalid = JobBuildError::InvalidInput(PathBuf::from("en.yaml"));
        assert_eq!(
            invalid.to_string(),
            "source file must be a .json file: en.yaml"
        );
    }
}
