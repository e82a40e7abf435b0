use crate::retry::RetryConfig;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SOURCE_DIR: &str = "./locales/en";
pub const DEFAULT_TARGET_DIR: &str = "./locales";
pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET_LANGS: &str = "es,fr,de";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Translation backends the tool can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Chatgpt,
}

/// Everything a run needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    // Run
    pub concurrency: usize,
    pub source: PathBuf,
    pub target: PathBuf,
    pub source_lang: String,
    pub target_langs: String,

    // Backend
    pub service: Service,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,
    pub openai_temperature: f32,
    pub retry: RetryConfig,
}

impl Config {
    /// Config with the tool's defaults and the given credentials
    pub fn new(openai_api_key: impl Into<String>) -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            source: PathBuf::from(DEFAULT_SOURCE_DIR),
            target: PathBuf::from(DEFAULT_TARGET_DIR),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_langs: DEFAULT_TARGET_LANGS.to_string(),
            service: Service::Chatgpt,
            openai_api_key: openai_api_key.into(),
            openai_model: DEFAULT_MODEL.to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            openai_temperature: DEFAULT_TEMPERATURE,
            retry: RetryConfig::api_call(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Reject configurations that cannot start a run
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            bail!(
                "API key is required for translation service \
                 (use --api-key or set OPENAI_API_KEY)"
            );
        }
        if !self.source.exists() {
            bail!("Source directory does not exist: {}", self.source.display());
        }
        Ok(())
    }

    /// Model name, falling back to the default when left blank
    pub fn model(&self) -> &str {
        let model = self.openai_model.trim();
        if model.is_empty() {
            DEFAULT_MODEL
        } else {
            model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new("sk-test");

        assert_eq!(config.concurrency, 4);
        assert_eq!(config.source, PathBuf::from("./locales/en"));
        assert_eq!(config.target, PathBuf::from("./locales"));
        assert_eq!(config.source_lang, "en");
        assert_eq!(config.target_langs, "es,fr,de");
        assert_eq!(config.service, Service::Chatgpt);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_url, DEFAULT_OPENAI_API_URL);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::new("   ");
        config.source = dir.path().to_path_buf();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("API key is required"));
    }

    #[test]
    fn test_validate_requires_existing_source() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::new("sk-test");
        config.source = dir.path().join("missing");

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Source directory does not exist"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::new("sk-test");
        config.source = dir.path().to_path_buf();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_model_falls_back_to_default() {
        let mut config = Config::new("sk-test");
        config.openai_model = "  ".to_string();
        assert_eq!(config.model(), "gpt-4o-mini");

        config.openai_model = "gpt-4o".to_string();
        assert_eq!(config.model(), "gpt-4o");
    }
}
