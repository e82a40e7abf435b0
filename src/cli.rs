//! Command-line surface. Flags are parsed with clap and resolved into a
//! [`Config`] before anything touches the filesystem or the network.

use crate::config::{
    Config, Service, DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL,
    DEFAULT_OPENAI_API_URL, DEFAULT_SOURCE_DIR, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_DIR,
    DEFAULT_TARGET_LANGS, DEFAULT_TEMPERATURE,
};
use crate::retry::RetryConfig;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "i18n-translator",
    version,
    about = "Automatic translation tool for i18n JSON files",
    after_help = "Examples:\n  \
        i18n-translator --api-key=YOUR_API_KEY --from=en --to=ru,es,fr\n  \
        i18n-translator --source=./src/locales/en --target=./src/locales --api-key=YOUR_API_KEY"
)]
pub struct Cli {
    /// Number of parallel workers
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Model for chatgpt service (e.g., gpt-4o-mini)
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Source language directory (or a single .json file)
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// Target directory for translations
    #[arg(long, default_value = DEFAULT_TARGET_DIR)]
    pub target: PathBuf,

    /// Source language code
    #[arg(long, default_value = DEFAULT_SOURCE_LANG)]
    pub from: String,

    /// Target language codes (comma-separated)
    #[arg(long, default_value = DEFAULT_TARGET_LANGS)]
    pub to: String,

    /// Translation API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Translation service
    #[arg(long, value_enum, default_value_t = Service::Chatgpt)]
    pub service: Service,

    /// Chat completions endpoint
    #[arg(long, env = "OPENAI_API_URL", default_value = DEFAULT_OPENAI_API_URL)]
    pub api_url: String,

    /// Sampling temperature for the model
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Attempts per translation call, including the first (1 disables retry)
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Cli {
    /// Resolve flags into a validated [`Config`]
    pub fn into_config(self) -> Result<Config> {
        let config = Config {
            concurrency: self.concurrency,
            source: self.source,
            target: self.target,
            source_lang: self.from,
            target_langs: self.to,
            service: self.service,
            openai_api_key: self.api_key.unwrap_or_default(),
            openai_model: self.model,
            openai_api_url: self.api_url,
            openai_temperature: self.temperature,
            retry: RetryConfig::api_call(self.max_attempts),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["i18n-translator"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("Should parse")
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--api-key", "sk-test"]);

        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.model, "gpt-4o-mini");
        assert_eq!(cli.source, PathBuf::from("./locales/en"));
        assert_eq!(cli.target, PathBuf::from("./locales"));
        assert_eq!(cli.from, "en");
        assert_eq!(cli.to, "es,fr,de");
        assert_eq!(cli.service, Service::Chatgpt);
        assert_eq!(cli.max_attempts, 3);
    }

    #[test]
    fn test_into_config_maps_flags() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = dir.path().to_str().expect("utf-8 path");

        let config = parse(&[
            "--api-key=sk-test",
            "--concurrency=8",
            "--model=gpt-4o",
            "--from=de",
            "--to=ru, es",
            "--target=out",
            "--max-attempts=1",
            "--source",
            source,
        ])
        .into_config()
        .expect("Should build config");

        assert_eq!(config.concurrency, 8);
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.source_lang, "de");
        assert_eq!(config.target_langs, "ru, es");
        assert_eq!(config.target, PathBuf::from("out"));
        assert_eq!(config.source, dir.path());
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_into_config_rejects_blank_api_key() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = dir.path().to_str().expect("utf-8 path");

        let result = parse(&["--api-key=", "--source", source]).into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_into_config_rejects_missing_source() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let missing = dir.path().join("nope");

        let result = parse(&["--api-key=sk-test", "--source", missing.to_str().expect("utf-8")])
            .into_config();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Source directory does not exist"));
    }

    #[test]
    fn test_unsupported_service_is_rejected() {
        let result = Cli::try_parse_from(["i18n-translator", "--service", "google"]);
        assert!(result.is_err());
    }
}
