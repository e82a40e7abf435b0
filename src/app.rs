use crate::config::Config;
use crate::jobs::{build_jobs, parse_languages};
use crate::pool::WorkerPool;
use crate::provider::{build_provider, TranslationProvider};
use crate::report::RunReport;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Run a full translation pass with the backend selected in `config`
pub async fn run(config: &Config) -> Result<RunReport> {
    let provider = build_provider(config).context("Failed to initialize translation service")?;
    run_with_provider(config, provider).await
}

/// Run a full translation pass: build the job list, then drain it through
/// the worker pool. Only configuration and job construction errors are
/// returned; per-job failures end up in the report.
pub async fn run_with_provider(
    config: &Config,
    provider: Arc<dyn TranslationProvider>,
) -> Result<RunReport> {
    info!(
        "Starting translation from {} to languages: {}",
        config.source_lang,
        parse_languages(&config.target_langs).join(", ")
    );
    info!("Source directory: {}", config.source.display());
    info!("Target directory: {}", config.target.display());

    let jobs = build_jobs(&config.source, &config.target, &config.target_langs)
        .context("Failed to build jobs")?;

    if jobs.is_empty() {
        warn!("No translation jobs found (no .json files or no target languages)");
        return Ok(RunReport::default());
    }

    info!(
        "Queued {} jobs for {} with {} workers",
        jobs.len(),
        provider.name(),
        config.concurrency.max(1)
    );

    let pool = WorkerPool::new(provider, config.concurrency);
    let report = pool.run(jobs, &config.source_lang).await;

    info!(
        "Finished: {} succeeded, {} failed, {} total ({:.1}% success)",
        report.succeeded(),
        report.failed(),
        report.total(),
        report.success_rate()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use crate::provider::TranslationRequest;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    struct ShoutProvider;

    #[async_trait]
    impl TranslationProvider for ShoutProvider {
        async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
            Ok(request.text.to_uppercase())
        }

        fn name(&self) -> &str {
            "shout"
        }
    }

    fn create_test_config(source: &TempDir, target: &TempDir) -> Config {
        let mut config = Config::new("test-openai-key");
        config.source = source.path().to_path_buf();
        config.target = target.path().to_path_buf();
        config.target_langs = "es,fr".to_string();
        config
    }

    #[tokio::test]
    async fn test_run_with_provider_translates_tree() {
        let source = TempDir::new().expect("Failed to create temp dir");
        let target = TempDir::new().expect("Failed to create temp dir");
        fs::write(source.path().join("common.json"), r#"{"ok":"ok"}"#).expect("write");

        let config = create_test_config(&source, &target);
        let report = run_with_provider(&config, Arc::new(ShoutProvider))
            .await
            .expect("Should run");

        assert_eq!(report.succeeded(), 2);
        let es = fs::read_to_string(target.path().join("es/common.json")).expect("read");
        assert_eq!(es, r#"{"OK":"OK"}"#);
    }

    #[tokio::test]
    async fn test_run_with_provider_no_jobs() {
        let source = TempDir::new().expect("Failed to create temp dir");
        let target = TempDir::new().expect("Failed to create temp dir");

        let config = create_test_config(&source, &target);
        let report = run_with_provider(&config, Arc::new(ShoutProvider))
            .await
            .expect("Should run");

        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn test_run_with_provider_invalid_single_file_is_fatal() {
        let source = TempDir::new().expect("Failed to create temp dir");
        let target = TempDir::new().expect("Failed to create temp dir");
        let file = source.path().join("en.yaml");
        fs::write(&file, "ok: ok").expect("write");

        let mut config = create_test_config(&source, &target);
        config.source = file;

        let err = run_with_provider(&config, Arc::new(ShoutProvider))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("source file must be a .json file"));
    }

    #[tokio::test]
    async fn test_run_requires_api_key() {
        let source = TempDir::new().expect("Failed to create temp dir");
        let target = TempDir::new().expect("Failed to create temp dir");
        let mut config = create_test_config(&source, &target);
        config.openai_api_key = String::new();

        let err = run(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("api key is required"));
    }
}
