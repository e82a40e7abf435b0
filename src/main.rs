use anyhow::Result;
use clap::Parser;
use i18n_translator::{app, cli::Cli};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_translator=info".parse()?),
        )
        .init();

    let config = Cli::parse().into_config()?;

    let report = app::run(&config).await?;

    if report.failed() > 0 {
        info!(
            "Translation completed with {} failed job(s), see errors above",
            report.failed()
        );
    } else {
        info!("Translation completed successfully!");
    }
    Ok(())
}
