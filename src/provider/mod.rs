//! Translation backends.
//!
//! The worker pool only knows the [`TranslationProvider`] trait, so new
//! backends plug in here without touching job construction or scheduling.

pub mod chatgpt;

use crate::config::{Config, Service};
use crate::error::TranslateError;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use chatgpt::ChatGptProvider;

/// Text to translate plus its language pair, one per job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// A translation capability.
///
/// Implementations must never return `Ok` with empty or blank text, and must
/// keep transport failures distinguishable from bad output.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;

    /// Human-readable backend name for logs
    fn name(&self) -> &str;
}

/// Build the backend selected in `config`
pub fn build_provider(config: &Config) -> Result<Arc<dyn TranslationProvider>> {
    match config.service {
        Service::Chatgpt => Ok(Arc::new(ChatGptProvider::from_config(config)?)),
    }
}
