//! Translate a tree of i18n JSON resource files into per-language copies
//! using a chat-based language model.
//!
//! The pipeline is: [`jobs::build_jobs`] turns the source tree and the
//! language list into jobs, [`pool::WorkerPool`] drains them with a fixed
//! number of workers, and each worker asks a [`provider::TranslationProvider`]
//! for the translated file before writing it under `<target>/<lang>/`.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod pool;
pub mod provider;
pub mod report;
pub mod retry;
pub mod validator;
