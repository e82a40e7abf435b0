//! Fixed-size worker pool draining a shared job queue.
//!
//! Every job is handed to exactly one worker through a single channel. A job
//! that fails is recorded and the worker moves on; nothing a job does can stop
//! the pool. Target paths are unique per (language, relative path), so
//! workers never write the same file and need no locking beyond the queue.

use crate::jobs::Job;
use crate::provider::{TranslationProvider, TranslationRequest};
use crate::report::{JobOutcome, RunReport};
use crate::validator::PlaceholderValidator;
use anyhow::{anyhow, bail, Context, Result};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub struct WorkerPool {
    provider: Arc<dyn TranslationProvider>,
    concurrency: usize,
}

impl WorkerPool {
    /// A concurrency of 0 is treated as 1.
    pub fn new(provider: Arc<dyn TranslationProvider>, concurrency: usize) -> Self {
        if concurrency == 0 {
            warn!("Concurrency must be at least 1, running with a single worker");
        }
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Attempt every job exactly once and report the outcomes in job order.
    ///
    /// Returns after all workers have exited. Jobs complete in any order.
    pub async fn run(&self, jobs: Vec<Job>, source_lang: &str) -> RunReport {
        let total = jobs.len();
        let (job_tx, job_rx) = mpsc::channel::<(usize, Job)>(self.concurrency);
        let job_rx = Arc::new(Mutex::new(job_rx));
        // Outcomes leave the worker as soon as each job finishes
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(usize, JobOutcome)>();
        let source_lang: Arc<str> = Arc::from(source_lang);

        let mut workers = JoinSet::new();
        for worker_id in 0..self.concurrency {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let provider = Arc::clone(&self.provider);
            let source_lang = Arc::clone(&source_lang);

            workers.spawn(async move {
                loop {
                    // The lock is held only while waiting for the next job
                    let next = job_rx.lock().await.recv().await;
                    let Some((index, job)) = next else {
                        break;
                    };
                    debug!(worker_id, index, "Worker picked up job");

                    let outcome =
                        run_job(Arc::clone(&provider), job, Arc::clone(&source_lang)).await;
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
        // Only workers hold the receiver and result senders now
        drop(job_rx);
        drop(result_tx);

        for (index, job) in jobs.iter().cloned().enumerate() {
            if job_tx.send((index, job)).await.is_err() {
                error!(
                    "All workers exited, {} of {} jobs were not dispatched",
                    total - index,
                    total
                );
                break;
            }
        }
        drop(job_tx);

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                error!("Translation worker terminated abnormally: {}", e);
            }
        }

        let mut slots: Vec<Option<JobOutcome>> = vec![None; total];
        while let Some((index, outcome)) = result_rx.recv().await {
            slots[index] = Some(outcome);
        }

        let outcomes = slots
            .into_iter()
            .zip(jobs)
            .map(|(slot, job)| {
                slot.unwrap_or_else(|| {
                    JobOutcome::failure(job, "job was not completed by any worker")
                })
            })
            .collect();

        RunReport { outcomes }
    }
}

/// Run one job on its own task so a panicking backend fails only that job
async fn run_job(
    provider: Arc<dyn TranslationProvider>,
    job: Job,
    source_lang: Arc<str>,
) -> JobOutcome {
    let task_job = job.clone();
    let handle =
        tokio::spawn(async move { process_job(provider.as_ref(), &task_job, &source_lang).await });

    let result = match handle.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(anyhow!(
            "translation task panicked: {}",
            panic_message(e.into_panic().as_ref())
        )),
        Err(e) => Err(anyhow!("translation task failed: {}", e)),
    };

    match result {
        Ok(()) => {
            info!(
                "✓ Successfully translated {} to {}",
                job.relative_path.display(),
                job.language
            );
            JobOutcome::success(job)
        }
        Err(e) => {
            error!(
                "✗ Error translating {} to {}: {:#}",
                job.source_path.display(),
                job.language,
                e
            );
            let message = format!("{:#}", e);
            JobOutcome::failure(job, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Translate one file: ensure the target directory, read, translate, write
async fn process_job(
    provider: &dyn TranslationProvider,
    job: &Job,
    source_lang: &str,
) -> Result<()> {
    if let Some(parent) = job.target_path.parent() {
        // create_dir_all treats a directory created concurrently as success
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    info!(
        "Translating {} to {}...",
        job.relative_path.display(),
        job.language
    );

    let bytes = tokio::fs::read(&job.source_path)
        .await
        .with_context(|| format!("failed to read source file {}", job.source_path.display()))?;

    // Invalid UTF-8 becomes U+FFFD rather than failing the job
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} is not valid UTF-8, replacing invalid sequences",
                job.source_path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    let request = TranslationRequest {
        text,
        source_language: source_lang.to_string(),
        target_language: job.language.clone(),
    };

    let translated = provider
        .translate(&request)
        .await
        .with_context(|| format!("failed to translate content with {}", provider.name()))?;

    let translated = translated.trim();
    if translated.is_empty() {
        bail!("{} returned an empty translation", provider.name());
    }

    let validation = PlaceholderValidator::validate(&request.text, translated);
    if !validation.is_clean() {
        warn!(
            "Translation validation warnings for {} ({}): {:?}",
            job.relative_path.display(),
            job.language,
            validation.warnings
        );
    }

    tokio::fs::write(&job.target_path, translated)
        .await
        .with_context(|| format!("failed to write {}", job.target_path.display()))?;

    Ok(())
}
