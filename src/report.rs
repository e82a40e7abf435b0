//! Aggregate outcome of a translation run.

use crate::jobs::Job;
use serde::Serialize;

/// What happened to a single job
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub job: Job,
    /// `None` when the translation was written, otherwise the failure chain
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn success(job: Job) -> Self {
        Self { job, error: None }
    }

    pub fn failure(job: Job, error: impl Into<String>) -> Self {
        Self {
            job,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-job outcomes of a run, in job order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<JobOutcome>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Percentage of jobs that were written (0.0 for an empty run)
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        (self.succeeded() as f64 / self.total() as f64) * 100.0
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
