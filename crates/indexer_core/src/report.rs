use std::time::Duration;

use crate::{Outcome, SubmissionResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    pub url: String,
    pub message: String,
}

/// Reconciled outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub total: usize,
    pub succeeded: usize,
    /// Failures in original submission order.
    pub failures: Vec<FailedUrl>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a SubmissionResult>) -> Self {
        let mut report = RunReport::default();
        for result in results {
            report.total += 1;
            match &result.outcome {
                Outcome::Succeeded(_) => report.succeeded += 1,
                Outcome::Failed(err) => report.failures.push(FailedUrl {
                    url: result.url.clone(),
                    message: err.message.clone(),
                }),
            }
        }
        report
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Percentage of URLs acknowledged; 0 for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 * 100.0 / self.total as f64
    }

    pub fn failed_urls(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.url.as_str())
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}
