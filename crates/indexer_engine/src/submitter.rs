use std::any::Any;
use std::fs;
use std::io;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use indexer_core::{
    parse_url_list, NotificationType, NotifyError, NotifyErrorKind, Outcome, RequestBudget,
    RunReport, RunState, SubmitterConfig,
};
use indexer_logging::{indexer_error, indexer_info, indexer_warn};

use crate::error::SetupError;
use crate::notify::Notifier;
use crate::pacing::Pacer;
use crate::persist::{write_failure_file, PersistError};
use crate::types::{EngineEvent, ProgressSink};

/// Read the URL list; a missing, unreadable or blank file is fatal.
pub fn load_url_list(path: &Path) -> Result<Vec<String>, SetupError> {
    let raw = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SetupError::InputMissing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SetupError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let urls = parse_url_list(&raw);
    if urls.is_empty() {
        return Err(SetupError::EmptyInput(path.to_path_buf()));
    }
    indexer_info!("Loaded {} URLs from {:?}", urls.len(), path);
    Ok(urls)
}

/// Submits URLs one at a time with fixed pacing between requests.
pub struct BatchSubmitter {
    notifier: Arc<dyn Notifier>,
    pacer: Arc<dyn Pacer>,
    pacing_interval: Duration,
    max_requests_per_window: u32,
    window: Duration,
    notification_type: NotificationType,
}

impl BatchSubmitter {
    pub fn new(config: &SubmitterConfig, notifier: Arc<dyn Notifier>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            notifier,
            pacer,
            pacing_interval: config.pacing_interval(),
            max_requests_per_window: config.max_requests_per_window,
            window: config.window(),
            notification_type: config.notification_type,
        }
    }

    /// Authenticate once, then notify every URL in order.
    ///
    /// Per-URL failures are recorded and never stop the loop.
    pub async fn run(&self, urls: &[String], sink: &dyn ProgressSink) -> Result<RunReport, SetupError> {
        if urls.is_empty() {
            return Err(SetupError::NoUrls);
        }
        let started = self.pacer.elapsed();
        let mut state = RunState::new();

        state.begin_authentication()?;
        self.notifier.authenticate().await?;

        state.begin_submitting(urls)?;
        let total = urls.len();
        sink.emit(EngineEvent::RunStarted { total });

        let mut budget = RequestBudget::new(self.max_requests_per_window, self.window);
        for (index, url) in urls.iter().enumerate() {
            if index > 0 {
                self.pacer.sleep(self.pacing_interval).await;
            }
            let wait = budget.wait_before_next(self.pacer.elapsed());
            if !wait.is_zero() {
                indexer_warn!("Request budget exhausted, waiting {:?}", wait);
                sink.emit(EngineEvent::Throttled { delay: wait });
                self.pacer.sleep(wait).await;
            }
            budget.record(self.pacer.elapsed());

            let outcome = self.notify_isolated(url).await;
            match &outcome {
                Outcome::Succeeded(_) => indexer_info!("[{}/{}] {} submitted", index + 1, total, url),
                Outcome::Failed(err) => {
                    indexer_info!("[{}/{}] {} failed ({}): {}", index + 1, total, url, err.kind, err)
                }
            }
            state.record(index, outcome.clone())?;
            sink.emit(EngineEvent::Submitted {
                index: index + 1,
                total,
                url: url.clone(),
                outcome,
            });
        }

        let report = state.finish()?;
        Ok(report.with_elapsed(self.pacer.elapsed().saturating_sub(started)))
    }

    /// A panicking notifier fails the one URL instead of the whole run.
    async fn notify_isolated(&self, url: &str) -> Outcome {
        let call = AssertUnwindSafe(self.notifier.notify(url, self.notification_type));
        match call.catch_unwind().await {
            Ok(result) => Outcome::from(result),
            Err(payload) => Outcome::Failed(NotifyError::new(
                NotifyErrorKind::Unexpected,
                panic_message(payload.as_ref()),
            )),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("notifier panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("notifier panicked: {text}")
    } else {
        "notifier panicked".to_string()
    }
}

/// Result of a complete run: the report plus where failures were written.
///
/// A failure file that could not be written does not discard the report.
#[derive(Debug)]
pub struct BatchRun {
    pub report: RunReport,
    pub failure_file: Result<Option<PathBuf>, PersistError>,
}

impl BatchRun {
    /// Path of the written failure file, if any.
    pub fn saved_failure_file(&self) -> Option<&Path> {
        self.failure_file.as_ref().ok().and_then(|path| path.as_deref())
    }
}

/// Load the input file, submit every URL, and persist the failed subset.
pub async fn run_batch(
    config: &SubmitterConfig,
    notifier: Arc<dyn Notifier>,
    pacer: Arc<dyn Pacer>,
    sink: &dyn ProgressSink,
) -> Result<BatchRun, SetupError> {
    config.validate()?;
    let urls = load_url_list(&config.input_path)?;
    if urls.len() > config.daily_quota as usize {
        indexer_warn!(
            "{} URLs exceed the daily quota of {}; expect quota errors past that point",
            urls.len(),
            config.daily_quota
        );
    }

    let submitter = BatchSubmitter::new(config, notifier, pacer);
    let report = submitter.run(&urls, sink).await?;

    let failure_file = write_failure_file(&config.output_failure_path, report.failed_urls());
    match &failure_file {
        Ok(Some(path)) => indexer_info!("Saved {} failed URLs to {:?}", report.failed(), path),
        Ok(None) => {}
        Err(err) => indexer_error!(
            "Could not save failed URLs to {:?}: {}",
            config.output_failure_path,
            err
        ),
    }
    Ok(BatchRun {
        report,
        failure_file,
    })
}
