//! Console rendering of progress lines and the final summary.

use std::path::Path;

use indexer_core::{Outcome, RunReport, SubmitterConfig};
use indexer_engine::{EngineEvent, ProgressSink, UrlMetadata};

const RULE_WIDTH: usize = 60;

/// Prints one line per processed URL.
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: EngineEvent) {
        println!("{}", progress_line(&event));
    }
}

pub fn progress_line(event: &EngineEvent) -> String {
    match event {
        EngineEvent::RunStarted { total } => format!("Submitting {total} URLs"),
        EngineEvent::Throttled { delay } => format!(
            "Request budget reached, pausing {:.1}s",
            delay.as_secs_f64()
        ),
        EngineEvent::Submitted {
            index,
            total,
            url,
            outcome,
        } => {
            let outcome = match outcome {
                Outcome::Succeeded(_) => "submitted".to_string(),
                Outcome::Failed(err) => format!("FAILED: {}", err.message),
            };
            format!("[{index}/{total}] {url} — {outcome}")
        }
        EngineEvent::StatusChecked {
            index,
            total,
            url,
            result,
        } => {
            let status = match result {
                Ok(metadata) => describe_metadata(metadata),
                Err(err) if err.status == Some(404) => "never notified".to_string(),
                Err(err) => format!("FAILED: {}", err.message),
            };
            format!("[{index}/{total}] {url} — {status}")
        }
    }
}

fn describe_metadata(metadata: &UrlMetadata) -> String {
    let time = |record: &Option<indexer_engine::NotificationRecord>| {
        record
            .as_ref()
            .and_then(|r| r.notify_time.clone())
            .unwrap_or_else(|| "never".to_string())
    };
    format!(
        "updated {}, removed {}",
        time(&metadata.latest_update),
        time(&metadata.latest_remove)
    )
}

/// Final summary block printed after every completed run.
pub fn render_summary(
    report: &RunReport,
    failure_file: Option<&Path>,
    config: &SubmitterConfig,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&format!("\n{rule}\nSUMMARY\n{rule}\n"));
    out.push_str(&format!("Total URLs: {}\n", report.total));
    out.push_str(&format!("Successfully submitted: {}\n", report.succeeded));
    out.push_str(&format!("Failed: {}\n", report.failed()));
    out.push_str(&format!("Success rate: {:.1}%\n", report.success_rate()));
    out.push_str(&format!("Elapsed: {:.1}s\n", report.elapsed.as_secs_f64()));

    if !report.failures.is_empty() {
        out.push_str(&format!("\nFailed URLs:\n{}\n", "-".repeat(RULE_WIDTH)));
        for failure in &report.failures {
            out.push_str(&format!("  {}\n    Error: {}\n", failure.url, failure.message));
        }
    }

    out.push_str(&format!(
        "\nIndexing API limits: {} requests per day, {} requests per {}s\n",
        config.daily_quota, config.max_requests_per_window, config.window_secs
    ));
    if let Some(path) = failure_file {
        out.push_str(&format!("Failed URLs saved to: {}\n", path.display()));
    }
    out
}
