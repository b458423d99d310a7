use std::time::Duration;

use indexer_core::NotifyError;

use crate::notify::MetadataLookup;
use crate::pacing::Pacer;
use crate::types::{EngineEvent, ProgressSink, UrlMetadata};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusResult {
    pub url: String,
    pub result: Result<UrlMetadata, NotifyError>,
}

/// Look up each URL's latest notifications, paced like submissions.
pub async fn check_statuses(
    lookup: &dyn MetadataLookup,
    pacer: &dyn Pacer,
    pacing_interval: Duration,
    urls: &[String],
    sink: &dyn ProgressSink,
) -> Vec<StatusResult> {
    let total = urls.len();
    let mut results = Vec::with_capacity(total);
    for (index, url) in urls.iter().enumerate() {
        if index > 0 {
            pacer.sleep(pacing_interval).await;
        }
        let result = lookup.metadata(url).await;
        sink.emit(EngineEvent::StatusChecked {
            index: index + 1,
            total,
            url: url.clone(),
            result: result.clone(),
        });
        results.push(StatusResult {
            url: url.clone(),
            result,
        });
    }
    results
}
