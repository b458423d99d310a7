use std::time::Duration;

use indexer_core::{NotifyError, Outcome};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RunStarted {
        total: usize,
    },
    /// Emitted when the request-window budget forces a wait beyond pacing.
    Throttled {
        delay: Duration,
    },
    Submitted {
        index: usize,
        total: usize,
        url: String,
        outcome: Outcome,
    },
    StatusChecked {
        index: usize,
        total: usize,
        url: String,
        result: Result<UrlMetadata, NotifyError>,
    },
}

/// Receives progress as the engine works through a URL list.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: EngineEvent) {}
}

/// Latest notifications the indexing service holds for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadata {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub latest_update: Option<NotificationRecord>,
    #[serde(default)]
    pub latest_remove: Option<NotificationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub notify_time: Option<String>,
}
