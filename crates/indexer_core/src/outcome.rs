use std::fmt;

use serde_json::Value;

use crate::config::NotificationType;

/// Server acknowledgment of a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    /// Server-side notification timestamp, when the response carried one.
    pub notify_time: Option<String>,
    pub body: Value,
}

impl Ack {
    /// Read the acknowledgment for a notification of type `kind`.
    ///
    /// Only the record matching `kind` is consulted; the other one may
    /// describe an older notification for the same URL.
    pub fn from_body(body: Value, kind: NotificationType) -> Self {
        let record = match kind {
            NotificationType::UrlUpdated => "latestUpdate",
            NotificationType::UrlDeleted => "latestRemove",
        };
        let notify_time = body
            .pointer(&format!("/urlNotificationMetadata/{record}/notifyTime"))
            .or_else(|| body.pointer("/notifyTime"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        Self { notify_time, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyErrorKind {
    /// 401 / 403: service account not an owner, or token rejected.
    Permission,
    /// 429: per-minute or daily quota exhausted.
    QuotaExceeded,
    /// 400: the URL or body was rejected.
    InvalidRequest,
    /// Any other non-success status.
    Service,
    Timeout,
    Network,
    Unexpected,
}

impl NotifyErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => NotifyErrorKind::Permission,
            429 => NotifyErrorKind::QuotaExceeded,
            400 => NotifyErrorKind::InvalidRequest,
            _ => NotifyErrorKind::Service,
        }
    }
}

impl fmt::Display for NotifyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyErrorKind::Permission => write!(f, "permission denied"),
            NotifyErrorKind::QuotaExceeded => write!(f, "quota exceeded"),
            NotifyErrorKind::InvalidRequest => write!(f, "invalid request"),
            NotifyErrorKind::Service => write!(f, "service error"),
            NotifyErrorKind::Timeout => write!(f, "timeout"),
            NotifyErrorKind::Network => write!(f, "network error"),
            NotifyErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    pub kind: NotifyErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl NotifyError {
    pub fn new(kind: NotifyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: NotifyErrorKind::from_status(status),
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NotifyError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded(Ack),
    Failed(NotifyError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

impl From<Result<Ack, NotifyError>> for Outcome {
    fn from(result: Result<Ack, NotifyError>) -> Self {
        match result {
            Ok(ack) => Outcome::Succeeded(ack),
            Err(err) => Outcome::Failed(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub url: String,
    pub outcome: Outcome,
}
