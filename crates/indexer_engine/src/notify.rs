use std::sync::Arc;
use std::time::Duration;

use indexer_core::{Ack, NotificationType, NotifyError, NotifyErrorKind};
use indexer_logging::indexer_debug;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::auth::{AuthError, TokenSource};
use crate::error::SetupError;
use crate::types::UrlMetadata;

const PUBLISH_PATH: &str = "v3/urlNotifications:publish";
const METADATA_PATH: &str = "v3/urlNotifications/metadata";

/// "Notify URL updated" capability of the indexing service.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Runs once before the first notification; a failure aborts the run.
    async fn authenticate(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn notify(&self, url: &str, kind: NotificationType) -> Result<Ack, NotifyError>;
}

/// Read-only lookup of what the service last recorded for a URL.
#[async_trait::async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn metadata(&self, url: &str) -> Result<UrlMetadata, NotifyError>;
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// HTTP client for the Web Search Indexing API.
pub struct IndexingClient {
    client: reqwest::Client,
    endpoint: Url,
    tokens: Arc<dyn TokenSource>,
}

impl IndexingClient {
    pub fn new(
        endpoint: &str,
        tokens: Arc<dyn TokenSource>,
        timeout: Duration,
    ) -> Result<Self, SetupError> {
        let mut base = endpoint.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint =
            Url::parse(&base).map_err(|err| SetupError::Endpoint(format!("{base}: {err}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SetupError::Endpoint(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            tokens,
        })
    }

    fn route(&self, path: &str) -> Result<Url, NotifyError> {
        self.endpoint
            .join(path)
            .map_err(|err| NotifyError::new(NotifyErrorKind::Unexpected, err.to_string()))
    }

    async fn bearer(&self) -> Result<String, NotifyError> {
        let token = self.tokens.access_token().await.map_err(auth_failure)?;
        Ok(format!("Bearer {token}"))
    }
}

#[async_trait::async_trait]
impl Notifier for IndexingClient {
    async fn authenticate(&self) -> Result<(), AuthError> {
        self.tokens.access_token().await.map(|_| ())
    }

    async fn notify(&self, url: &str, kind: NotificationType) -> Result<Ack, NotifyError> {
        let target = self.route(PUBLISH_PATH)?;
        indexer_debug!("POST {} type={} url={}", target, kind, url);
        let response = self
            .client
            .post(target)
            .header(AUTHORIZATION, self.bearer().await?)
            .json(&json!({ "url": url, "type": kind.as_str() }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_body(response).await?;
        Ok(Ack::from_body(body, kind))
    }
}

#[async_trait::async_trait]
impl MetadataLookup for IndexingClient {
    async fn metadata(&self, url: &str) -> Result<UrlMetadata, NotifyError> {
        let target = self.route(METADATA_PATH)?;
        indexer_debug!("GET {} url={}", target, url);
        let response = self
            .client
            .get(target)
            .query(&[("url", url)])
            .header(AUTHORIZATION, self.bearer().await?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_body(response).await?;
        serde_json::from_value(body)
            .map_err(|err| NotifyError::new(NotifyErrorKind::Unexpected, err.to_string()))
    }
}

/// Only a success status with a JSON body counts as an acknowledgment.
async fn read_body(response: reqwest::Response) -> Result<Value, NotifyError> {
    let status = response.status();
    let text = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(NotifyError::http(status.as_u16(), error_message(&text, status)));
    }
    serde_json::from_str(&text).map_err(|err| {
        NotifyError::new(
            NotifyErrorKind::Unexpected,
            format!("unreadable acknowledgment: {err}"),
        )
    })
}

fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message.or(envelope.error.status))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status.to_string())
}

fn auth_failure(err: AuthError) -> NotifyError {
    let kind = match err {
        AuthError::Request(_) => NotifyErrorKind::Network,
        _ => NotifyErrorKind::Permission,
    };
    NotifyError::new(kind, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> NotifyError {
    if err.is_timeout() {
        return NotifyError::new(NotifyErrorKind::Timeout, err.to_string());
    }
    NotifyError::new(NotifyErrorKind::Network, err.to_string())
}
