//! Indexer engine: credentials, the indexing client, and the submission loop.
mod auth;
mod credential;
mod error;
mod notify;
mod pacing;
mod persist;
mod status;
mod submitter;
mod types;

pub use auth::{AuthError, ServiceAccountTokenSource, TokenSource, INDEXING_SCOPE};
pub use credential::{load_credential, CredentialError, ServiceAccountKey, DEFAULT_TOKEN_URI};
pub use error::SetupError;
pub use notify::{IndexingClient, MetadataLookup, Notifier};
pub use pacing::{Pacer, TokioPacer};
pub use persist::{write_failure_file, AtomicFileWriter, PersistError};
pub use status::{check_statuses, StatusResult};
pub use submitter::{load_url_list, run_batch, BatchRun, BatchSubmitter};
pub use types::{EngineEvent, NotificationRecord, NullSink, ProgressSink, UrlMetadata};

use std::sync::Arc;

use indexer_core::SubmitterConfig;

/// Load the credential and build an authenticated-on-demand client.
pub fn connect(config: &SubmitterConfig) -> Result<(IndexingClient, ServiceAccountKey), SetupError> {
    let key = load_credential(&config.credential_path)?;
    let tokens =
        ServiceAccountTokenSource::new(key.clone(), config.token_uri.clone(), config.request_timeout())?;
    let client = IndexingClient::new(&config.endpoint, Arc::new(tokens), config.request_timeout())?;
    Ok((client, key))
}
