use std::io;
use std::path::PathBuf;

use indexer_core::{ConfigError, PhaseError};
use thiserror::Error;

use crate::auth::AuthError;
use crate::credential::CredentialError;

/// Conditions that abort a run before (or instead of) submitting anything.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("input file {0:?} not found")]
    InputMissing(PathBuf),
    #[error("could not read input file {path:?}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no URLs found in {0:?}")]
    EmptyInput(PathBuf),
    #[error("no URLs to submit")]
    NoUrls,
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid endpoint {0}")]
    Endpoint(String),
    #[error("run state: {0}")]
    Phase(#[from] PhaseError),
}
