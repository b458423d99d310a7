//! Indexer core: pure run state, outcomes, and reporting helpers.
mod budget;
mod config;
mod outcome;
mod report;
mod state;
mod urls;

pub use budget::RequestBudget;
pub use config::{ConfigError, NotificationType, SubmitterConfig};
pub use outcome::{Ack, NotifyError, NotifyErrorKind, Outcome, SubmissionResult};
pub use report::{FailedUrl, RunReport};
pub use state::{ItemStatus, PhaseError, RunPhase, RunState};
pub use urls::parse_url_list;
