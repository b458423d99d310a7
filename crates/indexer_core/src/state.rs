use thiserror::Error;

use crate::{Ack, NotifyError, Outcome, RunReport, SubmissionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    NotStarted,
    Authenticating,
    Submitting,
    Done,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemStatus {
    #[default]
    Pending,
    Succeeded(Ack),
    Failed(NotifyError),
}

impl From<Outcome> for ItemStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded(ack) => ItemStatus::Succeeded(ack),
            Outcome::Failed(err) => ItemStatus::Failed(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("cannot move from {from:?} to {to:?}")]
    IllegalTransition { from: RunPhase, to: RunPhase },
    #[error("no item at index {0}")]
    UnknownItem(usize),
    #[error("item {0} already has an outcome")]
    AlreadyRecorded(usize),
    #[error("{0} items still pending")]
    Incomplete(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    url: String,
    status: ItemStatus,
}

/// Lifecycle of one run: `NotStarted -> Authenticating -> Submitting -> Done`.
///
/// Each run owns a fresh state; nothing carries over between runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunState {
    phase: RunPhase,
    items: Vec<Item>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn begin_authentication(&mut self) -> Result<(), PhaseError> {
        self.transition(RunPhase::NotStarted, RunPhase::Authenticating)
    }

    /// Enter the submission loop with every URL pending.
    pub fn begin_submitting(&mut self, urls: &[String]) -> Result<(), PhaseError> {
        self.transition(RunPhase::Authenticating, RunPhase::Submitting)?;
        self.items = urls
            .iter()
            .map(|url| Item {
                url: url.clone(),
                status: ItemStatus::Pending,
            })
            .collect();
        Ok(())
    }

    pub fn record(&mut self, index: usize, outcome: Outcome) -> Result<(), PhaseError> {
        if self.phase != RunPhase::Submitting {
            return Err(PhaseError::IllegalTransition {
                from: self.phase,
                to: RunPhase::Submitting,
            });
        }
        let item = self
            .items
            .get_mut(index)
            .ok_or(PhaseError::UnknownItem(index))?;
        if item.status != ItemStatus::Pending {
            return Err(PhaseError::AlreadyRecorded(index));
        }
        item.status = outcome.into();
        Ok(())
    }

    pub fn status(&self, index: usize) -> Option<&ItemStatus> {
        self.items.get(index).map(|item| &item.status)
    }

    pub fn pending(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == ItemStatus::Pending)
            .count()
    }

    /// Close the run and aggregate its outcomes.
    pub fn finish(&mut self) -> Result<RunReport, PhaseError> {
        let pending = self.pending();
        if self.phase == RunPhase::Submitting && pending > 0 {
            return Err(PhaseError::Incomplete(pending));
        }
        self.transition(RunPhase::Submitting, RunPhase::Done)?;
        let results: Vec<SubmissionResult> = self
            .items
            .iter()
            .filter_map(|item| {
                let outcome = match &item.status {
                    ItemStatus::Succeeded(ack) => Outcome::Succeeded(ack.clone()),
                    ItemStatus::Failed(err) => Outcome::Failed(err.clone()),
                    ItemStatus::Pending => return None,
                };
                Some(SubmissionResult {
                    url: item.url.clone(),
                    outcome,
                })
            })
            .collect();
        Ok(RunReport::from_results(&results))
    }

    fn transition(&mut self, expected: RunPhase, next: RunPhase) -> Result<(), PhaseError> {
        if self.phase != expected {
            return Err(PhaseError::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}
