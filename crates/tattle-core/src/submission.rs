// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handle for observing the outcome of a single `send`.

use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::SendError;
use crate::types::SubmissionOutcome;

/// The in-flight or already-settled result of one `send`.
///
/// Dropping a `Submission` does not cancel the upload; the delegate is
/// still notified.
#[derive(Debug)]
pub struct Submission {
    state: State,
}

#[derive(Debug)]
enum State {
    Settled(SubmissionOutcome),
    Pending(JoinHandle<SubmissionOutcome>),
}

impl Submission {
    /// A submission that ended before any network work was scheduled.
    pub fn settled(outcome: SubmissionOutcome) -> Self {
        Self {
            state: State::Settled(outcome),
        }
    }

    /// A submission whose outcome will be produced by `task`.
    pub fn pending(task: JoinHandle<SubmissionOutcome>) -> Self {
        Self {
            state: State::Pending(task),
        }
    }

    /// Returns `true` once the outcome is available.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Settled(_) => true,
            State::Pending(task) => task.is_finished(),
        }
    }

    /// Waits for the outcome.
    ///
    /// If the upload task aborted before producing one, this yields
    /// [`SendError::Unknown`].
    pub async fn outcome(self) -> SubmissionOutcome {
        match self.state {
            State::Settled(outcome) => outcome,
            State::Pending(task) => match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "submission task ended without an outcome");
                    SubmissionOutcome::Failed(SendError::Unknown)
                }
            },
        }
    }
}
