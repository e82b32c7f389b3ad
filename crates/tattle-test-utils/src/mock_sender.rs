// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender with a scripted outcome, for testing code that drives senders.

use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use tattle_core::{
    report_outcome, DelegateSlot, FeedbackPayload, FeedbackSender, HealthStatus, PluginAdapter,
    PresentationContext, SendError, SendSuccess, SenderDelegate, Submission, SubmissionOutcome,
    TattleError,
};

/// A sender that reports a fixed outcome without doing any I/O.
///
/// Follows the same contract as a real sender: a missing presenter fails
/// synchronously, otherwise the outcome is reported from a spawned task and
/// the presenter is dismissed right after scheduling.
#[derive(Clone)]
pub struct MockSender {
    outcome: SubmissionOutcome,
    received: Arc<Mutex<Vec<FeedbackPayload>>>,
    delegate: Arc<DelegateSlot>,
}

impl MockSender {
    pub fn succeeding() -> Self {
        Self::with_outcome(SubmissionOutcome::Succeeded(SendSuccess::Sent))
    }

    pub fn failing(error: SendError) -> Self {
        Self::with_outcome(SubmissionOutcome::Failed(error))
    }

    pub fn with_outcome(outcome: SubmissionOutcome) -> Self {
        Self {
            outcome,
            received: Arc::new(Mutex::new(Vec::new())),
            delegate: Arc::new(DelegateSlot::new()),
        }
    }

    /// Payloads accepted for delivery so far.
    pub fn received(&self) -> Vec<FeedbackPayload> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PluginAdapter for MockSender {
    fn name(&self) -> &str {
        "mock-sender"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, TattleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TattleError> {
        Ok(())
    }
}

impl FeedbackSender for MockSender {
    fn set_delegate(&self, delegate: Weak<dyn SenderDelegate>) {
        self.delegate.set(delegate);
    }

    fn send(
        &self,
        feedback: FeedbackPayload,
        presenter: Option<&dyn PresentationContext>,
    ) -> Submission {
        let delegate = self.delegate.current();

        let Some(presenter) = presenter else {
            let outcome = SubmissionOutcome::Failed(SendError::NoPresentationContext);
            report_outcome(delegate.as_ref(), self, &feedback, &outcome);
            return Submission::settled(outcome);
        };

        if let Ok(mut received) = self.received.lock() {
            received.push(feedback.clone());
        }

        let sender = self.clone();
        let task = tokio::spawn(async move {
            let outcome = sender.outcome.clone();
            report_outcome(delegate.as_ref(), &sender, &feedback, &outcome);
            outcome
        });

        presenter.dismiss();
        Submission::pending(task)
    }
}
