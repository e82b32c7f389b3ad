// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weak delegate storage and outcome dispatch shared by sender implementations.

use std::fmt;
use std::sync::{RwLock, Weak};

use tracing::debug;

use crate::traits::{FeedbackSender, SenderDelegate};
use crate::types::{FeedbackPayload, SubmissionOutcome};

/// Holds a sender's delegate without owning it.
#[derive(Default)]
pub struct DelegateSlot {
    inner: RwLock<Option<Weak<dyn SenderDelegate>>>,
}

impl DelegateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the registered delegate.
    pub fn set(&self, delegate: Weak<dyn SenderDelegate>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(delegate);
        }
    }

    /// Returns a weak handle to the current delegate, if one was registered.
    ///
    /// Senders take this snapshot when a submission starts so a later
    /// `set` does not redirect an outcome already in flight.
    pub fn current(&self) -> Option<Weak<dyn SenderDelegate>> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }
}

impl fmt::Debug for DelegateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = self.current().is_some_and(|d| d.strong_count() > 0);
        f.debug_struct("DelegateSlot")
            .field("registered", &registered)
            .finish()
    }
}

/// Delivers `outcome` to the delegate, if it is still alive.
///
/// Returns `true` when a delegate method was actually invoked.
pub fn report_outcome(
    delegate: Option<&Weak<dyn SenderDelegate>>,
    sender: &dyn FeedbackSender,
    feedback: &FeedbackPayload,
    outcome: &SubmissionOutcome,
) -> bool {
    let Some(delegate) = delegate.and_then(Weak::upgrade) else {
        debug!(sender = sender.name(), "no live delegate, outcome not reported");
        return false;
    };

    match outcome {
        SubmissionOutcome::Succeeded(success) => delegate.did_send(sender, feedback, *success),
        SubmissionOutcome::Failed(error) => delegate.did_fail_to_send(sender, feedback, error),
    }
    true
}
