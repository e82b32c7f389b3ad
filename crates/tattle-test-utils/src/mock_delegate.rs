// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender delegate that records every notification for later assertions.

use std::sync::Mutex;
use std::time::Duration;

use tattle_core::{FeedbackPayload, FeedbackSender, SendError, SendSuccess, SenderDelegate};
use tokio::sync::Notify;
use tokio::time::Instant;

/// One delegate callback, as observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sent {
        sender: String,
        text: Option<String>,
        success: SendSuccess,
    },
    Failed {
        sender: String,
        text: Option<String>,
        error: SendError,
    },
}

impl Notification {
    pub fn error(&self) -> Option<&SendError> {
        match self {
            Notification::Failed { error, .. } => Some(error),
            Notification::Sent { .. } => None,
        }
    }
}

/// Captures notifications; callbacks may arrive from any thread.
#[derive(Debug, Default)]
pub struct MockDelegate {
    notifications: Mutex<Vec<Notification>>,
    notify: Notify,
}

impl MockDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.notifications.lock().map(|n| n.len()).unwrap_or_default()
    }

    /// Waits until at least `count` notifications arrived or `timeout` elapsed.
    ///
    /// Returns whether the count was reached.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return self.count() >= count;
            }
        }
    }

    fn record(&self, notification: Notification) {
        if let Ok(mut n) = self.notifications.lock() {
            n.push(notification);
        }
        self.notify.notify_one();
    }
}

impl SenderDelegate for MockDelegate {
    fn did_send(&self, sender: &dyn FeedbackSender, feedback: &FeedbackPayload, success: SendSuccess) {
        self.record(Notification::Sent {
            sender: sender.name().to_string(),
            text: feedback.text.clone(),
            success,
        });
    }

    fn did_fail_to_send(
        &self,
        sender: &dyn FeedbackSender,
        feedback: &FeedbackPayload,
        error: &SendError,
    ) {
        self.record(Notification::Failed {
            sender: sender.name().to_string(),
            text: feedback.text.clone(),
            error: error.clone(),
        });
    }
}
