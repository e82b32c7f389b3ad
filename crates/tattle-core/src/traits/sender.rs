// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender, delegate, and presentation traits.

use std::sync::Weak;

use crate::error::SendError;
use crate::submission::Submission;
use crate::traits::adapter::PluginAdapter;
use crate::types::{FeedbackPayload, SendSuccess};

/// Receives the outcome of every submission made by a sender.
///
/// Exactly one of the two methods is called per `send`. Calls may arrive on
/// a runtime worker thread rather than the thread that called `send`.
pub trait SenderDelegate: Send + Sync {
    /// The feedback was delivered.
    fn did_send(&self, sender: &dyn FeedbackSender, feedback: &FeedbackPayload, success: SendSuccess);

    /// The feedback could not be delivered.
    fn did_fail_to_send(
        &self,
        sender: &dyn FeedbackSender,
        feedback: &FeedbackPayload,
        error: &SendError,
    );
}

/// The UI surface hosting the feedback flow.
pub trait PresentationContext {
    /// Asks the surface to dismiss itself.
    fn dismiss(&self);
}

/// Delivers feedback payloads to a backend.
pub trait FeedbackSender: PluginAdapter {
    /// Registers the delegate informed of outcomes.
    ///
    /// Only a weak reference is held: the sender never keeps the delegate
    /// alive, and outcomes completing after the delegate is dropped are not
    /// reported to anyone.
    fn set_delegate(&self, delegate: Weak<dyn SenderDelegate>);

    /// Starts delivering `feedback` and returns without waiting for the network.
    ///
    /// `presenter` is dismissed once the upload has been scheduled. Its
    /// absence is itself a failure.
    fn send(&self, feedback: FeedbackPayload, presenter: Option<&dyn PresentationContext>)
        -> Submission;
}
