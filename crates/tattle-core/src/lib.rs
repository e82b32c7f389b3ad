// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the tattle feedback SDK.
//!
//! This crate provides the sender, delegate, and presentation traits, the
//! feedback payload and outcome types, and the error taxonomy shared by all
//! sender implementations.

pub mod delegate;
pub mod error;
pub mod submission;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use delegate::{report_outcome, DelegateSlot};
pub use error::{SendError, TattleError};
pub use submission::Submission;
pub use traits::{FeedbackSender, PluginAdapter, PresentationContext, SenderDelegate};
pub use types::{
    ClosingFraming, FeedbackPayload, HealthStatus, Screenshot, SendSuccess, StatusPolicy,
    SubmissionOutcome,
};
