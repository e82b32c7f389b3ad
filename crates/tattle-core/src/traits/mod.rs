// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable feedback senders.
//!
//! Every sender extends the [`PluginAdapter`] base trait, which uses
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod sender;

pub use adapter::PluginAdapter;
pub use sender::{FeedbackSender, PresentationContext, SenderDelegate};
