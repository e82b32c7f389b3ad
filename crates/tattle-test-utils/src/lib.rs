// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for tattle integration tests.
//!
//! Mocks for every collaborator of a sender, plus image fixtures, so the
//! outcome contract can be exercised without a real backend.
//!
//! # Components
//!
//! - [`MockDelegate`] - records every outcome notification
//! - [`MockPresenter`] - counts dismissals
//! - [`MockSender`] - sender with a scripted outcome
//! - [`fixtures`] - solid-colour screenshots and byte helpers

pub mod fixtures;
pub mod mock_delegate;
pub mod mock_presenter;
pub mod mock_sender;

pub use mock_delegate::{MockDelegate, Notification};
pub use mock_presenter::MockPresenter;
pub use mock_sender::MockSender;
