// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by senders, delegates, and configuration.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SendError;

/// A captured screen image, optionally with the user's annotations applied.
#[derive(Debug, Clone)]
pub struct Screenshot {
    original: DynamicImage,
    annotated: Option<DynamicImage>,
}

impl Screenshot {
    /// Wraps an unannotated capture.
    pub fn new(original: DynamicImage) -> Self {
        Self {
            original,
            annotated: None,
        }
    }

    /// Attaches the annotated rendition of this capture.
    pub fn with_annotated(mut self, annotated: DynamicImage) -> Self {
        self.annotated = Some(annotated);
        self
    }

    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    pub fn annotated(&self) -> Option<&DynamicImage> {
        self.annotated.as_ref()
    }

    /// The image that should be delivered: the annotated one when present.
    pub fn preferred_image(&self) -> &DynamicImage {
        self.annotated.as_ref().unwrap_or(&self.original)
    }
}

/// A user's report, handed to a sender by the UI flow.
#[derive(Debug, Clone)]
pub struct FeedbackPayload {
    pub screenshot: Screenshot,
    pub text: Option<String>,
}

impl FeedbackPayload {
    pub fn new(screenshot: Screenshot) -> Self {
        Self {
            screenshot,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// How a submission succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SendSuccess {
    /// The feedback was handed to the backend.
    Sent,
}

/// The single terminal result of one `send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded(SendSuccess),
    Failed(SendError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is reachable and the destination is accessible.
    Healthy,
    /// Backend is not usable.
    Unhealthy(String),
}

/// Trailer written after the last multipart part.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClosingFraming {
    /// `CRLF--boundary--CRLF`, as RFC 7578 requires.
    #[default]
    Standard,
    /// `CRLF--boundary` with no terminating `--` or CRLF.
    Legacy,
}

/// How an HTTP response without a transport error is classified.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusPolicy {
    /// Any response counts as sent; only transport errors fail.
    #[default]
    Transport,
    /// Non-2xx responses fail with `UploadFailed`.
    Strict,
}
