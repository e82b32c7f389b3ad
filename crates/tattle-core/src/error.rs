// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the tattle feedback SDK.
//!
//! Two families live here: [`TattleError`] for ambient failures surfaced as
//! `Result`s (configuration, client construction, I/O), and [`SendError`],
//! the outcome taxonomy that senders report to their delegate.

use thiserror::Error;

/// The primary error type for SDK set-up and non-delivery operations.
#[derive(Debug, Error)]
pub enum TattleError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport construction or health-check errors.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem or image decoding errors while assembling a payload.
    #[error("payload error: {message}")]
    Payload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why a feedback submission failed.
///
/// Exactly one of these (or a success) is reported to the delegate for every
/// call to `send`. None of them escapes `send` as a Rust error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Reserved fallback. Senders never report it to a delegate; a
    /// [`Submission`](crate::Submission) yields it only if its upload task aborts.
    #[error("an unknown error occurred")]
    Unknown,

    /// No presentation context was supplied to `send`.
    #[error("no presentation context was provided")]
    NoPresentationContext,

    /// The screenshot could not be encoded.
    #[error("the screenshot failed to encode: {reason}")]
    ImageEncodingFailed { reason: String },

    /// The destination endpoint did not parse as a URL.
    #[error("invalid destination URL: {reason}")]
    InvalidDestinationUrl { reason: String },

    /// A multipart header line could not be framed.
    #[error("the request text failed to encode: {reason}")]
    TextEncodingFailed { reason: String },

    /// The upload itself failed.
    #[error("upload failed: {message}")]
    UploadFailed {
        message: String,
        /// HTTP status, when the failure came from a response rather than the transport.
        status: Option<u16>,
    },
}

impl SendError {
    /// Short machine-friendly name of the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SendError::Unknown => "unknown",
            SendError::NoPresentationContext => "no_presentation_context",
            SendError::ImageEncodingFailed { .. } => "image_encoding_failed",
            SendError::InvalidDestinationUrl { .. } => "invalid_destination_url",
            SendError::TextEncodingFailed { .. } => "text_encoding_failed",
            SendError::UploadFailed { .. } => "upload_failed",
        }
    }
}
