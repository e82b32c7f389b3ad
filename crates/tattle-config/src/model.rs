// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the tattle feedback SDK.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use tattle_core::{ClosingFraming, StatusPolicy};

/// Top-level tattle configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TattleConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Trello sender settings.
    #[serde(default)]
    pub trello: TrelloConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Trello sender configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrelloConfig {
    /// Trello API key. `None` disables sending.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Trello API token.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Identifier of the list new cards are created in.
    #[serde(default)]
    pub list_id: Option<String>,

    /// Scheme and host of the Trello REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// JPEG quality in the range `0.0..=1.0`.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: f32,

    /// File name announced for the screenshot part.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Trailer written after the last multipart part.
    #[serde(default)]
    pub closing_framing: ClosingFraming,

    /// Whether non-2xx responses count as failures.
    #[serde(default)]
    pub status_policy: StatusPolicy,

    /// Upload timeout. `None` leaves the HTTP client default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Send the payload text as the card description.
    #[serde(default = "default_attach_text")]
    pub attach_text: bool,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_token: None,
            list_id: None,
            api_base_url: default_api_base_url(),
            jpeg_quality: default_jpeg_quality(),
            file_name: default_file_name(),
            closing_framing: ClosingFraming::default(),
            status_policy: StatusPolicy::default(),
            timeout_secs: None,
            attach_text: default_attach_text(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.trello.com".to_string()
}

fn default_jpeg_quality() -> f32 {
    0.8
}

fn default_file_name() -> String {
    "img.jpg".to_string()
}

fn default_attach_text() -> bool {
    true
}

impl TrelloConfig {
    /// Returns a copy with credentials replaced by a placeholder, for display.
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]".to_string());
        Self {
            api_key: mask(&self.api_key),
            api_token: mask(&self.api_token),
            ..self.clone()
        }
    }
}
