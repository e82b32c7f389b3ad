// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::TattleConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one. Missing
/// credentials are not an error here; they are checked when a sender is built.
pub fn validate_config(config: &TattleConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let trello = &config.trello;

    if !(trello.jpeg_quality > 0.0 && trello.jpeg_quality <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "trello.jpeg_quality must be in (0.0, 1.0], got {}",
                trello.jpeg_quality
            ),
        });
    }

    match url::Url::parse(&trello.api_base_url) {
        Ok(base) if base.scheme() == "https" || base.scheme() == "http" => {}
        Ok(base) => errors.push(ConfigError::Validation {
            message: format!(
                "trello.api_base_url must use http or https, got `{}`",
                base.scheme()
            ),
        }),
        Err(e) => errors.push(ConfigError::Validation {
            message: format!("trello.api_base_url `{}` is not a URL: {e}", trello.api_base_url),
        }),
    }

    if trello.file_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "trello.file_name must not be empty".to_string(),
        });
    } else if !trello
        .file_name
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"')
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "trello.file_name `{}` must be printable ASCII without quotes",
                trello.file_name.escape_debug()
            ),
        });
    }

    if trello.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "trello.timeout_secs must be at least 1 when set".to_string(),
        });
    }

    for (key, value) in [
        ("api_key", &trello.api_key),
        ("api_token", &trello.api_token),
        ("list_id", &trello.list_id),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("trello.{key} must not be empty when set"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
