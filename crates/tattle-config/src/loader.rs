// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./tattle.toml` > `~/.config/tattle/tattle.toml` > `/etc/tattle/tattle.toml`,
//! with `TATTLE_*` environment variables overriding all files.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TattleConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tattle/tattle.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tattle.toml";

/// Path of the per-user configuration file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tattle").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tattle/tattle.toml`
/// 3. `~/.config/tattle/tattle.toml`
/// 4. `./tattle.toml`
/// 5. `TATTLE_*` environment variables
pub fn load_config() -> Result<TattleConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TattleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TattleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TattleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TattleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(TattleConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG_FILE)).merge(env_provider())
}

/// Environment provider mapping `TATTLE_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: keys such as `api_key`
/// contain underscores, so `TATTLE_TRELLO_API_KEY` must become
/// `trello.api_key`, not `trello.api.key`. Figment hands over the stripped
/// key in its original case, so it is lowercased first.
fn env_provider() -> Env {
    Env::prefixed("TATTLE_").map(|key| env_key_path(key.as_str()).into())
}

fn env_key_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ["trello", "logging"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
