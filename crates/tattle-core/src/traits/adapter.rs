// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all senders implement.

use async_trait::async_trait;

use crate::error::TattleError;
use crate::types::HealthStatus;

/// Identity, lifecycle, and health checking shared by every sender.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Checks that the backend is reachable with the configured credentials.
    async fn health_check(&self) -> Result<HealthStatus, TattleError>;

    /// Releases any held resources.
    async fn shutdown(&self) -> Result<(), TattleError>;
}
