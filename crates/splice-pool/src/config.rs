// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! block_size = 4096
//! buffer_size = 1024        # buffer pools only
//! backoff_micros = 1000
//! growth_policy = "headroom" # or "exact-fit"
//! ```

use crate::PoolError;
use std::path::Path;
use std::time::Duration;

/// Default slots per block; sized for hot paths that churn thousands of items.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Default sleep for a thread that loses the growth race.
pub const DEFAULT_BACKOFF_MICROS: u64 = 1000;

/// How many blocks the bulk acquire path provisions for a shortfall.
///
/// Single-node growth always adds exactly one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthPolicy {
    /// `deficit / block_size + 1` blocks: always at least one spare block,
    /// even when the deficit is an exact multiple of the block size.
    #[default]
    Headroom,
    /// `ceil(deficit / block_size)` blocks, never fewer than one.
    ExactFit,
}

impl GrowthPolicy {
    /// Number of blocks to provision to cover `deficit` missing slots, or
    /// `None` if the count does not fit in a `usize`.
    pub fn blocks_for(self, deficit: usize, block_size: usize) -> Option<usize> {
        match self {
            GrowthPolicy::Headroom => (deficit / block_size).checked_add(1),
            GrowthPolicy::ExactFit => Some(deficit.div_ceil(block_size).max(1)),
        }
    }

    /// Name as written in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            GrowthPolicy::Headroom => "headroom",
            GrowthPolicy::ExactFit => "exact-fit",
        }
    }
}

/// Configuration for a [`SplicePool`](crate::SplicePool).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PoolConfig {
    /// Slots provisioned per growth step.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Elements per buffer slot. Required by buffer pools, ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,
    /// Sleep, in microseconds, for a thread that loses the growth race.
    #[serde(default = "default_backoff_micros")]
    pub backoff_micros: u64,
    /// Bulk-growth sizing rule.
    #[serde(default)]
    pub growth_policy: GrowthPolicy,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_backoff_micros() -> u64 {
    DEFAULT_BACKOFF_MICROS
}

impl PoolConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PoolError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PoolError::InvalidConfig(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PoolError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PoolError::InvalidConfig(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PoolError> {
        toml::to_string_pretty(self)
            .map_err(|e| PoolError::InvalidConfig(format!("TOML serialise error: {e}")))
    }

    /// Checks the sizes are usable.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.block_size == 0 {
            return Err(PoolError::InvalidConfig(
                "block_size must be greater than zero".into(),
            ));
        }
        if let Some(buffer_size) = self.buffer_size {
            if buffer_size == 0 {
                return Err(PoolError::InvalidConfig(
                    "buffer_size must be greater than zero".into(),
                ));
            }
            if buffer_size.checked_mul(self.block_size).is_none() {
                return Err(PoolError::InvalidConfig(format!(
                    "buffer_size {buffer_size} × block_size {} overflows",
                    self.block_size
                )));
            }
        }
        Ok(())
    }

    /// The growth-guard backoff as a [`Duration`].
    pub fn backoff(&self) -> Duration {
        Duration::from_micros(self.backoff_micros)
    }

    /// Returns a copy with a different block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Returns a copy with a different growth policy.
    pub fn with_growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth_policy = policy;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            buffer_size: None,
            backoff_micros: DEFAULT_BACKOFF_MICROS,
            growth_policy: GrowthPolicy::Headroom,
        }
    }
}
