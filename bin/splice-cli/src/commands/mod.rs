// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared setup.

pub mod dump;
pub mod sizing;
pub mod stress;

use anyhow::Context;
use splice_pool::PoolConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` count picks the level.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the pool configuration from `path`, or builds a default one with
/// `block_size` when no file is given.
pub fn load_config(path: Option<&Path>, block_size: usize) -> anyhow::Result<PoolConfig> {
    let config = match path {
        Some(path) => PoolConfig::from_file(path)
            .with_context(|| format!("loading pool config from '{}'", path.display()))?,
        None => {
            let config = PoolConfig::default().with_block_size(block_size);
            config.validate()?;
            config
        }
    };
    tracing::info!(
        block_size = config.block_size,
        policy = config.growth_policy.name(),
        backoff_micros = config.backoff_micros,
        "Pool configuration"
    );
    Ok(config)
}
