// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # splice
//!
//! Command-line driver for the splice-pool allocator.
//!
//! ## Usage
//! ```bash
//! # Hammer one pool from many threads and verify the accounting
//! splice stress --threads 8 --iterations 100000 --block-size 4096 --batch 64
//!
//! # Compare bulk-growth policies for a request size
//! splice sizing --block-size 20 --count 41
//!
//! # Build a sorted stack and print a bounded dump
//! splice dump --count 100 --max 16
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "splice",
    about = "Stress-test and inspect block-growing splice pools",
    version,
    author
)]
struct Cli {
    /// Path to a TOML pool configuration file (overrides --block-size).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run concurrent acquire/release cycles on one shared pool.
    Stress {
        /// Number of worker threads.
        #[arg(short, long, default_value_t = 4)]
        threads: usize,

        /// Acquire/release cycles per thread.
        #[arg(short, long, default_value_t = 10_000)]
        iterations: usize,

        /// Slots provisioned per growth step.
        #[arg(short, long, default_value_t = splice_pool::DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Also acquire stacks of this many slots in bulk (0 disables).
        #[arg(long, default_value_t = 0)]
        batch: usize,
    },

    /// Show how many slots each growth policy provisions for a bulk request.
    Sizing {
        /// Slots provisioned per growth step.
        #[arg(short, long, default_value_t = 20)]
        block_size: usize,

        /// Number of slots requested in one bulk acquire.
        #[arg(long, default_value_t = 41)]
        count: usize,
    },

    /// Build a sorted stack of pseudo-random values and print its summary.
    Dump {
        /// Number of values to insert.
        #[arg(long, default_value_t = 32)]
        count: usize,

        /// Maximum number of values to print.
        #[arg(short, long, default_value_t = 16)]
        max: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Stress {
            threads,
            iterations,
            block_size,
            batch,
        } => {
            let config = commands::load_config(cli.config.as_deref(), block_size)?;
            commands::stress::execute(&config, threads, iterations, batch)
        }
        Commands::Sizing { block_size, count } => {
            let config = commands::load_config(cli.config.as_deref(), block_size)?;
            commands::sizing::execute(&config, count)
        }
        Commands::Dump { count, max } => commands::dump::execute(count, max),
    }
}
