// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `splice sizing` command: bulk-growth policy comparison.
//!
//! Performs one bulk acquire of `--count` slots on a fresh pool under each
//! growth policy and reports how much was provisioned.

use splice_pool::{GrowthPolicy, ObjectPool, PoolConfig};

pub fn execute(config: &PoolConfig, count: usize) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           splice · Growth Policy Sizing             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!("  Block size:  {}", config.block_size);
    println!("  Request:     {count} slots");
    println!();

    println!(
        "  {:<12} {:>8} {:>10} {:>10} {:>8}",
        "Policy", "Blocks", "Allocated", "Available", "Spare %",
    );
    println!("  {}", "-".repeat(52));

    for policy in [GrowthPolicy::Headroom, GrowthPolicy::ExactFit] {
        let pool = ObjectPool::<u8>::from_config(&config.clone().with_growth_policy(policy))?;
        let stack = pool.acquire_stack(count)?;

        let allocated = pool.allocated();
        let available = pool.available();
        let spare = if allocated == 0 {
            0.0
        } else {
            available as f64 / allocated as f64 * 100.0
        };
        println!(
            "  {:<12} {:>8} {:>10} {:>10} {:>7.1}%",
            policy.name(),
            pool.blocks(),
            allocated,
            available,
            spare,
        );

        pool.release_stack(stack);
    }
    println!();

    Ok(())
}
