// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `splice stress` command: many threads cycling slots through one pool.
//!
//! Each thread acquires and releases single slots and, with `--batch`,
//! whole stacks. After all threads join the pool must be quiescent:
//! everything returned, and growth only in whole blocks.

use splice_pool::{ObjectPool, PoolConfig};
use std::time::Instant;

pub fn execute(
    config: &PoolConfig,
    threads: usize,
    iterations: usize,
    batch: usize,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           splice · Concurrency Stress               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    anyhow::ensure!(threads > 0, "--threads must be at least 1");

    println!("  Threads:     {threads}");
    println!("  Iterations:  {iterations} per thread");
    println!("  Block size:  {}", config.block_size);
    println!("  Batch:       {}", if batch > 0 { batch.to_string() } else { "off".into() });
    println!("  Policy:      {}", config.growth_policy.name());
    println!();

    let pool = ObjectPool::<u64>::from_config(config)?;
    tracing::info!(threads, iterations, batch, "Starting stress run");

    let start = Instant::now();
    std::thread::scope(|s| -> anyhow::Result<()> {
        let workers: Vec<_> = (0..threads)
            .map(|t| {
                let pool = &pool;
                s.spawn(move || worker(pool, t as u64, iterations, batch))
            })
            .collect();

        for handle in workers {
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("worker thread panicked"))??;
        }
        Ok(())
    })?;
    let elapsed = start.elapsed();

    let stats = pool.stats();
    let cycles = (threads * iterations) as f64;

    // ── Results ────────────────────────────────────────────────
    println!("  Elapsed:     {:.2} ms", elapsed.as_secs_f64() * 1000.0);
    println!(
        "  Throughput:  {:.0} cycles/s",
        cycles / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("  Blocks:      {}", pool.blocks());
    println!("  {}", stats.summary());
    println!();

    // ── Invariants ─────────────────────────────────────────────
    anyhow::ensure!(
        stats.allocated == stats.available,
        "pool not quiescent: {} allocated, {} available",
        stats.allocated,
        stats.available
    );
    anyhow::ensure!(
        stats.allocated % config.block_size == 0,
        "allocated {} is not a multiple of block size {}",
        stats.allocated,
        config.block_size
    );
    println!("  ✓ allocated == available");
    println!("  ✓ allocated is a whole number of blocks");
    println!();

    Ok(())
}

fn worker(pool: &ObjectPool<u64>, thread: u64, iterations: usize, batch: usize) -> anyhow::Result<()> {
    for i in 0..iterations as u64 {
        let value = thread << 32 | i;
        let node = pool.acquire_with(value)?;
        anyhow::ensure!(*node == value, "slot corrupted: {} != {value}", *node);
        pool.release(node);

        if batch > 0 && i % 8 == 0 {
            let mut stack = pool.acquire_stack(batch)?;
            for slot in stack.iter_mut() {
                *slot = value;
            }
            anyhow::ensure!(stack.len() == batch, "short bulk acquire");
            pool.release_stack(stack);
        }
    }
    Ok(())
}
