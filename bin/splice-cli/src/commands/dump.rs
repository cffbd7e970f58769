// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `splice dump` command: ordered insertion and bounded summaries.

use splice_pool::{ObjectPool, UniqueStack};

pub fn execute(count: usize, max: usize) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           splice · Sorted Stack Dump                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let pool = ObjectPool::<u32>::new(count.clamp(1, 4096));
    let mut stack = UniqueStack::new(&pool);

    // xorshift32; fixed seed so runs are comparable.
    let mut state: u32 = 0x9E37_79B9;
    for _ in 0..count {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        stack.push_sorted_by(pool.acquire_one_with(state % 1000)?, u32::cmp);
    }

    anyhow::ensure!(stack.is_sorted_by(u32::cmp), "stack lost its ordering");

    println!("  Values:   {}", stack.len());
    println!("  Contents: {}", stack.summary(max));
    println!();

    drop(stack);
    println!("  {}", pool.stats().summary());
    println!();

    Ok(())
}
