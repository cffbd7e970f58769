// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool statistics for profiling and tuning the block size.
//!
//! Counters are relaxed atomics bumped on the hot path; [`PoolStats`] is a
//! point-in-time snapshot and may be stale under concurrent traffic.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative statistics about pool usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolStats {
    /// Slots handed out (a bulk acquire of `n` counts `n`).
    pub acquisitions: u64,
    /// Slots returned to the free list.
    pub releases: u64,
    /// Number of times the pool grew.
    pub growth_events: u64,
    /// Blocks provisioned across all growth events.
    pub blocks_provisioned: u64,
    /// Times a thread lost the growth race and slept.
    pub backoffs: u64,
    /// Total slots ever provisioned at snapshot time.
    pub allocated: usize,
    /// Free-list length at snapshot time.
    pub available: usize,
}

impl PoolStats {
    /// Slots held outside the pool at snapshot time.
    pub fn outstanding(&self) -> usize {
        self.allocated.saturating_sub(self.available)
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Pool: {} allocated, {} available, {} outstanding; \
             {} acquisitions, {} releases, {} growth events ({} blocks), {} backoffs",
            self.allocated,
            self.available,
            self.outstanding(),
            self.acquisitions,
            self.releases,
            self.growth_events,
            self.blocks_provisioned,
            self.backoffs,
        )
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    acquisitions: AtomicU64,
    releases: AtomicU64,
    growth_events: AtomicU64,
    blocks_provisioned: AtomicU64,
    backoffs: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_acquire(&self, slots: usize) {
        self.acquisitions.fetch_add(slots as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_release(&self, slots: usize) {
        self.releases.fetch_add(slots as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_growth(&self, blocks: usize) {
        self.growth_events.fetch_add(1, Ordering::Relaxed);
        self.blocks_provisioned
            .fetch_add(blocks as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_backoff(&self) {
        self.backoffs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, allocated: usize, available: usize) -> PoolStats {
        PoolStats {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            growth_events: self.growth_events.load(Ordering::Relaxed),
            blocks_provisioned: self.blocks_provisioned.load(Ordering::Relaxed),
            backoffs: self.backoffs.load(Ordering::Relaxed),
            allocated,
            available,
        }
    }
}
