// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Non-blocking "at most one grower" guard.
//!
//! A [`GrowthGuard`] is won by a single compare-and-swap on a shared flag.
//! Losers do not wait on the flag: the pool has them back off and retry
//! the whole acquire. The winner clears the flag when the guard is dropped,
//! including on an early `?` return.

use std::sync::atomic::{AtomicBool, Ordering};

/// Scope guard held by the one thread currently growing a pool.
#[derive(Debug)]
pub(crate) struct GrowthGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> GrowthGuard<'a> {
    /// Attempts to claim `flag`. Returns `None` if another thread holds it.
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for GrowthGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
