// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # splice-pool
//!
//! A thread-safe, block-growing pool allocator for uniformly shaped values
//! and fixed-size buffers. Slots are reused through an intrusive free list
//! instead of returning to the global heap, and whole runs of slots move
//! between lists in O(1) by splicing.
//!
//! # Key Components
//!
//! - [`Stack`]: an intrusive LIFO of pooled nodes with O(1) push, pop and
//!   splice, plus split-off and ordered insertion.
//! - [`SplicePool`]: the engine. One mutex-protected free stack, an atomic
//!   allocation counter and a non-blocking growth guard. Aliased as
//!   [`ObjectPool`] and [`BufferPool`].
//! - [`Strategy`]: provisions blocks of slots. [`ObjectStrategy`] holds
//!   default-constructed `T` values; [`BufferStrategy`] holds fixed-length
//!   [`Buffer`]s that are zero-filled on release.
//! - [`UniqueNode`] / [`UniqueStack`]: RAII wrappers that release their
//!   contents back to the pool when dropped.
//! - [`PoolConfig`] / [`GrowthPolicy`]: TOML-loadable tuning.
//! - [`PoolStats`]: acquisition, release and growth counters.
//!
//! # Ownership Model
//!
//! ```text
//! SplicePool::acquire()            SplicePool::acquire_stack(n)
//!       │                                 │
//!       ▼                                 ▼
//!   NodeHandle<'p, T>                Stack<'p, T>
//!       │  UniqueNode::new                │  UniqueStack::from_stack
//!       ▼                                 ▼
//!   UniqueNode ──── push_unique ────► UniqueStack
//!       │                                 │
//!       │  drop() / reset()               │  drop() / reset()
//!       ▼                                 ▼
//!   SplicePool::release()          SplicePool::release_stack()  ──► free stack
//! ```
//!
//! Handles borrow the pool, so the borrow checker keeps every block alive
//! while any slot is checked out. Handles are move-only and releasing one
//! consumes it, so a slot cannot be released twice. Releasing into the
//! wrong pool panics.
//!
//! # Example
//! ```
//! use splice_pool::ObjectPool;
//!
//! let pool = ObjectPool::<u64>::new(20);
//!
//! // Bulk acquire from an empty pool provisions whole blocks.
//! let stack = pool.acquire_stack(41).unwrap();
//! assert_eq!(pool.allocated(), 60);
//! assert_eq!(pool.available(), 19);
//!
//! // Scoped slots go back on drop.
//! {
//!     let mut node = pool.acquire_one().unwrap();
//!     *node = 7;
//!     assert_eq!(pool.available(), 18);
//! }
//! assert_eq!(pool.available(), 19);
//!
//! pool.release_stack(stack);
//! assert_eq!(pool.available(), pool.allocated());
//! ```

mod config;
mod error;
mod guard;
mod node;
mod pool;
mod stack;
mod stats;
pub mod strategy;
mod unique;

pub use config::{GrowthPolicy, PoolConfig, DEFAULT_BACKOFF_MICROS, DEFAULT_BLOCK_SIZE};
pub use error::PoolError;
pub use node::{NodeHandle, PoolId};
pub use pool::{BufferPool, ObjectPool, SplicePool};
pub use stack::{Iter, IterMut, Stack};
pub use stats::PoolStats;
pub use strategy::{Buffer, BufferStrategy, ObjectStrategy, Strategy};
pub use unique::{UniqueNode, UniqueStack};
