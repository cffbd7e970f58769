// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Strategy`] trait and its two storage-provisioning implementations.
//!
//! | Strategy | Slot value | Reset on release |
//! |---|---|---|
//! | [`ObjectStrategy`] | one `T`, default-constructed | `T::default()` |
//! | [`BufferStrategy`] | a [`Buffer`] of `buffer_size` elements | fill with `E::default()` |
//!
//! The trait is sealed: pools are generic over it, but these two are the
//! only implementations. Strategies are created by the pool constructors
//! and never handed out, so the storage they own lives exactly as long as
//! the pool.

mod block;
pub mod buffer;
pub mod object;

pub use buffer::{Buffer, BufferStrategy};
pub use object::ObjectStrategy;

use crate::{PoolError, PoolId, Stack};

mod sealed {
    pub trait Sealed {}
}

/// Storage provisioning behind a [`SplicePool`](crate::SplicePool).
///
/// `provision` runs without the pool's free-list lock held, so several
/// threads may provision concurrently; implementations register new blocks
/// in a lock-free append-only list.
pub trait Strategy: sealed::Sealed + Send + Sync {
    /// The value held in each slot.
    type Item: Send + 'static;

    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Number of slots provisioned per block.
    fn block_size(&self) -> usize;

    /// Allocates `block_count` new blocks and pushes every freshly wired
    /// node (`block_count * block_size` of them), each stamped with `owner`,
    /// onto `out`.
    ///
    /// A request whose total size cannot be addressed fails with
    /// [`PoolError::CapacityOverflow`] before anything is allocated. A block
    /// is pushed onto `out` as soon as it is complete, so if a later block
    /// fails to allocate `out` still holds every block built before it; the
    /// caller must adopt those nodes.
    fn provision(
        &self,
        block_count: usize,
        owner: PoolId,
        out: &mut Stack<'static, Self::Item>,
    ) -> Result<(), PoolError>;

    /// Restores a released slot to its pristine state.
    fn reset(&self, item: &mut Self::Item);

    /// Number of blocks provisioned so far.
    fn blocks(&self) -> usize;
}
