// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for pool provisioning and configuration.

/// Errors that can occur while growing or configuring a pool.
///
/// Misuse such as releasing a node into a pool that did not provision it is
/// not an error value: it panics, since continuing would corrupt the free
/// list.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Backing storage for a new block could not be allocated.
    #[error("out of memory: could not allocate {requested_slots} slots of {element_bytes} bytes")]
    OutOfMemory {
        requested_slots: usize,
        element_bytes: usize,
    },

    /// The requested growth does not fit in the address space.
    #[error("capacity overflow: {blocks} blocks of {block_size} slots")]
    CapacityOverflow { blocks: usize, block_size: usize },

    /// The pool configuration is invalid.
    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),
}
