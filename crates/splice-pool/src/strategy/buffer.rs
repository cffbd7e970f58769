// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-size buffer slots.
//!
//! Each block allocates one element array of `buffer_size * block_size`
//! elements plus a parallel node array. Every node's value is a [`Buffer`]
//! viewing its own evenly spaced `buffer_size`-element run of the array.
//! Buffers are never individually freed; release only zero-fills them.

use super::block::{check_capacity, try_boxed_slice, BlockList, RawSlice};
use super::{sealed, Strategy};
use crate::node::{Node, NodeHandle};
use crate::{PoolError, PoolId, Stack};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

/// A fixed-length run of elements inside a buffer pool block.
///
/// Dereferences to `[E]`. The view is only reachable through the node that
/// owns it, so mutable access is exclusive.
pub struct Buffer<E> {
    ptr: NonNull<E>,
    len: usize,
}

impl<E> Deref for Buffer<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        // SAFETY: `ptr..ptr+len` lies inside a live block and no other
        // buffer overlaps it.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<E> DerefMut for Buffer<E> {
    fn deref_mut(&mut self) -> &mut [E] {
        // SAFETY: as above, and `&mut self` is exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<E: fmt::Debug> fmt::Debug for Buffer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

unsafe impl<E: Send> Send for Buffer<E> {}
unsafe impl<E: Sync> Sync for Buffer<E> {}

struct BufferBlock<E> {
    // Field order matters: nodes point into `_data`.
    _nodes: RawSlice<Node<Buffer<E>>>,
    _data: RawSlice<E>,
}

/// Provisions blocks of fixed-size `E` buffers.
pub struct BufferStrategy<E> {
    buffer_size: usize,
    block_size: usize,
    blocks: BlockList<BufferBlock<E>>,
}

impl<E: Copy + Default + Send> BufferStrategy<E> {
    pub(crate) fn new(buffer_size: usize, block_size: usize) -> Self {
        Self {
            buffer_size,
            block_size,
            blocks: BlockList::new(),
        }
    }

    /// Number of elements in each buffer slot.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl<E> sealed::Sealed for BufferStrategy<E> {}

impl<E: Copy + Default + Send + 'static> Strategy for BufferStrategy<E> {
    type Item = Buffer<E>;

    fn name(&self) -> &str {
        "buffer"
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn provision(
        &self,
        block_count: usize,
        owner: PoolId,
        out: &mut Stack<'static, Buffer<E>>,
    ) -> Result<(), PoolError> {
        let overflow = || PoolError::CapacityOverflow {
            blocks: block_count,
            block_size: self.block_size,
        };
        let elements_per_block = self.buffer_size.checked_mul(self.block_size).ok_or_else(overflow)?;
        // Each slot costs its node plus its run of elements.
        let slot_bytes = self
            .buffer_size
            .checked_mul(mem::size_of::<E>())
            .and_then(|bytes| bytes.checked_add(mem::size_of::<Node<Buffer<E>>>()))
            .ok_or_else(overflow)?;
        check_capacity(block_count, self.block_size, slot_bytes)?;

        for _ in 0..block_count {
            let data = RawSlice::new(try_boxed_slice(elements_per_block, |_| E::default())?);
            let base = data.as_mut_ptr();
            let buffer_size = self.buffer_size;

            let nodes = RawSlice::new(try_boxed_slice(self.block_size, |i| {
                // SAFETY: `i * buffer_size + buffer_size <= elements_per_block`.
                let ptr = unsafe { NonNull::new_unchecked(base.add(i * buffer_size)) };
                Node::new(
                    Buffer {
                        ptr,
                        len: buffer_size,
                    },
                    owner,
                )
            })?);

            let node_base = nodes.as_mut_ptr();
            for i in 0..nodes.len() {
                // SAFETY: in bounds; the block lives as long as the strategy.
                let node = unsafe { NodeHandle::from_raw(NonNull::new_unchecked(node_base.add(i))) };
                out.push(node);
            }
            self.blocks.push(BufferBlock {
                _nodes: nodes,
                _data: data,
            });
        }
        Ok(())
    }

    fn reset(&self, item: &mut Buffer<E>) {
        item.fill(E::default());
    }

    fn blocks(&self) -> usize {
        self.blocks.len()
    }
}
