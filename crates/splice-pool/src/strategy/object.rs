// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed-value slots.
//!
//! Each block is one contiguous array of `block_size` nodes whose values are
//! default-constructed up front. Releasing a slot drops its value and puts a
//! fresh `T::default()` in its place.

use super::block::{check_capacity, try_boxed_slice, BlockList, RawSlice};
use super::{sealed, Strategy};
use crate::node::{Node, NodeHandle};
use crate::{PoolError, PoolId, Stack};
use std::mem;
use std::ptr::NonNull;

/// Provisions blocks of `T` slots.
pub struct ObjectStrategy<T> {
    block_size: usize,
    blocks: BlockList<RawSlice<Node<T>>>,
}

impl<T: Default + Send> ObjectStrategy<T> {
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block_size,
            blocks: BlockList::new(),
        }
    }
}

impl<T> sealed::Sealed for ObjectStrategy<T> {}

impl<T: Default + Send + 'static> Strategy for ObjectStrategy<T> {
    type Item = T;

    fn name(&self) -> &str {
        "object"
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn provision(
        &self,
        block_count: usize,
        owner: PoolId,
        out: &mut Stack<'static, T>,
    ) -> Result<(), PoolError> {
        check_capacity(block_count, self.block_size, mem::size_of::<Node<T>>())?;

        for _ in 0..block_count {
            let block = RawSlice::new(try_boxed_slice(self.block_size, |_| {
                Node::new(T::default(), owner)
            })?);

            let base = block.as_mut_ptr();
            for i in 0..block.len() {
                // SAFETY: `i` is in bounds and the block is kept alive by
                // `self.blocks` for as long as the strategy exists.
                let node = unsafe { NodeHandle::from_raw(NonNull::new_unchecked(base.add(i))) };
                out.push(node);
            }
            self.blocks.push(block);
        }
        Ok(())
    }

    fn reset(&self, item: &mut T) {
        *item = T::default();
    }

    fn blocks(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provision<T: Default + Send + 'static>(
        strategy: &ObjectStrategy<T>,
        blocks: usize,
        owner: PoolId,
    ) -> Stack<'static, T> {
        let mut stack = Stack::new();
        strategy.provision(blocks, owner, &mut stack).unwrap();
        stack
    }

    #[test]
    fn test_provision_wires_every_slot() {
        let strategy = ObjectStrategy::<u32>::new(8);
        let owner = PoolId::next();

        let stack = provision(&strategy, 3, owner);
        assert_eq!(stack.len(), 24);
        assert_eq!(strategy.blocks(), 3);
        assert!(stack.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_provision_appends_to_existing_stack() {
        let strategy = ObjectStrategy::<u32>::new(4);
        let owner = PoolId::next();

        let mut stack = provision(&strategy, 1, owner);
        strategy.provision(2, owner, &mut stack).unwrap();
        assert_eq!(stack.len(), 12);
        assert_eq!(strategy.blocks(), 3);
    }

    #[test]
    fn test_provision_stamps_owner() {
        let strategy = ObjectStrategy::<u32>::new(4);
        let owner = PoolId::next();

        let mut stack = provision(&strategy, 1, owner);
        while let Some(node) = stack.pop() {
            assert_eq!(node.owner(), owner);
        }
    }

    #[test]
    fn test_provision_zero_blocks() {
        let strategy = ObjectStrategy::<u32>::new(4);
        let stack = provision(&strategy, 0, PoolId::next());
        assert!(stack.is_empty());
        assert_eq!(strategy.blocks(), 0);
    }

    #[test]
    fn test_provision_overflow() {
        let strategy = ObjectStrategy::<u8>::new(usize::MAX / 2);
        let mut stack = Stack::new();
        let result = strategy.provision(4, PoolId::next(), &mut stack);
        assert!(matches!(result, Err(PoolError::CapacityOverflow { .. })));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_provision_rejects_unaddressable_bytes() {
        // 2^62 - 1 blocks of 4 slots: the slot count fits a usize, the bytes
        // do not. Must fail before building a single block.
        let strategy = ObjectStrategy::<u8>::new(4);
        let mut stack = Stack::new();
        let result = strategy.provision(usize::MAX / 4, PoolId::next(), &mut stack);

        assert!(matches!(
            result,
            Err(PoolError::CapacityOverflow { block_size: 4, .. })
        ));
        assert!(stack.is_empty());
        assert_eq!(strategy.blocks(), 0);
    }

    #[test]
    fn test_reset_restores_default() {
        let strategy = ObjectStrategy::<String>::new(1);
        let mut value = String::from("dirty");
        strategy.reset(&mut value);
        assert!(value.is_empty());
    }

    #[test]
    fn test_slots_are_contiguous() {
        let strategy = ObjectStrategy::<u64>::new(4);
        let stack = provision(&strategy, 1, PoolId::next());

        let mut addrs: Vec<usize> = stack.iter().map(|v| v as *const u64 as usize).collect();
        addrs.sort_unstable();
        let stride = addrs[1] - addrs[0];
        assert!(addrs.windows(2).all(|w| w[1] - w[0] == stride));
    }
}
