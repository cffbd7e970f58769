// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The pool engine: a mutex-protected free stack that grows in blocks.
//!
//! # Locking
//! The free-stack mutex is the only lock. It is held for pops, pushes,
//! splices and length queries, never while a strategy provisions storage.
//!
//! # Growth
//! - **Single-node path** ([`SplicePool::acquire`]): when the free stack is
//!   empty, one thread wins the growth guard and provisions exactly one
//!   block. Losers back off and retry the acquire.
//! - **Bulk path** ([`SplicePool::acquire_stack`]): takes the whole free
//!   stack, provisions [`GrowthPolicy::blocks_for`] blocks for the
//!   shortfall without the guard, and returns the surplus to the free stack.
//!
//! At quiescence `allocated == available + outstanding`; mid-flight the
//! counter may run ahead of the free stack.

use crate::config::{GrowthPolicy, PoolConfig};
use crate::guard::GrowthGuard;
use crate::node::{NodeHandle, PoolId};
use crate::stats::{PoolStats, StatsCounters};
use crate::strategy::{BufferStrategy, ObjectStrategy, Strategy};
use crate::unique::{UniqueNode, UniqueStack};
use crate::{PoolError, Stack};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A thread-safe, block-growing pool of reusable slots.
///
/// Share it by reference (`&pool`, `Arc<pool>` or a scoped thread borrow).
/// Every handle it returns borrows the pool, so the pool cannot be dropped
/// while any slot is checked out.
pub struct SplicePool<S: Strategy> {
    id: PoolId,
    strategy: S,
    free: Mutex<Stack<'static, S::Item>>,
    allocated: AtomicUsize,
    growing: AtomicBool,
    policy: GrowthPolicy,
    backoff: Duration,
    counters: StatsCounters,
}

/// A pool of default-constructed `T` values.
pub type ObjectPool<T> = SplicePool<ObjectStrategy<T>>;

/// A pool of fixed-size `[E]` buffers.
pub type BufferPool<E> = SplicePool<BufferStrategy<E>>;

impl<T: Default + Send + 'static> SplicePool<ObjectStrategy<T>> {
    /// Creates an empty pool that grows `block_size` slots at a time.
    ///
    /// # Panics
    /// Panics if `block_size` is zero.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be greater than zero");
        let config = PoolConfig::default().with_block_size(block_size);
        Self::with_strategy(ObjectStrategy::new(block_size), &config)
    }

    /// Creates an empty pool from a validated configuration.
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::with_strategy(
            ObjectStrategy::new(config.block_size),
            config,
        ))
    }

    /// Acquires a slot and moves `value` into it.
    pub fn acquire_with(&self, value: T) -> Result<NodeHandle<'_, T>, PoolError> {
        let mut node = self.acquire()?;
        *node = value;
        Ok(node)
    }

    /// Like [`acquire_with`](Self::acquire_with), wrapped so the slot is
    /// released when the wrapper is dropped.
    pub fn acquire_one_with(
        &self,
        value: T,
    ) -> Result<UniqueNode<'_, ObjectStrategy<T>>, PoolError> {
        let node = self.acquire_with(value)?;
        Ok(UniqueNode::new(node, self))
    }
}

impl<E: Copy + Default + Send + 'static> SplicePool<BufferStrategy<E>> {
    /// Creates an empty pool of `buffer_size`-element buffers that grows
    /// `block_size` buffers at a time.
    ///
    /// # Panics
    /// Panics if either size is zero.
    pub fn new(buffer_size: usize, block_size: usize) -> Self {
        assert!(buffer_size > 0, "buffer_size must be greater than zero");
        assert!(block_size > 0, "block_size must be greater than zero");
        let config = PoolConfig::default().with_block_size(block_size);
        Self::with_strategy(BufferStrategy::new(buffer_size, block_size), &config)
    }

    /// Creates an empty pool from a validated configuration. `buffer_size`
    /// must be set.
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let buffer_size = config.buffer_size.ok_or_else(|| {
            PoolError::InvalidConfig("buffer pools require buffer_size".into())
        })?;
        Ok(Self::with_strategy(
            BufferStrategy::new(buffer_size, config.block_size),
            config,
        ))
    }

    /// Number of elements in each buffer.
    pub fn buffer_size(&self) -> usize {
        self.strategy.buffer_size()
    }
}

impl<S: Strategy> SplicePool<S> {
    pub(crate) fn with_strategy(strategy: S, config: &PoolConfig) -> Self {
        Self {
            id: PoolId::next(),
            strategy,
            free: Mutex::new(Stack::new()),
            allocated: AtomicUsize::new(0),
            growing: AtomicBool::new(false),
            policy: config.growth_policy,
            backoff: config.backoff(),
            counters: StatsCounters::default(),
        }
    }

    // Every update to the free stack completes before the guard drops, so
    // a poisoned lock still protects a consistent stack.
    fn lock_free(&self) -> MutexGuard<'_, Stack<'static, S::Item>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires one slot, growing the pool by a block if none is free.
    ///
    /// The slot holds a pristine value: `T::default()` for object pools, a
    /// zero-filled buffer for buffer pools.
    pub fn acquire(&self) -> Result<NodeHandle<'_, S::Item>, PoolError> {
        loop {
            let popped = self.lock_free().pop();
            if let Some(node) = popped {
                self.counters.record_acquire(1);
                // SAFETY: the node's block is owned by `self.strategy`.
                return Ok(unsafe { node.rebind() });
            }
            self.grow()?;
        }
    }

    /// Acquires exactly `count` slots as one stack.
    ///
    /// If the free stack is short, all of it is taken and the shortfall is
    /// provisioned in one step according to the pool's [`GrowthPolicy`].
    ///
    /// # Errors
    /// [`PoolError::CapacityOverflow`] if the growth cannot be addressed, or
    /// [`PoolError::OutOfMemory`] if a block fails to allocate. Either way
    /// the taken slots, and any blocks completed before the failure, end up
    /// on the free stack.
    pub fn acquire_stack(&self, count: usize) -> Result<Stack<'_, S::Item>, PoolError> {
        let mut taken = {
            let mut free = self.lock_free();
            if free.len() >= count {
                let stack = free.pop_stack(count);
                drop(free);
                self.counters.record_acquire(count);
                // SAFETY: the nodes' blocks are owned by `self.strategy`.
                return Ok(unsafe { stack.rebind() });
            }
            std::mem::take(&mut *free)
        };

        let block_size = self.strategy.block_size();
        let deficit = count - taken.len();
        let mut fresh = Stack::new();
        let provisioned = match self.policy.blocks_for(deficit, block_size) {
            Some(blocks) => self.strategy.provision(blocks, self.id, &mut fresh),
            None => Err(PoolError::CapacityOverflow {
                blocks: usize::MAX,
                block_size,
            }),
        };
        self.adopt_fresh(&fresh, "bulk");

        if let Err(e) = provisioned {
            tracing::debug!(pool = %self.id, count, error = %e, "Bulk acquire failed");
            let mut free = self.lock_free();
            free.append(&mut taken);
            free.append(&mut fresh);
            return Err(e);
        }

        let mut needed = fresh.pop_stack(deficit);
        taken.append(&mut needed);
        if !fresh.is_empty() {
            self.lock_free().append(&mut fresh);
        }

        self.counters.record_acquire(count);
        // SAFETY: as above.
        Ok(unsafe { taken.rebind() })
    }

    /// Acquires one slot wrapped in a [`UniqueNode`].
    pub fn acquire_one(&self) -> Result<UniqueNode<'_, S>, PoolError> {
        let node = self.acquire()?;
        Ok(UniqueNode::new(node, self))
    }

    /// Acquires `count` slots wrapped in a [`UniqueStack`].
    pub fn acquire_unique(&self, count: usize) -> Result<UniqueStack<'_, S>, PoolError> {
        let stack = self.acquire_stack(count)?;
        Ok(UniqueStack::from_stack(stack, self))
    }

    /// Resets the slot's value and returns it to the free stack.
    ///
    /// # Panics
    /// Panics if the node was provisioned by a different pool.
    pub fn release(&self, node: NodeHandle<'_, S::Item>) {
        self.assert_owned(node.owner());
        // SAFETY: the node belongs to this pool, whose storage outlives the
        // free stack.
        let mut node = unsafe { node.rebind::<'static>() };
        self.strategy.reset(&mut node);
        self.lock_free().push(node);
        self.counters.record_release(1);
    }

    /// Resets every value in `stack` and splices it into the free stack.
    ///
    /// # Panics
    /// Panics if any node was provisioned by a different pool.
    pub fn release_stack(&self, mut stack: Stack<'_, S::Item>) {
        if stack.is_empty() {
            return;
        }
        stack.for_each_node(|node| {
            self.assert_owned(node.owner());
            self.strategy.reset(node.value_mut());
        });

        let count = stack.len();
        // SAFETY: every node was just checked to belong to this pool.
        let mut stack = unsafe { stack.rebind::<'static>() };
        self.lock_free().append(&mut stack);
        self.counters.record_release(count);
    }

    /// Releases a [`UniqueNode`]'s slot now instead of at scope end.
    ///
    /// Equivalent to [`UniqueNode::reset`], but checks the slot against this
    /// pool. An empty wrapper is a no-op.
    ///
    /// # Panics
    /// Panics if the slot was provisioned by a different pool.
    pub fn release_unique_node(&self, mut node: UniqueNode<'_, S>) {
        if let Some(node) = node.release() {
            self.release(node);
        }
    }

    /// Releases every slot held by a [`UniqueStack`] now instead of at scope
    /// end.
    ///
    /// # Panics
    /// Panics if any slot was provisioned by a different pool.
    pub fn release_unique(&self, mut stack: UniqueStack<'_, S>) {
        self.release_stack(stack.release());
    }

    /// Provisions one block, unless another thread is already growing the
    /// pool, in which case this backs off and returns so the caller retries.
    fn grow(&self) -> Result<(), PoolError> {
        let Some(_guard) = GrowthGuard::try_acquire(&self.growing) else {
            self.counters.record_backoff();
            tracing::trace!(
                pool = %self.id,
                backoff = ?self.backoff,
                "Growth in progress, backing off"
            );
            if self.backoff.is_zero() {
                std::thread::yield_now();
            } else {
                std::thread::sleep(self.backoff);
            }
            return Ok(());
        };

        let mut fresh = Stack::new();
        let provisioned = self.strategy.provision(1, self.id, &mut fresh);
        self.adopt_fresh(&fresh, "single");
        self.lock_free().append(&mut fresh);
        provisioned
    }

    /// Counts freshly provisioned nodes as allocated. Called on failure too,
    /// so blocks completed before an allocation error are not lost.
    fn adopt_fresh(&self, fresh: &Stack<'static, S::Item>, path: &'static str) {
        if fresh.is_empty() {
            return;
        }
        let slots = fresh.len();
        let blocks = slots / self.strategy.block_size();
        let total = self.allocated.fetch_add(slots, Ordering::AcqRel) + slots;
        self.counters.record_growth(blocks);
        tracing::debug!(
            pool = %self.id,
            path,
            policy = self.policy.name(),
            blocks,
            slots,
            allocated = total,
            "Pool grown"
        );
    }

    pub(crate) fn assert_owned(&self, owner: PoolId) {
        assert!(
            owner == self.id,
            "node provisioned by {owner} released into {}",
            self.id
        );
    }

    /// Total slots ever provisioned. Never decreases.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Slots currently on the free stack. A snapshot; may be stale as soon
    /// as it returns.
    pub fn available(&self) -> usize {
        self.lock_free().len()
    }

    pub fn block_size(&self) -> usize {
        self.strategy.block_size()
    }

    /// Number of blocks provisioned so far.
    pub fn blocks(&self) -> usize {
        self.strategy.blocks()
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Name of the storage strategy (`"object"` or `"buffer"`).
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Returns a snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.allocated(), self.available())
    }
}

impl<S: Strategy> fmt::Debug for SplicePool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplicePool")
            .field("id", &self.id)
            .field("strategy", &self.strategy.name())
            .field("block_size", &self.block_size())
            .field("policy", &self.policy)
            .field("allocated", &self.allocated())
            .field("available", &self.available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact_fit(block_size: usize) -> PoolConfig {
        PoolConfig::default()
            .with_block_size(block_size)
            .with_growth_policy(GrowthPolicy::ExactFit)
    }

    #[test]
    fn test_new_pool_is_empty() {
        let pool = ObjectPool::<u32>::new(16);
        assert_eq!(pool.allocated(), 0);
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.blocks(), 0);
        assert_eq!(pool.block_size(), 16);
        assert_eq!(pool.policy(), GrowthPolicy::Headroom);
        assert_eq!(pool.strategy_name(), "object");
    }

    #[test]
    #[should_panic(expected = "block_size must be greater than zero")]
    fn test_zero_block_size_panics() {
        let _ = ObjectPool::<u32>::new(0);
    }

    #[test]
    fn test_acquire_grows_one_block() {
        let pool = ObjectPool::<u32>::new(4);

        let node = pool.acquire().unwrap();
        assert_eq!(*node, 0);
        assert_eq!(pool.allocated(), 4);
        assert_eq!(pool.available(), 3);
        assert_eq!(pool.blocks(), 1);

        pool.release(node);
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn test_acquire_grows_again_when_drained() {
        let pool = ObjectPool::<u32>::new(2);
        let nodes: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();
        assert_eq!(pool.allocated(), 6);
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.blocks(), 3);

        for node in nodes {
            pool.release(node);
        }
        assert_eq!(pool.available(), pool.allocated());
    }

    #[test]
    fn test_release_resets_and_reuses_slot() {
        let pool = ObjectPool::<String>::new(4);

        let node = pool.acquire_with("dirty".to_string()).unwrap();
        assert_eq!(node.as_str(), "dirty");
        let addr = node.as_ptr();
        pool.release(node);

        // LIFO: the slot just released comes straight back.
        let node = pool.acquire().unwrap();
        assert_eq!(node.as_ptr(), addr);
        assert!(node.is_empty());
        pool.release(node);
    }

    #[test]
    fn test_bulk_scenario_headroom() {
        let pool = ObjectPool::<i32>::new(20);

        let stack = pool.acquire_stack(41).unwrap();
        assert_eq!(stack.len(), 41);
        assert_eq!(pool.allocated(), 60);
        assert_eq!(pool.available(), pool.allocated() - 41);

        pool.release_stack(stack);
        assert_eq!(pool.available(), pool.allocated());
    }

    #[test]
    fn test_bulk_scenario_exact_fit() {
        let pool = ObjectPool::<i32>::from_config(&exact_fit(20)).unwrap();

        let stack = pool.acquire_stack(41).unwrap();
        assert_eq!(pool.allocated(), 60);
        assert_eq!(pool.available(), 19);
        pool.release_stack(stack);
        assert_eq!(pool.available(), 60);
    }

    #[test]
    fn test_bulk_exact_multiple_bounds() {
        let headroom = ObjectPool::<i32>::new(20);
        let stack = headroom.acquire_stack(40).unwrap();
        assert_eq!(headroom.allocated(), 60);
        assert_eq!(headroom.available(), 20);
        headroom.release_stack(stack);

        let exact = ObjectPool::<i32>::from_config(&exact_fit(20)).unwrap();
        let stack = exact.acquire_stack(40).unwrap();
        assert_eq!(exact.allocated(), 40);
        assert_eq!(exact.available(), 0);
        exact.release_stack(stack);
    }

    #[test]
    fn test_bulk_from_populated_pool() {
        let pool = ObjectPool::<i32>::new(20);
        let node = pool.acquire().unwrap();
        pool.release(node);
        assert_eq!(pool.available(), 20);

        let stack = pool.acquire_stack(19).unwrap();
        assert_eq!(stack.len(), 19);
        assert_eq!(pool.allocated(), 20);
        assert_eq!(pool.available(), 1);
        pool.release_stack(stack);
    }

    #[test]
    fn test_bulk_takes_partial_free_stack() {
        let pool = ObjectPool::<i32>::new(20);
        let node = pool.acquire().unwrap();
        assert_eq!(pool.available(), 19);

        // 19 taken, deficit 6, one block added.
        let stack = pool.acquire_stack(25).unwrap();
        assert_eq!(stack.len(), 25);
        assert_eq!(pool.allocated(), 40);
        assert_eq!(pool.available(), 14);

        pool.release_stack(stack);
        pool.release(node);
        assert_eq!(pool.available(), 40);
    }

    #[test]
    fn test_bulk_zero_count() {
        let pool = ObjectPool::<i32>::new(8);
        let stack = pool.acquire_stack(0).unwrap();
        assert!(stack.is_empty());
        assert_eq!(pool.allocated(), 0);
        pool.release_stack(stack);
    }

    #[test]
    fn test_bulk_block_count_overflow() {
        let pool = ObjectPool::<u8>::new(1);

        let result = pool.acquire_stack(usize::MAX);
        assert!(matches!(result, Err(PoolError::CapacityOverflow { .. })));
        assert_eq!(pool.allocated(), 0);
        assert_eq!(pool.blocks(), 0);
    }

    #[test]
    fn test_bulk_overflow_restores_free_stack() {
        let pool = ObjectPool::<u8>::new(4);
        let node = pool.acquire().unwrap();
        pool.release(node);
        assert_eq!(pool.available(), 4);

        // Fits as a slot count, not as bytes.
        let result = pool.acquire_stack(usize::MAX - 1);
        assert!(matches!(result, Err(PoolError::CapacityOverflow { .. })));
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.allocated(), pool.available());
        assert_eq!(pool.blocks(), 1);

        // The pool is still usable afterwards.
        let stack = pool.acquire_stack(6).unwrap();
        assert_eq!(stack.len(), 6);
        pool.release_stack(stack);
        assert_eq!(pool.allocated(), pool.available());
    }

    #[test]
    fn test_bulk_overflow_with_one_slot_blocks() {
        let pool = ObjectPool::<u8>::new(1);
        let node = pool.acquire().unwrap();
        pool.release(node);

        let result = pool.acquire_stack(usize::MAX);
        assert!(matches!(result, Err(PoolError::CapacityOverflow { .. })));
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_release_unique_node() {
        let pool = ObjectPool::<i32>::new(4);
        let mut node = pool.acquire_one_with(7).unwrap();
        *node += 1;
        assert_eq!(pool.available(), 3);

        pool.release_unique_node(node);
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.stats().releases, 1);

        let node = pool.acquire().unwrap();
        assert_eq!(*node, 0);
        pool.release(node);

        pool.release_unique_node(UniqueNode::empty());
        assert_eq!(pool.stats().releases, 2);
    }

    #[test]
    fn test_release_unique_stack() {
        let pool = ObjectPool::<i32>::new(8);
        let stack = pool.acquire_unique(5).unwrap();
        assert_eq!(pool.available(), 3);

        pool.release_unique(stack);
        assert_eq!(pool.available(), 8);
        assert_eq!(pool.stats().outstanding(), 0);
    }

    #[test]
    #[should_panic(expected = "released into")]
    fn test_release_unique_into_wrong_pool_panics() {
        let a = ObjectPool::<i32>::new(4);
        let b = ObjectPool::<i32>::new(4);
        let stack = a.acquire_unique(2).unwrap();
        b.release_unique(stack);
    }

    #[test]
    fn test_release_stack_resets_values() {
        let pool = ObjectPool::<i32>::new(4);
        let mut stack = pool.acquire_stack(4).unwrap();
        for v in stack.iter_mut() {
            *v = 42;
        }
        pool.release_stack(stack);

        let stack = pool.acquire_stack(4).unwrap();
        assert!(stack.iter().all(|&v| v == 0));
        pool.release_stack(stack);
    }

    #[test]
    #[should_panic(expected = "released into")]
    fn test_release_into_wrong_pool_panics() {
        let a = ObjectPool::<i32>::new(4);
        let b = ObjectPool::<i32>::new(4);
        let node = a.acquire().unwrap();
        b.release(node);
    }

    #[test]
    #[should_panic(expected = "released into")]
    fn test_release_stack_into_wrong_pool_panics() {
        let a = ObjectPool::<i32>::new(4);
        let b = ObjectPool::<i32>::new(4);
        let stack = a.acquire_stack(3).unwrap();
        b.release_stack(stack);
    }

    #[test]
    fn test_lost_growth_race_backs_off() {
        let config = PoolConfig {
            backoff_micros: 0,
            ..PoolConfig::default().with_block_size(4)
        };
        let pool = ObjectPool::<i32>::from_config(&config).unwrap();

        pool.growing.store(true, Ordering::Release);
        pool.grow().unwrap();
        assert_eq!(pool.allocated(), 0);
        assert_eq!(pool.stats().backoffs, 1);

        pool.growing.store(false, Ordering::Release);
        pool.grow().unwrap();
        assert_eq!(pool.allocated(), 4);
        assert!(!pool.growing.load(Ordering::Acquire));
    }

    #[test]
    fn test_buffer_pool() {
        let pool = BufferPool::<u8>::new(64, 4);
        assert_eq!(pool.buffer_size(), 64);
        assert_eq!(pool.strategy_name(), "buffer");

        let mut buf = pool.acquire().unwrap();
        assert_eq!(buf.len(), 64);
        buf[..5].copy_from_slice(b"hello");
        let addr = buf.as_ptr();
        pool.release(buf);

        let buf = pool.acquire().unwrap();
        assert_eq!(buf.as_ptr(), addr);
        assert!(buf.iter().all(|&b| b == 0));
        pool.release(buf);
    }

    #[test]
    fn test_buffer_pool_from_config() {
        let missing = PoolConfig::default().with_block_size(8);
        let result = BufferPool::<u8>::from_config(&missing);
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));

        let config = PoolConfig {
            buffer_size: Some(32),
            ..missing
        };
        let pool = BufferPool::<u8>::from_config(&config).unwrap();
        let stack = pool.acquire_stack(9).unwrap();
        assert_eq!(pool.allocated(), 16);
        assert!(stack.iter().all(|b| b.len() == 32));
        pool.release_stack(stack);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = PoolConfig::default().with_block_size(0);
        assert!(ObjectPool::<i32>::from_config(&config).is_err());
    }

    #[test]
    fn test_stats() {
        let pool = ObjectPool::<i32>::new(20);
        let node = pool.acquire().unwrap();
        let stack = pool.acquire_stack(30).unwrap();
        pool.release(node);
        pool.release_stack(stack);

        let stats = pool.stats();
        assert_eq!(stats.acquisitions, 31);
        assert_eq!(stats.releases, 31);
        assert_eq!(stats.growth_events, 2);
        assert_eq!(stats.blocks_provisioned, 2);
        assert_eq!(stats.allocated, 40);
        assert_eq!(stats.available, 40);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_debug() {
        let pool = ObjectPool::<i32>::new(8);
        let debug = format!("{pool:?}");
        assert!(debug.contains("SplicePool"));
        assert!(debug.contains("block_size: 8"));
        assert!(debug.contains("allocated: 0"));
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = ObjectPool::<u64>::new(16);

        std::thread::scope(|s| {
            for t in 0..8u64 {
                let pool = &pool;
                s.spawn(move || {
                    for i in 0..1000 {
                        let node = pool.acquire_with(t * 1000 + i).unwrap();
                        assert_eq!(*node, t * 1000 + i);
                        pool.release(node);
                    }
                });
            }
        });

        assert_eq!(pool.allocated(), pool.available());
        assert_eq!(pool.allocated() % 16, 0);
        assert!(pool.allocated() >= 16);
    }
}
