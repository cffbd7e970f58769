// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scope-owning wrappers that release their slots back to the pool.
//!
//! Both wrappers pair pooled contents with a reference to the pool that
//! provisioned them:
//! - [`UniqueNode`] holds at most one node.
//! - [`UniqueStack`] holds a whole [`Stack`].
//!
//! Dropping or [`reset`](UniqueNode::reset)ting a wrapper releases what it
//! holds exactly once. Merging consumes the source wrapper, and
//! `release()` hands the raw contents back to the caller without
//! releasing them. Default (poolless) wrappers hold nothing.

use crate::node::NodeHandle;
use crate::stack::{Iter, IterMut};
use crate::strategy::Strategy;
use crate::{SplicePool, Stack};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A single pooled slot, released to its pool on drop.
pub struct UniqueNode<'p, S: Strategy> {
    node: Option<NodeHandle<'p, S::Item>>,
    pool: Option<&'p SplicePool<S>>,
}

impl<'p, S: Strategy> UniqueNode<'p, S> {
    /// Takes ownership of `node` on behalf of `pool`.
    ///
    /// # Panics
    /// Panics if `node` was not provisioned by `pool`.
    pub fn new(node: NodeHandle<'p, S::Item>, pool: &'p SplicePool<S>) -> Self {
        pool.assert_owned(node.owner());
        Self {
            node: Some(node),
            pool: Some(pool),
        }
    }

    /// A poolless wrapper holding nothing.
    pub fn empty() -> Self {
        Self {
            node: None,
            pool: None,
        }
    }

    pub fn get(&self) -> Option<&S::Item> {
        self.node.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut S::Item> {
        self.node.as_deref_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The pool this wrapper releases into, if any.
    pub fn pool(&self) -> Option<&'p SplicePool<S>> {
        self.pool
    }

    /// Releases the held node to the pool and leaves the wrapper empty.
    /// Does nothing if already empty.
    pub fn reset(&mut self) {
        if let (Some(node), Some(pool)) = (self.node.take(), self.pool) {
            pool.release(node);
        }
    }

    /// Detaches the held node without releasing it. The caller becomes
    /// responsible for returning it to the pool.
    pub fn release(&mut self) -> Option<NodeHandle<'p, S::Item>> {
        self.node.take()
    }
}

impl<S: Strategy> Default for UniqueNode<'_, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Strategy> Deref for UniqueNode<'_, S> {
    type Target = S::Item;

    fn deref(&self) -> &S::Item {
        self.node.as_deref().expect("empty UniqueNode")
    }
}

impl<S: Strategy> DerefMut for UniqueNode<'_, S> {
    fn deref_mut(&mut self) -> &mut S::Item {
        self.node.as_deref_mut().expect("empty UniqueNode")
    }
}

impl<S: Strategy> Drop for UniqueNode<'_, S> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<S: Strategy> fmt::Debug for UniqueNode<'_, S>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueNode")
            .field("pool", &self.pool.map(SplicePool::id))
            .field("value", &self.get())
            .finish()
    }
}

/// A stack of pooled slots, released to its pool on drop.
pub struct UniqueStack<'p, S: Strategy> {
    stack: Stack<'p, S::Item>,
    pool: Option<&'p SplicePool<S>>,
}

impl<'p, S: Strategy> UniqueStack<'p, S> {
    /// An empty stack bound to `pool`.
    pub fn new(pool: &'p SplicePool<S>) -> Self {
        Self {
            stack: Stack::new(),
            pool: Some(pool),
        }
    }

    /// Takes ownership of `stack` on behalf of `pool`.
    ///
    /// # Panics
    /// Panics if any node was not provisioned by `pool`.
    pub fn from_stack(mut stack: Stack<'p, S::Item>, pool: &'p SplicePool<S>) -> Self {
        stack.for_each_node(|node| pool.assert_owned(node.owner()));
        Self {
            stack,
            pool: Some(pool),
        }
    }

    /// A poolless stack holding nothing. Binds to a pool on the first
    /// merge of a [`UniqueNode`] or [`UniqueStack`].
    pub fn empty() -> Self {
        Self {
            stack: Stack::new(),
            pool: None,
        }
    }

    fn adopt(&mut self, pool: &'p SplicePool<S>) {
        match self.pool {
            Some(own) => assert!(
                own.id() == pool.id(),
                "cannot merge contents of {} into a stack bound to {}",
                pool.id(),
                own.id()
            ),
            None => self.pool = Some(pool),
        }
    }

    fn bound_pool(&self) -> &'p SplicePool<S> {
        self.pool.expect("UniqueStack is not bound to a pool")
    }

    /// Pushes a raw node. O(1).
    ///
    /// # Panics
    /// Panics if the stack is poolless or `node` belongs to another pool.
    pub fn push(&mut self, node: NodeHandle<'p, S::Item>) {
        self.bound_pool().assert_owned(node.owner());
        self.stack.push(node);
    }

    /// Moves the node out of `node` onto the front. O(1).
    pub fn push_unique(&mut self, mut node: UniqueNode<'p, S>) {
        if let Some(pool) = node.pool() {
            self.adopt(pool);
        }
        if let Some(handle) = node.release() {
            self.stack.push(handle);
        }
    }

    /// Splices all of `other` onto the front. O(1).
    pub fn push_stack(&mut self, mut other: UniqueStack<'p, S>) {
        if let Some(pool) = other.pool {
            self.adopt(pool);
        }
        let mut nodes = other.release();
        self.stack.append(&mut nodes);
    }

    /// Moves the node out of `node` into its ordered position. O(len).
    pub fn push_sorted_by<F>(&mut self, mut node: UniqueNode<'p, S>, cmp: F)
    where
        F: FnMut(&S::Item, &S::Item) -> Ordering,
    {
        if let Some(pool) = node.pool() {
            self.adopt(pool);
        }
        if let Some(handle) = node.release() {
            self.stack.push_sorted_by(handle, cmp);
        }
    }

    /// Splits off the front `count` nodes into a new wrapper bound to the
    /// same pool.
    pub fn pop(&mut self, count: usize) -> UniqueStack<'p, S> {
        UniqueStack {
            stack: self.stack.pop_stack(count),
            pool: self.pool,
        }
    }

    /// Pops the front node into a [`UniqueNode`].
    pub fn pop_one(&mut self) -> Option<UniqueNode<'p, S>> {
        let node = self.stack.pop()?;
        Some(UniqueNode {
            node: Some(node),
            pool: self.pool,
        })
    }

    pub fn is_sorted_by<F>(&self, cmp: F) -> bool
    where
        F: FnMut(&S::Item, &S::Item) -> Ordering,
    {
        self.stack.is_sorted_by(cmp)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn peek(&self) -> Option<&S::Item> {
        self.stack.peek()
    }

    pub fn iter(&self) -> Iter<'_, S::Item> {
        self.stack.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, S::Item> {
        self.stack.iter_mut()
    }

    pub fn pool(&self) -> Option<&'p SplicePool<S>> {
        self.pool
    }

    /// Releases every held node to the pool. Does nothing if empty.
    pub fn reset(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        let stack = std::mem::take(&mut self.stack);
        self.bound_pool().release_stack(stack);
    }

    /// Detaches the held stack without releasing it.
    pub fn release(&mut self) -> Stack<'p, S::Item> {
        std::mem::take(&mut self.stack)
    }
}

impl<S: Strategy> UniqueStack<'_, S>
where
    S::Item: fmt::Debug,
{
    /// See [`Stack::summary`].
    pub fn summary(&self, max_elements: usize) -> String {
        self.stack.summary(max_elements)
    }
}

impl<S: Strategy> Default for UniqueStack<'_, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Strategy> Drop for UniqueStack<'_, S> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<S: Strategy> fmt::Debug for UniqueStack<'_, S>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueStack")
            .field("pool", &self.pool.map(SplicePool::id))
            .field("stack", &self.stack)
            .finish()
    }
}

impl<'a, S: Strategy> IntoIterator for &'a UniqueStack<'_, S> {
    type Item = &'a S::Item;
    type IntoIter = Iter<'a, S::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: Strategy> IntoIterator for &'a mut UniqueStack<'_, S> {
    type Item = &'a mut S::Item;
    type IntoIter = IterMut<'a, S::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
