// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Storage cells and the move-only handles that own them.
//!
//! A [`Node`] lives inside a block owned by a pool's storage strategy and
//! never moves for the lifetime of that pool. At any instant it belongs to
//! exactly one of: a free [`Stack`](crate::Stack), a caller holding a
//! [`NodeHandle`], or a [`UniqueNode`](crate::UniqueNode).
//!
//! Handles are not `Clone`, and releasing one consumes it, so a node cannot
//! be released twice. The owner tag stamped into every node lets a pool
//! reject nodes that were provisioned by a different pool.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a pool, stamped into every node it provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

impl PoolId {
    pub(crate) fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// A single storage cell: one value plus the intrusive free-list link.
///
/// `next` is only meaningful while the node is linked into a stack.
pub(crate) struct Node<T> {
    value: T,
    next: Option<NonNull<Node<T>>>,
    owner: PoolId,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, owner: PoolId) -> Self {
        Self {
            value,
            next: None,
            owner,
        }
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub(crate) fn owner(&self) -> PoolId {
        self.owner
    }

    pub(crate) fn next(&self) -> Option<NonNull<Node<T>>> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<NonNull<Node<T>>>) {
        self.next = next;
    }
}

// A node is only reachable through exactly one owner at a time; the raw
// link never aliases a live handle.
unsafe impl<T: Send> Send for Node<T> {}

/// Exclusive ownership of one pooled node.
///
/// Returned by [`SplicePool::acquire`](crate::SplicePool::acquire). The
/// lifetime ties the handle to the pool whose blocks hold the node, so the
/// storage cannot be freed while the handle exists. Dropping a handle
/// without releasing it leaks the slot until the pool itself is dropped;
/// return it with [`SplicePool::release`](crate::SplicePool::release) or
/// wrap it in a [`UniqueNode`](crate::UniqueNode).
pub struct NodeHandle<'p, T> {
    ptr: NonNull<Node<T>>,
    _pool: PhantomData<&'p mut T>,
}

impl<'p, T> NodeHandle<'p, T> {
    /// # Safety
    /// `ptr` must point to a live node that nothing else owns, and the
    /// node's storage must outlive `'p`.
    pub(crate) unsafe fn from_raw(ptr: NonNull<Node<T>>) -> Self {
        Self {
            ptr,
            _pool: PhantomData,
        }
    }

    pub(crate) fn into_raw(self) -> NonNull<Node<T>> {
        self.ptr
    }

    /// Re-binds the handle to a different lifetime.
    ///
    /// # Safety
    /// The node's storage must outlive `'q`.
    pub(crate) unsafe fn rebind<'q>(self) -> NodeHandle<'q, T> {
        NodeHandle::from_raw(self.ptr)
    }

    fn node(&self) -> &Node<T> {
        // SAFETY: the handle owns the node exclusively and the storage
        // outlives 'p.
        unsafe { self.ptr.as_ref() }
    }

    fn node_mut(&mut self) -> &mut Node<T> {
        // SAFETY: as above; `&mut self` guarantees uniqueness.
        unsafe { self.ptr.as_mut() }
    }

    /// Returns the id of the pool that provisioned this node.
    pub fn owner(&self) -> PoolId {
        self.node().owner()
    }

    /// Returns the address of the node's value. Stable for the lifetime of
    /// the pool, so it identifies the slot across acquire/release cycles.
    pub fn as_ptr(&self) -> *const T {
        self.node().value() as *const T
    }
}

impl<T> Deref for NodeHandle<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.node().value()
    }
}

impl<T> DerefMut for NodeHandle<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.node_mut().value_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("owner", &self.owner())
            .field("value", self.node().value())
            .finish()
    }
}

// NodeHandle behaves like `&'p mut T`.
unsafe impl<T: Send> Send for NodeHandle<'_, T> {}
unsafe impl<T: Sync> Sync for NodeHandle<'_, T> {}
