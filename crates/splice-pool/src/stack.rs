// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Intrusive singly-linked LIFO stack of pooled nodes.
//!
//! [`Stack`] tracks both ends of its list, which is what makes the pool's
//! bulk operations cheap:
//!
//! | Operation | Cost |
//! |---|---|
//! | [`push`](Stack::push) / [`pop`](Stack::pop) | O(1) |
//! | [`append`](Stack::append) (splice a whole stack) | O(1) |
//! | [`pop_stack`](Stack::pop_stack) of everything | O(1) |
//! | [`pop_stack`](Stack::pop_stack) of a front run of `n` | O(n) |
//! | [`push_sorted_by`](Stack::push_sorted_by) | O(n) |
//!
//! # Invariants
//! - `len == 0` iff `head` is `None` iff `tail` is `None`.
//! - Following `next` from `head` reaches `tail` in exactly `len - 1` steps.
//! - The list has no cycles; `tail.next` is always `None`.

use crate::node::{Node, NodeHandle};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An owning, intrusive LIFO collection of pooled nodes.
///
/// A stack owns every node linked into it. Ownership moves wholesale when
/// stacks are spliced together or split apart. Dropping a non-empty stack
/// leaks its slots until the owning pool is dropped; hand it back with
/// [`SplicePool::release_stack`](crate::SplicePool::release_stack) or keep
/// it in a [`UniqueStack`](crate::UniqueStack).
pub struct Stack<'p, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _pool: PhantomData<NodeHandle<'p, T>>,
}

impl<'p, T> Stack<'p, T> {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _pool: PhantomData,
        }
    }

    /// Number of nodes in the stack.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the stack holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a single node onto the front. O(1).
    pub fn push(&mut self, node: NodeHandle<'p, T>) {
        self.push_raw(node.into_raw());
    }

    fn push_raw(&mut self, mut ptr: NonNull<Node<T>>) {
        debug_assert!(self.tail.is_none() || self.len > 0);

        // SAFETY: the caller transferred exclusive ownership of the node.
        unsafe { ptr.as_mut().set_next(self.head) };
        self.head = Some(ptr);

        if self.tail.is_none() {
            self.tail = Some(ptr);
        }
        self.len += 1;
    }

    /// Splices every node of `other` onto the front of this stack in O(1),
    /// leaving `other` empty.
    ///
    /// Popping afterwards yields `other`'s nodes in their original order,
    /// followed by this stack's original nodes.
    pub fn append(&mut self, other: &mut Stack<'p, T>) {
        let (Some(other_head), Some(mut other_tail)) = (other.head, other.tail) else {
            return;
        };

        // SAFETY: `other` owns its tail exclusively; we now take it over.
        unsafe { other_tail.as_mut().set_next(self.head) };
        self.head = Some(other_head);

        if self.tail.is_none() {
            self.tail = Some(other_tail);
        }
        self.len += other.len;
        other.clear();
    }

    /// Pops the front node, or `None` if the stack is empty. O(1).
    pub fn pop(&mut self) -> Option<NodeHandle<'p, T>> {
        let mut ptr = self.head?;

        // SAFETY: `ptr` is linked into this stack, which owns it.
        unsafe {
            self.head = ptr.as_ref().next();
            ptr.as_mut().set_next(None);
        }

        self.len -= 1;
        if self.len == 0 {
            self.tail = None;
        }

        // SAFETY: the node has been unlinked; ownership moves to the handle.
        Some(unsafe { NodeHandle::from_raw(ptr) })
    }

    /// Splits off the front `count` nodes into a new stack.
    ///
    /// - `count >= len`: the whole stack moves out in O(1); `self` is left empty.
    /// - `0 < count < len`: walks `count - 1` links, O(count).
    /// - `count == 0`: returns an empty stack and leaves `self` untouched.
    pub fn pop_stack(&mut self, count: usize) -> Stack<'p, T> {
        if count >= self.len {
            return std::mem::take(self);
        }
        let Some(head) = self.head else {
            return Stack::new();
        };
        if count == 0 {
            return Stack::new();
        }

        let mut split = head;
        for _ in 1..count {
            // SAFETY: `split` is one of the first `count` < `len` nodes.
            match unsafe { split.as_ref().next() } {
                Some(next) => split = next,
                None => unreachable!("stack shorter than its recorded length"),
            }
        }

        // SAFETY: `split` is owned by this stack and has a successor.
        unsafe {
            self.head = split.as_ref().next();
            split.as_mut().set_next(None);
        }
        self.len -= count;

        Stack {
            head: Some(head),
            tail: Some(split),
            len: count,
            _pool: PhantomData,
        }
    }

    /// Inserts `node` at its ordered position under `cmp`, scanning from the
    /// front. O(len).
    ///
    /// The node is placed before the first element that compares
    /// [`Ordering::Greater`] than it, so equal keys keep insertion order.
    pub fn push_sorted_by<F>(&mut self, node: NodeHandle<'p, T>, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut new = node.into_raw();

        let Some(head) = self.head else {
            self.push_raw(new);
            return;
        };

        // SAFETY (this block and the loop below): all pointers are owned by
        // this stack or by the caller's handle; shared borrows end before
        // any link is rewritten.
        if cmp(unsafe { new.as_ref().value() }, unsafe { head.as_ref().value() })
            == Ordering::Less
        {
            self.push_raw(new);
            return;
        }

        let mut cursor = head;
        while let Some(next) = unsafe { cursor.as_ref().next() } {
            if cmp(unsafe { new.as_ref().value() }, unsafe { next.as_ref().value() })
                == Ordering::Less
            {
                break;
            }
            cursor = next;
        }

        unsafe {
            new.as_mut().set_next(cursor.as_ref().next());
            cursor.as_mut().set_next(Some(new));
        }
        if self.tail == Some(cursor) {
            self.tail = Some(new);
        }
        self.len += 1;
    }

    /// Returns `true` if the values from front to back are non-decreasing
    /// under `cmp`. An empty or single-element stack is sorted.
    pub fn is_sorted_by<F>(&self, mut cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut iter = self.iter();
        let Some(mut prev) = iter.next() else {
            return true;
        };
        for value in iter {
            if cmp(prev, value) == Ordering::Greater {
                return false;
            }
            prev = value;
        }
        true
    }

    /// Returns the front value without removing it.
    pub fn peek(&self) -> Option<&T> {
        // SAFETY: the head node is owned by this stack.
        self.head.map(|ptr| unsafe { (*ptr.as_ptr()).value() })
    }

    /// Returns the front value mutably without removing it.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` guarantees exclusive access to the head node.
        self.head.map(|ptr| unsafe { (*ptr.as_ptr()).value_mut() })
    }

    /// Iterates over the values from front (most recently pushed) to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Iterates mutably over the values from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Visits every node in order. Used by the pool to reset and
    /// owner-check a stack before splicing it back into the free list.
    pub(crate) fn for_each_node<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Node<T>),
    {
        let mut cursor = self.head;
        while let Some(mut ptr) = cursor {
            // SAFETY: the node is owned by this stack and `&mut self` is held.
            let node = unsafe { ptr.as_mut() };
            cursor = node.next();
            f(node);
        }
    }

    /// Re-binds the stack to a different lifetime.
    ///
    /// # Safety
    /// The storage of every node must outlive `'q`.
    pub(crate) unsafe fn rebind<'q>(mut self) -> Stack<'q, T> {
        let stack = Stack {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _pool: PhantomData,
        };
        self.clear();
        stack
    }

    fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T: fmt::Debug> Stack<'_, T> {
    /// Returns a bounded, human-readable dump of at most `max_elements`
    /// values, front first. Truncated output ends with `and more...`.
    pub fn summary(&self, max_elements: usize) -> String {
        if self.is_empty() {
            return "(empty)".to_string();
        }

        let shown: Vec<String> = self
            .iter()
            .take(max_elements)
            .map(|v| format!("{v:?}"))
            .collect();
        let mut out = shown.join(" ");
        if self.len > max_elements {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str("and more...");
        }
        out
    }
}

impl<T> Default for Stack<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Stack<'_, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Stack<'_, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// A stack owns its nodes the way a `Vec<T>` owns its elements.
unsafe impl<T: Send> Send for Stack<'_, T> {}
unsafe impl<T: Sync> Sync for Stack<'_, T> {}

/// Shared iterator over a [`Stack`], front to back.
pub struct Iter<'a, T> {
    next: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let ptr = self.next?;
        // SAFETY: the stack is borrowed for 'a, so the node stays linked.
        let node = unsafe { &*ptr.as_ptr() };
        self.next = node.next();
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a [`Stack`], front to back.
pub struct IterMut<'a, T> {
    next: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let ptr = self.next?;
        // SAFETY: the stack is mutably borrowed for 'a and each node is
        // yielded at most once.
        let node = unsafe { &mut *ptr.as_ptr() };
        self.next = node.next();
        self.remaining -= 1;
        Some(node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}
