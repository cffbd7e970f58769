// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Backing storage shared by both strategies.
//!
//! Blocks are heap slices whose addresses never change. They are pushed onto
//! an append-only, lock-free list with a compare-and-swap loop and freed in
//! one sweep when the list is dropped.

use crate::PoolError;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

/// A leaked boxed slice, freed on drop.
///
/// Element pointers handed out by [`RawSlice::as_mut_ptr`] stay valid until
/// the slice is dropped.
pub(crate) struct RawSlice<X> {
    ptr: NonNull<[X]>,
}

impl<X> RawSlice<X> {
    pub(crate) fn new(boxed: Box<[X]>) -> Self {
        Self {
            ptr: NonNull::from(Box::leak(boxed)),
        }
    }

    pub(crate) fn as_mut_ptr(&self) -> *mut X {
        self.ptr.as_ptr() as *mut X
    }

    pub(crate) fn len(&self) -> usize {
        self.ptr.len()
    }
}

impl<X> Drop for RawSlice<X> {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `Box::leak` and is dropped exactly once.
        unsafe { drop(Box::from_raw(self.ptr.as_ptr())) };
    }
}

unsafe impl<X: Send> Send for RawSlice<X> {}

/// Allocates a boxed slice of `len` elements, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_boxed_slice<X, F>(len: usize, mut fill: F) -> Result<Box<[X]>, PoolError>
where
    F: FnMut(usize) -> X,
{
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| PoolError::OutOfMemory {
            requested_slots: len,
            element_bytes: std::mem::size_of::<X>(),
        })?;
    for i in 0..len {
        slots.push(fill(i));
    }
    Ok(slots.into_boxed_slice())
}

/// Checks that `block_count` blocks of `block_size` slots, each occupying
/// `slot_bytes`, fit within the largest allocation the platform permits.
///
/// Runs before any block is built so an impossible request fails fast
/// instead of allocating block after block.
pub(crate) fn check_capacity(
    block_count: usize,
    block_size: usize,
    slot_bytes: usize,
) -> Result<(), PoolError> {
    let overflow = PoolError::CapacityOverflow {
        blocks: block_count,
        block_size,
    };
    match block_count
        .checked_mul(block_size)
        .and_then(|slots| slots.checked_mul(slot_bytes))
    {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
        _ => Err(overflow),
    }
}

struct Entry<B> {
    // Held for its destructor.
    _block: B,
    prev: *mut Entry<B>,
}

/// Append-only list of storage blocks.
pub(crate) struct BlockList<B> {
    head: AtomicPtr<Entry<B>>,
    len: AtomicUsize,
}

impl<B> BlockList<B> {
    pub(crate) fn new() -> Self {
        Self {
            head: AtomicPtr::new(ptr::null_mut()),
            len: AtomicUsize::new(0),
        }
    }

    /// Registers a block for the lifetime of the list.
    pub(crate) fn push(&self, block: B) {
        let entry = Box::into_raw(Box::new(Entry {
            _block: block,
            prev: ptr::null_mut(),
        }));

        let mut head = self.head.load(Ordering::Acquire);
        loop {
            // SAFETY: `entry` is not yet published, so we own it.
            unsafe { (*entry).prev = head };
            match self
                .head
                .compare_exchange_weak(head, entry, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(actual) => head = actual,
            }
        }
        self.len.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }
}

impl<B> Drop for BlockList<B> {
    fn drop(&mut self) {
        let mut cursor = *self.head.get_mut();
        while !cursor.is_null() {
            // SAFETY: every entry was created by `Box::into_raw` in `push`
            // and is reachable exactly once from the head.
            let entry = unsafe { Box::from_raw(cursor) };
            cursor = entry.prev;
            drop(entry);
        }
    }
}

// Blocks are only ever moved in and dropped; the list never hands out `&B`.
unsafe impl<B: Send> Send for BlockList<B> {}
unsafe impl<B: Send> Sync for BlockList<B> {}
