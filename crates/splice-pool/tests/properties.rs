// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property tests for stack ordering and pool accounting.

use proptest::prelude::*;
use splice_pool::{ObjectPool, Stack};

fn stack_of<'p>(pool: &'p ObjectPool<i32>, values: &[i32]) -> Stack<'p, i32> {
    let mut stack = Stack::new();
    for &v in values {
        stack.push(pool.acquire_with(v).unwrap());
    }
    stack
}

fn drain(stack: &mut Stack<'_, i32>) -> Vec<i32> {
    std::iter::from_fn(|| stack.pop().map(|n| *n)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn push_pop_is_lifo(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let pool = ObjectPool::new(16);
        let mut stack = stack_of(&pool, &values);
        prop_assert_eq!(stack.len(), values.len());

        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(drain(&mut stack), expected);
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn append_splices_other_on_top(
        a in prop::collection::vec(any::<i32>(), 0..32),
        b in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let pool = ObjectPool::new(16);
        let mut sa = stack_of(&pool, &a);
        let mut sb = stack_of(&pool, &b);

        sa.append(&mut sb);
        prop_assert_eq!(sa.len(), a.len() + b.len());
        prop_assert!(sb.is_empty());

        let expected: Vec<i32> = b.iter().rev().chain(a.iter().rev()).copied().collect();
        prop_assert_eq!(drain(&mut sa), expected);
    }

    #[test]
    fn pop_stack_splits_front_run(
        values in prop::collection::vec(any::<i32>(), 0..48),
        k in 0usize..64,
    ) {
        let pool = ObjectPool::new(16);
        let mut stack = stack_of(&pool, &values);
        let n = values.len();

        let mut front = stack.pop_stack(k);
        prop_assert_eq!(front.len(), k.min(n));
        prop_assert_eq!(stack.len(), n - k.min(n));

        let mut reversed = values.clone();
        reversed.reverse();
        let (head, tail) = reversed.split_at(k.min(n));
        prop_assert_eq!(drain(&mut front), head.to_vec());
        prop_assert_eq!(drain(&mut stack), tail.to_vec());
    }

    #[test]
    fn sorted_insert_keeps_order(values in prop::collection::vec(-50i32..50, 0..64)) {
        let pool = ObjectPool::new(8);
        let mut stack = Stack::new();
        for &v in &values {
            stack.push_sorted_by(pool.acquire_with(v).unwrap(), i32::cmp);
        }

        prop_assert!(stack.is_sorted_by(i32::cmp));
        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(drain(&mut stack), expected);
    }

    #[test]
    fn pool_accounting_holds_at_quiescence(
        block_size in 1usize..32,
        requests in prop::collection::vec(0usize..80, 1..12),
    ) {
        let pool = ObjectPool::<i32>::new(block_size);
        let mut held = Vec::new();

        for (i, &count) in requests.iter().enumerate() {
            let stack = pool.acquire_stack(count).unwrap();
            prop_assert_eq!(stack.len(), count);
            held.push(stack);

            if i % 3 == 2 {
                pool.release_stack(held.remove(0));
            }
            let outstanding: usize = held.iter().map(Stack::len).sum();
            prop_assert_eq!(pool.allocated(), pool.available() + outstanding);
            prop_assert_eq!(pool.allocated() % block_size, 0);
        }

        for stack in held {
            pool.release_stack(stack);
        }
        prop_assert_eq!(pool.allocated(), pool.available());
    }
}
