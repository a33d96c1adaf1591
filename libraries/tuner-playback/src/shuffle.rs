//! Shuffle order generation
//!
//! Produces and repairs the index permutation that defines randomized play
//! order. The queue itself is never reordered by shuffling; the permutation
//! is a second index space layered over it.

use rand::{thread_rng, Rng};

/// Generate a uniformly-random permutation of `0..n`
///
/// Fisher-Yates: walk from the last index down to 1, swapping each slot
/// with a uniformly chosen slot at or below it.
pub fn generate(n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = thread_rng();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Force `value` to occupy `order[position]`
///
/// Swaps `value` with whatever currently sits at `position`. Idempotent when
/// already satisfied, never changes the multiset of values, and a no-op when
/// `position` or `value` is out of range.
pub fn pin(order: &mut [usize], position: usize, value: usize) {
    if position >= order.len() {
        return;
    }
    if order[position] == value {
        return;
    }
    if let Some(found) = order.iter().position(|&v| v == value) {
        order.swap(position, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generate_returns_permutation() {
        for n in [0, 1, 2, 5, 40] {
            let order = generate(n);
            assert_eq!(order.len(), n);

            let values: HashSet<usize> = order.iter().copied().collect();
            assert_eq!(values.len(), n, "duplicate index in permutation");
            assert!(order.iter().all(|&v| v < n), "index out of range");
        }
    }

    #[test]
    fn generate_changes_order() {
        // 20 elements: the identity draw has probability 1/20!, so a repeat
        // failure here means a broken shuffle, not bad luck.
        let identity: Vec<usize> = (0..20).collect();
        let shuffled = (0..5).map(|_| generate(20)).collect::<Vec<_>>();
        assert!(shuffled.iter().any(|order| order != &identity));
    }

    #[test]
    fn pin_places_value_at_position() {
        let mut order = vec![3, 1, 0, 2];
        pin(&mut order, 0, 2);
        assert_eq!(order[0], 2);

        let values: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn pin_is_idempotent_when_satisfied() {
        let mut order = vec![2, 0, 1];
        let before = order.clone();
        pin(&mut order, 0, 2);
        assert_eq!(order, before);
    }

    #[test]
    fn pin_out_of_range_is_noop() {
        let mut order = vec![0, 1, 2];
        let before = order.clone();

        pin(&mut order, 5, 1);
        assert_eq!(order, before);

        pin(&mut order, 0, 9);
        assert_eq!(order, before);
    }

    #[test]
    fn pin_on_empty_order_is_noop() {
        let mut order: Vec<usize> = vec![];
        pin(&mut order, 0, 0);
        assert!(order.is_empty());
    }
}
