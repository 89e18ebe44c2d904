//! Common 2-arity reducing functions
//!
//! Any `FnMut(acc, item) -> acc` works as the final reducing function of a
//! pipeline; these cover the usual accumulators.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;
use std::ops::{Add, Mul};

/// Push to the back of a vector
pub fn append<T>(mut acc: Vec<T>, item: T) -> Vec<T> {
    acc.push(item);
    acc
}

/// Push to the front of a deque, reversing arrival order
pub fn push_front<T>(mut acc: VecDeque<T>, item: T) -> VecDeque<T> {
    acc.push_front(item);
    acc
}

/// Insert into a hash set
pub fn insert<T: Eq + Hash>(mut acc: HashSet<T>, item: T) -> HashSet<T> {
    acc.insert(item);
    acc
}

/// Insert into an ordered set
pub fn insert_ordered<T: Ord>(mut acc: BTreeSet<T>, item: T) -> BTreeSet<T> {
    acc.insert(item);
    acc
}

/// Numeric sum
pub fn sum<T: Add<Output = T>>(acc: T, item: T) -> T {
    acc + item
}

/// Numeric product
pub fn product<T: Mul<Output = T>>(acc: T, item: T) -> T {
    acc * item
}

/// Count elements, ignoring their values
pub fn count<T>(acc: usize, _item: T) -> usize {
    acc + 1
}

/// Keep only the most recent element
pub fn last<T>(_acc: Option<T>, item: T) -> Option<T> {
    Some(item)
}
