//! Predicate-based selection

use std::sync::Arc;

use transducers_core::error::Result;
use transducers_core::{Reducer, Step, Transform};

/// Forwards elements whose predicate result matches `keep_when`
#[derive(Debug)]
pub struct Filtering<P> {
    pred: Arc<P>,
    keep_when: bool,
}

impl<P> Clone for Filtering<P> {
    fn clone(&self) -> Self {
        Self {
            pred: Arc::clone(&self.pred),
            keep_when: self.keep_when,
        }
    }
}

/// Forward only the elements for which `pred` holds
pub fn filtering<T, P>(pred: P) -> Filtering<P>
where
    P: Fn(&T) -> bool,
{
    Filtering {
        pred: Arc::new(pred),
        keep_when: true,
    }
}

/// Forward only the elements for which `pred` does not hold
pub fn remove<T, P>(pred: P) -> Filtering<P>
where
    P: Fn(&T) -> bool,
{
    Filtering {
        pred: Arc::new(pred),
        keep_when: false,
    }
}

/// Reducer produced by [`Filtering`]
#[derive(Debug)]
pub struct FilteringReducer<P, R> {
    pred: Arc<P>,
    keep_when: bool,
    rf: R,
}

impl<P, R> Transform<R> for Filtering<P> {
    type Reducer = FilteringReducer<P, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        FilteringReducer {
            pred: Arc::clone(&self.pred),
            keep_when: self.keep_when,
            rf,
        }
    }
}

impl<A, T, P, R> Reducer<A, T> for FilteringReducer<P, R>
where
    P: Fn(&T) -> bool,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if (*self.pred)(&item) == self.keep_when {
            self.rf.step(acc, item)
        } else {
            Ok(Step::Continue(acc))
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use transducers_core::sink::{append, count};
    use transducers_core::transduce;

    #[test]
    fn test_filtering_keeps_matches() {
        let out = transduce(filtering(|x: &i32| x % 2 == 0), append, Vec::new(), 0..5).unwrap();
        assert_eq!(out, vec![0, 2, 4]);
    }

    #[test]
    fn test_remove_drops_matches() {
        let out = transduce(remove(|x: &i32| x % 2 == 0), append, Vec::new(), 0..10).unwrap();
        assert_eq!(out, vec![1, 3, 5, 7, 9]);
    }

    #[test_case(0 ; "nothing")]
    #[test_case(7 ; "some")]
    #[test_case(100 ; "everything")]
    fn test_filtering_and_remove_partition_input(threshold: i32) {
        let below = transduce(filtering(move |x: &i32| *x < threshold), count, 0, 0..100).unwrap();
        let rest = transduce(remove(move |x: &i32| *x < threshold), count, 0, 0..100).unwrap();
        assert_eq!(below + rest, 100);
    }
}
