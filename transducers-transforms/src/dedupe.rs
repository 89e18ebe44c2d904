//! Collapsing of adjacent duplicates

use std::fmt;
use std::marker::PhantomData;

use transducers_core::error::Result;
use transducers_core::{Reducer, Step, Transform};

/// Drops elements equal to the one forwarded just before them
pub struct Dedupe<T> {
    _item: PhantomData<fn(T)>,
}

/// Forward an element only when it differs from the previous forwarded one.
///
/// Only adjacent duplicates collapse; a value that reappears later is
/// forwarded again.
pub fn dedupe<T>() -> Dedupe<T>
where
    T: PartialEq + Clone,
{
    Dedupe { _item: PhantomData }
}

impl<T> Clone for Dedupe<T> {
    fn clone(&self) -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> fmt::Debug for Dedupe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dedupe")
    }
}

/// Reducer produced by [`Dedupe`]
#[derive(Debug)]
pub struct DedupeReducer<T, R> {
    previous: Option<T>,
    rf: R,
}

impl<T, R> Transform<R> for Dedupe<T> {
    type Reducer = DedupeReducer<T, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        DedupeReducer { previous: None, rf }
    }
}

impl<A, T, R> Reducer<A, T> for DedupeReducer<T, R>
where
    T: PartialEq + Clone,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.previous.as_ref() == Some(&item) {
            return Ok(Step::Continue(acc));
        }
        self.previous = Some(item.clone());
        self.rf.step(acc, item)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}
