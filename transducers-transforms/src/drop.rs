//! Transforms that skip a prefix of the input

use std::sync::Arc;

use transducers_core::error::Result;
use transducers_core::{Reducer, Step, Transform};

/// Skips a fixed number of leading elements
#[derive(Debug, Clone, Copy)]
pub struct Dropping {
    n: usize,
}

/// Skip the first `n` elements and forward the rest
pub fn drop(n: usize) -> Dropping {
    Dropping { n }
}

/// Reducer produced by [`Dropping`]
#[derive(Debug)]
pub struct DroppingReducer<R> {
    remaining: usize,
    rf: R,
}

impl<R> Transform<R> for Dropping {
    type Reducer = DroppingReducer<R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        DroppingReducer {
            remaining: self.n,
            rf,
        }
    }
}

impl<A, T, R> Reducer<A, T> for DroppingReducer<R>
where
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.remaining > 0 {
            self.remaining -= 1;
            Ok(Step::Continue(acc))
        } else {
            self.rf.step(acc, item)
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Skips leading elements while a predicate holds
#[derive(Debug)]
pub struct DropWhile<P> {
    pred: Arc<P>,
}

impl<P> Clone for DropWhile<P> {
    fn clone(&self) -> Self {
        Self {
            pred: Arc::clone(&self.pred),
        }
    }
}

/// Skip elements while `pred` holds; the first failure and everything after is forwarded
pub fn drop_while<T, P>(pred: P) -> DropWhile<P>
where
    P: Fn(&T) -> bool,
{
    DropWhile {
        pred: Arc::new(pred),
    }
}

/// Reducer produced by [`DropWhile`]
#[derive(Debug)]
pub struct DropWhileReducer<P, R> {
    pred: Arc<P>,
    dropping: bool,
    rf: R,
}

impl<P, R> Transform<R> for DropWhile<P> {
    type Reducer = DropWhileReducer<P, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        DropWhileReducer {
            pred: Arc::clone(&self.pred),
            dropping: true,
            rf,
        }
    }
}

impl<A, T, P, R> Reducer<A, T> for DropWhileReducer<P, R>
where
    P: Fn(&T) -> bool,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.dropping && (*self.pred)(&item) {
            return Ok(Step::Continue(acc));
        }
        self.dropping = false;
        self.rf.step(acc, item)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}
