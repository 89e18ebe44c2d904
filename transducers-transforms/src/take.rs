//! Transforms that end the reduction early or thin out the input

use std::sync::Arc;

use tracing::trace;
use transducers_core::error::{Error, Result};
use transducers_core::{Reducer, Step, Transform};

/// Forwards at most `n` elements, then signals
#[derive(Debug, Clone, Copy)]
pub struct Taking {
    n: usize,
}

/// Forward the first `n` elements.
///
/// The signal is raised together with the n-th element, so an upstream
/// producer is advanced exactly `n` times. `taking(0)` forwards nothing and
/// signals on the first element it sees.
pub fn taking(n: usize) -> Taking {
    Taking { n }
}

/// Reducer produced by [`Taking`]
#[derive(Debug)]
pub struct TakingReducer<R> {
    remaining: usize,
    rf: R,
}

impl<R> Transform<R> for Taking {
    type Reducer = TakingReducer<R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        TakingReducer {
            remaining: self.n,
            rf,
        }
    }
}

impl<A, T, R> Reducer<A, T> for TakingReducer<R>
where
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.remaining == 0 {
            return Ok(Step::Reduced(acc));
        }

        self.remaining -= 1;
        let step = self.rf.step(acc, item)?;
        if self.remaining == 0 {
            trace!("take limit reached");
            Ok(step.reduced())
        } else {
            Ok(step)
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Forwards elements while a predicate holds
#[derive(Debug)]
pub struct TakeWhile<P> {
    pred: Arc<P>,
}

impl<P> Clone for TakeWhile<P> {
    fn clone(&self) -> Self {
        Self {
            pred: Arc::clone(&self.pred),
        }
    }
}

/// Forward elements until `pred` first fails; the failing element is dropped
pub fn take_while<T, P>(pred: P) -> TakeWhile<P>
where
    P: Fn(&T) -> bool,
{
    TakeWhile {
        pred: Arc::new(pred),
    }
}

/// Reducer produced by [`TakeWhile`]
#[derive(Debug)]
pub struct TakeWhileReducer<P, R> {
    pred: Arc<P>,
    rf: R,
}

impl<P, R> Transform<R> for TakeWhile<P> {
    type Reducer = TakeWhileReducer<P, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        TakeWhileReducer {
            pred: Arc::clone(&self.pred),
            rf,
        }
    }
}

impl<A, T, P, R> Reducer<A, T> for TakeWhileReducer<P, R>
where
    P: Fn(&T) -> bool,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if (*self.pred)(&item) {
            self.rf.step(acc, item)
        } else {
            trace!("take_while predicate failed");
            Ok(Step::Reduced(acc))
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Forwards every n-th element, starting with the first
#[derive(Debug, Clone, Copy)]
pub struct TakeNth {
    n: usize,
}

/// Forward elements 0, n, 2n, ... of the input
pub fn take_nth(n: usize) -> Result<TakeNth> {
    if n == 0 {
        return Err(Error::invalid_argument("take_nth requires n > 0"));
    }
    Ok(TakeNth { n })
}

/// Reducer produced by [`TakeNth`]
#[derive(Debug)]
pub struct TakeNthReducer<R> {
    n: usize,
    until_next: usize,
    rf: R,
}

impl<R> Transform<R> for TakeNth {
    type Reducer = TakeNthReducer<R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        TakeNthReducer {
            n: self.n,
            until_next: 0,
            rf,
        }
    }
}

impl<A, T, R> Reducer<A, T> for TakeNthReducer<R>
where
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.until_next == 0 {
            self.until_next = self.n - 1;
            self.rf.step(acc, item)
        } else {
            self.until_next -= 1;
            Ok(Step::Continue(acc))
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}
