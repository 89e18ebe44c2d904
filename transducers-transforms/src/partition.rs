//! Grouping of consecutive elements into vectors
//!
//! Both transforms buffer elements and forward each finished group downstream
//! as a single `Vec`. A partial group still buffered when the input ends is
//! flushed by `complete`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;
use transducers_core::error::{Error, Result};
use transducers_core::{Reducer, Step, Transform};

/// Groups runs of elements that share a key
pub struct PartitionBy<F, T, K> {
    key_fn: Arc<F>,
    _types: PhantomData<fn(T) -> K>,
}

/// Split the input into runs of consecutive elements with equal `key_fn(&x)`
pub fn partition_by<T, K, F>(key_fn: F) -> PartitionBy<F, T, K>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    PartitionBy {
        key_fn: Arc::new(key_fn),
        _types: PhantomData,
    }
}

impl<F, T, K> Clone for PartitionBy<F, T, K> {
    fn clone(&self) -> Self {
        Self {
            key_fn: Arc::clone(&self.key_fn),
            _types: PhantomData,
        }
    }
}

impl<F, T, K> fmt::Debug for PartitionBy<F, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionBy").finish_non_exhaustive()
    }
}

/// Reducer produced by [`PartitionBy`]
#[derive(Debug)]
pub struct PartitionByReducer<F, T, K, R> {
    key_fn: Arc<F>,
    buffer: Vec<T>,
    last_key: Option<K>,
    rf: R,
}

impl<F, T, K, R> Transform<R> for PartitionBy<F, T, K> {
    type Reducer = PartitionByReducer<F, T, K, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        PartitionByReducer {
            key_fn: Arc::clone(&self.key_fn),
            buffer: Vec::new(),
            last_key: None,
            rf,
        }
    }
}

impl<A, F, T, K, R> Reducer<A, T> for PartitionByReducer<F, T, K, R>
where
    F: Fn(&T) -> K,
    K: PartialEq,
    R: Reducer<A, Vec<T>>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        let key = (*self.key_fn)(&item);
        let same_run = self.buffer.is_empty() || self.last_key.as_ref() == Some(&key);
        self.last_key = Some(key);

        if same_run {
            self.buffer.push(item);
            return Ok(Step::Continue(acc));
        }

        let group = std::mem::take(&mut self.buffer);
        match self.rf.step(acc, group)? {
            Step::Continue(acc) => {
                self.buffer.push(item);
                Ok(Step::Continue(acc))
            }
            reduced @ Step::Reduced(_) => {
                trace!("downstream signalled on partition flush");
                Ok(reduced)
            }
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        let acc = if self.buffer.is_empty() {
            acc
        } else {
            let group = std::mem::take(&mut self.buffer);
            self.rf.step(acc, group)?.into_inner()
        };
        self.rf.complete(acc)
    }
}

/// Groups elements into vectors of a fixed size
pub struct PartitionAll<T> {
    size: usize,
    _item: PhantomData<fn(T)>,
}

/// Split the input into groups of `size` elements; the last group may be shorter
pub fn partition_all<T>(size: usize) -> Result<PartitionAll<T>> {
    if size == 0 {
        return Err(Error::invalid_argument("partition_all requires a size > 0"));
    }
    Ok(PartitionAll {
        size,
        _item: PhantomData,
    })
}

impl<T> Clone for PartitionAll<T> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PartitionAll<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionAll")
            .field("size", &self.size)
            .finish()
    }
}

/// Reducer produced by [`PartitionAll`]
#[derive(Debug)]
pub struct PartitionAllReducer<T, R> {
    size: usize,
    buffer: Vec<T>,
    rf: R,
}

impl<T, R> Transform<R> for PartitionAll<T> {
    type Reducer = PartitionAllReducer<T, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        PartitionAllReducer {
            size: self.size,
            buffer: Vec::with_capacity(self.size),
            rf,
        }
    }
}

impl<A, T, R> Reducer<A, T> for PartitionAllReducer<T, R>
where
    R: Reducer<A, Vec<T>>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        self.buffer.push(item);
        if self.buffer.len() < self.size {
            return Ok(Step::Continue(acc));
        }

        let group = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.size));
        self.rf.step(acc, group)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        let acc = if self.buffer.is_empty() {
            acc
        } else {
            let group = std::mem::take(&mut self.buffer);
            self.rf.step(acc, group)?.into_inner()
        };
        self.rf.complete(acc)
    }
}
