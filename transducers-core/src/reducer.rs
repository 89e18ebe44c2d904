//! The reducing-function protocol and adapters for caller-supplied functions

use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::step::Step;

/// A reducing function over accumulator `A` and elements `T`.
///
/// Every transform produces one of these by wrapping its downstream reducer.
/// The seed accumulator is supplied by the caller, never by the reducer.
pub trait Reducer<A, T> {
    /// Fold one element into the accumulator.
    ///
    /// Returns [`Step::Reduced`] when no further elements should be supplied.
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>>;

    /// Finish the reduction, flushing any buffered state.
    ///
    /// Called exactly once per run, after the last `step`. Wrapping reducers
    /// must eventually call the downstream `complete`.
    fn complete(&mut self, acc: A) -> Result<A> {
        Ok(acc)
    }
}

/// Type-erased reducer, used when a pipeline is assembled at run time
pub type BoxedReducer<'a, A, T> = Box<dyn Reducer<A, T> + 'a>;

impl<A, T, R> Reducer<A, T> for &mut R
where
    R: Reducer<A, T> + ?Sized,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        (**self).step(acc, item)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        (**self).complete(acc)
    }
}

impl<A, T, R> Reducer<A, T> for Box<R>
where
    R: Reducer<A, T> + ?Sized,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        (**self).step(acc, item)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        (**self).complete(acc)
    }
}

/// A plain binary function lifted into a [`Reducer`] with identity completion
#[derive(Debug, Clone, Copy)]
pub struct Completing<F> {
    f: F,
}

/// Lift a 2-arity `(acc, item) -> acc` function into a full reducer
pub fn completing<F>(f: F) -> Completing<F> {
    Completing { f }
}

impl<A, T, F> Reducer<A, T> for Completing<F>
where
    F: FnMut(A, T) -> A,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        Ok(Step::Continue((self.f)(acc, item)))
    }
}

/// A binary function paired with a custom completion
#[derive(Debug, Clone, Copy)]
pub struct CompletingWith<F, C> {
    f: F,
    finish: C,
}

/// Lift `f` into a reducer whose `complete` runs `finish`
pub fn completing_with<F, C>(f: F, finish: C) -> CompletingWith<F, C> {
    CompletingWith { f, finish }
}

impl<A, T, F, C> Reducer<A, T> for CompletingWith<F, C>
where
    F: FnMut(A, T) -> A,
    C: FnMut(A) -> A,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        Ok(Step::Continue((self.f)(acc, item)))
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        Ok((self.finish)(acc))
    }
}

/// A fallible binary function lifted into a reducer
#[derive(Debug, Clone, Copy)]
pub struct TryCompleting<F> {
    f: F,
}

/// Lift a fallible `(acc, item) -> anyhow::Result<acc>` function into a reducer.
///
/// Errors surface from the driver as [`Error::Callback`].
pub fn try_completing<F>(f: F) -> TryCompleting<F> {
    TryCompleting { f }
}

impl<A, T, F, E> Reducer<A, T> for TryCompleting<F>
where
    F: FnMut(A, T) -> std::result::Result<A, E>,
    E: Into<anyhow::Error>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        (self.f)(acc, item).map(Step::Continue).map_err(Error::callback)
    }
}

/// A function that decides its own early termination
#[derive(Debug, Clone, Copy)]
pub struct ReducerFn<F> {
    f: F,
}

/// Lift a `(acc, item) -> Step<acc>` function into a reducer
pub fn reducer_fn<F>(f: F) -> ReducerFn<F> {
    ReducerFn { f }
}

impl<A, T, F> Reducer<A, T> for ReducerFn<F>
where
    F: FnMut(A, T) -> Step<A>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        Ok((self.f)(acc, item))
    }
}

/// Reducer that extends the accumulator collection with each element.
///
/// Used by [`crate::driver::into`] and [`crate::eduction::eduction`].
pub struct Extender<T> {
    _item: PhantomData<fn(T)>,
}

impl<T> Extender<T> {
    /// Create a new extending reducer
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for Extender<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T> Reducer<C, T> for Extender<T>
where
    C: Extend<T>,
{
    fn step(&mut self, mut acc: C, item: T) -> Result<Step<C>> {
        acc.extend(std::iter::once(item));
        Ok(Step::Continue(acc))
    }
}
