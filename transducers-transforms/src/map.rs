//! Element-wise transforms: mapping, keeping and substitution

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use transducers_core::error::{Error, Result};
use transducers_core::{compose, Compose, Reducer, Step, Transform};

use crate::cat::{cat, Cat};

/// Applies a function to every element
#[derive(Debug)]
pub struct Mapping<F> {
    f: Arc<F>,
}

impl<F> Clone for Mapping<F> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

/// Forward `f(x)` for every element `x`
pub fn mapping<T, U, F>(f: F) -> Mapping<F>
where
    F: Fn(T) -> U,
{
    Mapping { f: Arc::new(f) }
}

/// Reducer produced by [`Mapping`]
#[derive(Debug)]
pub struct MappingReducer<F, R> {
    f: Arc<F>,
    rf: R,
}

impl<F, R> Transform<R> for Mapping<F> {
    type Reducer = MappingReducer<F, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        MappingReducer {
            f: Arc::clone(&self.f),
            rf,
        }
    }
}

impl<A, T, U, F, R> Reducer<A, T> for MappingReducer<F, R>
where
    F: Fn(T) -> U,
    R: Reducer<A, U>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        self.rf.step(acc, (*self.f)(item))
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Applies a fallible function to every element
#[derive(Debug)]
pub struct TryMapping<F> {
    f: Arc<F>,
}

impl<F> Clone for TryMapping<F> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

/// Forward `f(x)`, stopping the reduction with [`Error::Callback`] on the first failure.
///
/// The caller's error is carried unmodified and can be downcast from the
/// returned error.
pub fn try_mapping<T, U, E, F>(f: F) -> TryMapping<F>
where
    F: Fn(T) -> std::result::Result<U, E>,
    E: Into<anyhow::Error>,
{
    TryMapping { f: Arc::new(f) }
}

/// Reducer produced by [`TryMapping`]
#[derive(Debug)]
pub struct TryMappingReducer<F, R> {
    f: Arc<F>,
    rf: R,
}

impl<F, R> Transform<R> for TryMapping<F> {
    type Reducer = TryMappingReducer<F, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        TryMappingReducer {
            f: Arc::clone(&self.f),
            rf,
        }
    }
}

impl<A, T, U, E, F, R> Reducer<A, T> for TryMappingReducer<F, R>
where
    F: Fn(T) -> std::result::Result<U, E>,
    E: Into<anyhow::Error>,
    R: Reducer<A, U>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        let mapped = (*self.f)(item).map_err(Error::callback)?;
        self.rf.step(acc, mapped)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Apply `f` and flatten the resulting collections one level
pub fn mapcatting<T, U, F>(f: F) -> Compose<Mapping<F>, Cat>
where
    F: Fn(T) -> U,
    U: IntoIterator,
{
    compose(mapping(f), cat())
}

/// Forwards the present results of a function
#[derive(Debug)]
pub struct Keep<F> {
    f: Arc<F>,
}

impl<F> Clone for Keep<F> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

/// Forward `v` whenever `f(x)` is `Some(v)`; drop the element on `None`
pub fn keep<T, U, F>(f: F) -> Keep<F>
where
    F: Fn(T) -> Option<U>,
{
    Keep { f: Arc::new(f) }
}

/// Reducer produced by [`Keep`]
#[derive(Debug)]
pub struct KeepReducer<F, R> {
    f: Arc<F>,
    rf: R,
}

impl<F, R> Transform<R> for Keep<F> {
    type Reducer = KeepReducer<F, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        KeepReducer {
            f: Arc::clone(&self.f),
            rf,
        }
    }
}

impl<A, T, U, F, R> Reducer<A, T> for KeepReducer<F, R>
where
    F: Fn(T) -> Option<U>,
    R: Reducer<A, U>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        match (*self.f)(item) {
            Some(value) => self.rf.step(acc, value),
            None => Ok(Step::Continue(acc)),
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Like [`Keep`], with the element's position passed to the function
#[derive(Debug)]
pub struct KeepIndexed<F> {
    f: Arc<F>,
}

impl<F> Clone for KeepIndexed<F> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

/// Forward `v` whenever `f(index, x)` is `Some(v)`.
///
/// The index counts every element seen by this stage, kept or not, starting
/// at 0 for each pipeline instance.
pub fn keep_indexed<T, U, F>(f: F) -> KeepIndexed<F>
where
    F: Fn(usize, T) -> Option<U>,
{
    KeepIndexed { f: Arc::new(f) }
}

/// Reducer produced by [`KeepIndexed`]
#[derive(Debug)]
pub struct KeepIndexedReducer<F, R> {
    f: Arc<F>,
    index: usize,
    rf: R,
}

impl<F, R> Transform<R> for KeepIndexed<F> {
    type Reducer = KeepIndexedReducer<F, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        KeepIndexedReducer {
            f: Arc::clone(&self.f),
            index: 0,
            rf,
        }
    }
}

impl<A, T, U, F, R> Reducer<A, T> for KeepIndexedReducer<F, R>
where
    F: Fn(usize, T) -> Option<U>,
    R: Reducer<A, U>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        let index = self.index;
        self.index += 1;
        match (*self.f)(index, item) {
            Some(value) => self.rf.step(acc, value),
            None => Ok(Step::Continue(acc)),
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

/// Substitutes elements found in a lookup table
#[derive(Debug)]
pub struct Replace<T> {
    table: Arc<HashMap<T, T>>,
}

impl<T> Clone for Replace<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

/// Forward the replacement for `x` if the table has one, otherwise `x` unchanged
pub fn replace<T, I>(pairs: I) -> Replace<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = (T, T)>,
{
    Replace {
        table: Arc::new(pairs.into_iter().collect()),
    }
}

/// Reducer produced by [`Replace`]
#[derive(Debug)]
pub struct ReplaceReducer<T, R> {
    table: Arc<HashMap<T, T>>,
    rf: R,
}

impl<T, R> Transform<R> for Replace<T> {
    type Reducer = ReplaceReducer<T, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        ReplaceReducer {
            table: Arc::clone(&self.table),
            rf,
        }
    }
}

impl<A, T, R> Reducer<A, T> for ReplaceReducer<T, R>
where
    T: Eq + Hash + Clone,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        let item = match self.table.get(&item) {
            Some(substitute) => substitute.clone(),
            None => item,
        };
        self.rf.step(acc, item)
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transducers_core::sink::{append, sum};
    use transducers_core::transduce;

    #[test]
    fn test_mapping_squares() {
        let out = transduce(mapping(|x: i32| x * x), append, Vec::new(), 0..5).unwrap();
        assert_eq!(out, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_mapping_changes_element_type() {
        let out = transduce(mapping(|c: char| u32::from(c)), sum, 0, "Th".chars()).unwrap();
        assert_eq!(out, 84 + 104);
    }

    #[test]
    fn test_try_mapping_stops_on_first_failure() {
        let parse = try_mapping(|s: &str| s.parse::<i32>());
        let ok = transduce(&parse, sum, 0, ["1", "2", "3"].into_iter()).unwrap();
        assert_eq!(ok, 6);

        let err = transduce(&parse, sum, 0, ["1", "x", "3"].into_iter()).unwrap_err();
        let original = err
            .callback_error()
            .and_then(|e| e.downcast_ref::<std::num::ParseIntError>());
        assert!(original.is_some());
    }

    #[test]
    fn test_mapcatting_reverses_and_flattens() {
        let xf = mapcatting(|v: Vec<i32>| v.into_iter().rev());
        let out = transduce(xf, append, Vec::new(), vec![vec![3, 2, 1], vec![5, 4]].into_iter())
            .unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_keep_drops_absent() {
        let only_even = keep(|x: i32| if x % 2 == 0 { Some(x) } else { None });
        let out = transduce(only_even, append, Vec::new(), 0..10).unwrap();
        assert_eq!(out, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_keep_forwards_falsy_values() {
        let out = transduce(keep(|x: i32| Some(x * 0)), append, Vec::new(), 0..3).unwrap();
        assert_eq!(out, vec![0, 0, 0]);
    }

    #[test]
    fn test_keep_indexed_uses_position() {
        let even_positions = keep_indexed(|i: usize, x: i32| (i % 2 == 0).then_some(x));
        let out = transduce(&even_positions, append, Vec::new(), vec![1, 3, 5, 7].into_iter())
            .unwrap();
        assert_eq!(out, vec![1, 5]);

        // A second run starts counting from zero again
        let out = transduce(&even_positions, append, Vec::new(), vec![9, 11].into_iter()).unwrap();
        assert_eq!(out, vec![9]);
    }

    #[test]
    fn test_replace_substitutes_known_keys() {
        let xf = replace([("1", "ok")]);
        let out = transduce(
            xf,
            append,
            Vec::new(),
            ["1", "3", "1", "5", "1", "7"].into_iter(),
        )
        .unwrap();
        assert_eq!(out, vec!["ok", "3", "ok", "5", "ok", "7"]);
    }
}
