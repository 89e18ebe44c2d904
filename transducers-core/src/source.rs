//! Source trait and implementations for pipeline input

use crate::error::{Error, Result};

/// A producer of input elements for a reduction.
///
/// Sources are pulled lazily, one element per call, and may be infinite.
/// The driver never asks for more elements than the pipeline needs.
pub trait Source {
    /// The type of items produced by this source
    type Item;

    /// Retrieve the next item from this source.
    /// Returns None when exhausted
    fn next_item(&mut self) -> Result<Option<Self::Item>>;

    /// Provides a hint about the number of remaining items (if known)
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl<I> Source for I
where
    I: Iterator,
{
    type Item = I::Item;

    fn next_item(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.next())
    }

    fn size_hint(&self) -> Option<usize> {
        match Iterator::size_hint(self) {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// A source over an iterator of fallible items, such as lines read from a file.
///
/// The first `Err` ends the reduction and surfaces as [`Error::Source`].
#[derive(Debug, Clone)]
pub struct TrySource<I> {
    /// The underlying iterator
    iter: I,
}

impl<I> TrySource<I> {
    /// Wrap an iterator of `Result` items
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    /// Take back the underlying iterator
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I, T, E> Source for TrySource<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    type Item = T;

    fn next_item(&mut self) -> Result<Option<T>> {
        self.iter.next().transpose().map_err(Error::producer)
    }
}
