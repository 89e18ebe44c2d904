//! Lazy iteration over a transformed source

use std::collections::VecDeque;
use std::fmt;

use crate::error::Result;
use crate::reducer::{Extender, Reducer};
use crate::source::Source;
use crate::step::Step;
use crate::transform::Transform;

/// An iterator that runs a pipeline on demand.
///
/// Each call to `next` pulls from the source only until the pipeline has
/// produced at least one output element. Completion runs once, when the
/// source is exhausted or a stage signals, and any flushed elements are
/// yielded afterwards.
pub struct Eduction<R, S, T> {
    /// Pipeline instance feeding the output buffer
    reducer: R,

    /// Input producer
    source: S,

    /// Elements produced but not yet yielded
    pending: VecDeque<T>,

    /// Set once completion has run or an error was yielded
    finished: bool,
}

/// Build a lazy iterator applying `xform` to `source`.
///
/// Items are `Result`s: a failing source or callback is yielded once as an
/// error, after which the iterator is fused.
pub fn eduction<X, S, T>(xform: X, source: S) -> Eduction<X::Reducer, S, T>
where
    X: Transform<Extender<T>>,
    X::Reducer: Reducer<VecDeque<T>, S::Item>,
    S: Source,
{
    Eduction {
        reducer: xform.apply(Extender::new()),
        source,
        pending: VecDeque::new(),
        finished: false,
    }
}

impl<R, S, T> Eduction<R, S, T>
where
    R: Reducer<VecDeque<T>, S::Item>,
    S: Source,
{
    /// Feed one source element, or complete the pipeline on exhaustion
    fn advance(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        self.pending = match self.source.next_item()? {
            Some(input) => match self.reducer.step(pending, input)? {
                Step::Continue(next) => next,
                Step::Reduced(last) => {
                    self.finished = true;
                    self.reducer.complete(last)?
                }
            },
            None => {
                self.finished = true;
                self.reducer.complete(pending)?
            }
        };
        Ok(())
    }
}

impl<R, S, T> Iterator for Eduction<R, S, T>
where
    R: Reducer<VecDeque<T>, S::Item>,
    S: Source,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.advance() {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }
}

impl<R, S, T> fmt::Debug for Eduction<R, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eduction")
            .field("pending", &self.pending.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
