//! Flattening of nested collections

use tracing::trace;
use transducers_core::error::Result;
use transducers_core::{Reducer, Step, Transform};

/// Feeds each element of a nested collection downstream on its own
#[derive(Debug, Clone, Copy, Default)]
pub struct Cat;

/// Flatten one level: every item must itself be iterable
pub fn cat() -> Cat {
    Cat
}

/// Reducer produced by [`Cat`]
#[derive(Debug)]
pub struct CatReducer<R> {
    rf: R,
}

impl<R> Transform<R> for Cat {
    type Reducer = CatReducer<R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        CatReducer { rf }
    }
}

impl<A, T, R> Reducer<A, T> for CatReducer<R>
where
    T: IntoIterator,
    R: Reducer<A, T::Item>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        let mut acc = acc;
        for inner in item {
            match self.rf.step(acc, inner)? {
                Step::Continue(next) => acc = next,
                reduced @ Step::Reduced(_) => {
                    trace!("downstream signalled inside nested collection");
                    return Ok(reduced);
                }
            }
        }
        Ok(Step::Continue(acc))
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}
