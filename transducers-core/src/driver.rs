//! Pipeline execution: pulling a source through a composed reducer

use std::time::{Duration, Instant};

use tracing::{debug, debug_span, trace};

use crate::config::TransduceConfig;
use crate::error::{Error, Result};
use crate::reducer::{completing, Completing, Extender, Reducer};
use crate::source::Source;
use crate::step::Step;
use crate::transform::Transform;

/// Statistics from one run of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransduceStats {
    /// Number of items pulled from the source
    pub items_pulled: u64,

    /// Whether the pipeline signalled early termination
    pub terminated_early: bool,

    /// Total execution time, if timing was enabled
    pub elapsed: Option<Duration>,
}

/// Final accumulator of a run together with its statistics
#[derive(Debug, Clone)]
pub struct TransduceOutcome<A> {
    /// The completed accumulator
    pub value: A,

    /// Statistics gathered during the run
    pub stats: TransduceStats,
}

/// Accumulator state after the input loop, before completion
struct Folded<A> {
    acc: A,
    pulled: u64,
    terminated_early: bool,
}

/// Pull `source` through `reducer` until it is exhausted or a step signals.
///
/// The source is never advanced past the element that produced the signal,
/// nor past `pull_limit` items. Once the limit is reached the run fails
/// unless the source reports through its size hint that it is exhausted.
fn fold_source<R, A, S>(
    reducer: &mut R,
    seed: A,
    mut source: S,
    pull_limit: Option<u64>,
) -> Result<Folded<A>>
where
    R: Reducer<A, S::Item> + ?Sized,
    S: Source,
{
    let mut acc = seed;
    let mut pulled = 0u64;

    loop {
        if let Some(limit) = pull_limit {
            if pulled >= limit && Source::size_hint(&source) != Some(0) {
                return Err(Error::PullLimitExceeded { limit });
            }
        }
        let Some(item) = source.next_item()? else {
            break;
        };
        pulled += 1;

        match reducer.step(acc, item)? {
            Step::Continue(next) => acc = next,
            Step::Reduced(last) => {
                trace!(pulled, "pipeline signalled early termination");
                return Ok(Folded {
                    acc: last,
                    pulled,
                    terminated_early: true,
                });
            }
        }
    }

    Ok(Folded {
        acc,
        pulled,
        terminated_early: false,
    })
}

/// Run `source` through `xform` into the 2-arity reducing function `rf`.
///
/// `rf` is lifted with an identity completion. The pipeline instance is
/// built fresh for this call, fed until the source is exhausted or a stage
/// signals, and completed exactly once.
pub fn transduce<X, F, A, S>(xform: X, rf: F, seed: A, source: S) -> Result<A>
where
    X: Transform<Completing<F>>,
    X::Reducer: Reducer<A, S::Item>,
    S: Source,
{
    transduce_with(xform, completing(rf), seed, source)
}

/// Like [`transduce`], with a full [`Reducer`] as the final reducing function
pub fn transduce_with<X, R, A, S>(xform: X, rf: R, seed: A, source: S) -> Result<A>
where
    X: Transform<R>,
    X::Reducer: Reducer<A, S::Item>,
    S: Source,
{
    let mut reducer = xform.apply(rf);
    let folded = fold_source(&mut reducer, seed, source, None)?;
    debug!(
        items_pulled = folded.pulled,
        terminated_early = folded.terminated_early,
        "transduction finished"
    );
    reducer.complete(folded.acc)
}

/// Reduce `source` with `rf`, honoring early termination.
///
/// No transform is involved and `complete` is not called.
pub fn reduce<R, A, S>(mut rf: R, seed: A, source: S) -> Result<A>
where
    R: Reducer<A, S::Item>,
    S: Source,
{
    fold_source(&mut rf, seed, source, None).map(|folded| folded.acc)
}

/// Transduce `source` into an existing collection
pub fn into<C, T, X, S>(collection: C, xform: X, source: S) -> Result<C>
where
    C: Extend<T>,
    X: Transform<Extender<T>>,
    X::Reducer: Reducer<C, S::Item>,
    S: Source,
{
    transduce_with(xform, Extender::new(), collection, source)
}

/// A configured pipeline driver that reports statistics
#[derive(Debug, Clone, Default)]
pub struct Transducer {
    /// Configuration for this driver
    config: TransduceConfig,
}

impl Transducer {
    /// Create a new driver
    pub fn new(config: TransduceConfig) -> Self {
        Self { config }
    }

    /// Get the configuration of this driver
    pub fn config(&self) -> &TransduceConfig {
        &self.config
    }

    /// Run a pipeline into a 2-arity reducing function
    pub fn run<X, F, A, S>(&self, xform: X, rf: F, seed: A, source: S) -> Result<TransduceOutcome<A>>
    where
        X: Transform<Completing<F>>,
        X::Reducer: Reducer<A, S::Item>,
        S: Source,
    {
        self.run_with(xform, completing(rf), seed, source)
    }

    /// Run a pipeline into a full reducer
    pub fn run_with<X, R, A, S>(
        &self,
        xform: X,
        rf: R,
        seed: A,
        source: S,
    ) -> Result<TransduceOutcome<A>>
    where
        X: Transform<R>,
        X::Reducer: Reducer<A, S::Item>,
        S: Source,
    {
        let span = debug_span!("transduce", label = %self.config.label);
        let _guard = span.enter();

        let started = self.config.collect_stats.then(Instant::now);
        debug!(
            size_hint = ?source.size_hint(),
            pull_limit = ?self.config.pull_limit,
            "starting transduction"
        );

        let mut reducer = xform.apply(rf);
        let folded = fold_source(&mut reducer, seed, source, self.config.pull_limit)?;
        let value = reducer.complete(folded.acc)?;

        let stats = TransduceStats {
            items_pulled: folded.pulled,
            terminated_early: folded.terminated_early,
            elapsed: started.map(|start| start.elapsed()),
        };
        debug!(
            items_pulled = stats.items_pulled,
            terminated_early = stats.terminated_early,
            elapsed = ?stats.elapsed,
            "transduction finished"
        );

        Ok(TransduceOutcome { value, stats })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;
    use crate::reducer::{completing_with, reducer_fn};
    use crate::sink::{append, sum};
    use crate::source::TrySource;
    use crate::transform::Identity;

    #[test]
    fn test_identity_transduce_collects() {
        let out = transduce(Identity, append, Vec::new(), 0..5).unwrap();
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_signal_stops_pulling() {
        let pulled = Cell::new(0u64);
        let source = (0u64..).inspect(|_| pulled.set(pulled.get() + 1));
        let stop_at_three = reducer_fn(|acc: u64, x: u64| {
            if x == 3 {
                Step::Reduced(acc)
            } else {
                Step::Continue(acc + x)
            }
        });

        let total = transduce_with(Identity, stop_at_three, 0, source).unwrap();

        assert_eq!(total, 3);
        assert_eq!(pulled.get(), 4);
    }

    /// Collects until `stop_after` items, counting completions
    struct CountedCompletion<'a> {
        completions: &'a Cell<u32>,
        stop_after: usize,
    }

    impl Reducer<Vec<i32>, i32> for CountedCompletion<'_> {
        fn step(&mut self, acc: Vec<i32>, item: i32) -> Result<Step<Vec<i32>>> {
            let acc = append(acc, item);
            if acc.len() >= self.stop_after {
                Ok(Step::Reduced(acc))
            } else {
                Ok(Step::Continue(acc))
            }
        }

        fn complete(&mut self, acc: Vec<i32>) -> Result<Vec<i32>> {
            self.completions.set(self.completions.get() + 1);
            Ok(acc)
        }
    }

    #[test]
    fn test_complete_runs_once_on_both_paths() {
        let completions = Cell::new(0);

        let exhausted = CountedCompletion {
            completions: &completions,
            stop_after: usize::MAX,
        };
        let out = transduce_with(Identity, exhausted, Vec::new(), 0..3).unwrap();
        assert_eq!(out, vec![0, 1, 2]);
        assert_eq!(completions.get(), 1);

        let early = CountedCompletion {
            completions: &completions,
            stop_after: 1,
        };
        let out = transduce_with(Identity, early, Vec::new(), 0..3).unwrap();
        assert_eq!(out, vec![0]);
        assert_eq!(completions.get(), 2);
    }

    #[test]
    fn test_completing_with_finishes_result() {
        let out = transduce_with(
            Identity,
            completing_with(append, |mut acc: Vec<i32>| {
                acc.reverse();
                acc
            }),
            Vec::new(),
            0..3,
        )
        .unwrap();
        assert_eq!(out, vec![2, 1, 0]);
    }

    #[test]
    fn test_reduce_honors_signal_without_completion() {
        let rf = reducer_fn(|acc: i32, x: i32| {
            let next = acc + x;
            if next >= 6 {
                Step::Reduced(next)
            } else {
                Step::Continue(next)
            }
        });
        assert_eq!(reduce(rf, 0, 1..100).unwrap(), 6);
    }

    #[test]
    fn test_into_extends_collection() {
        let out = into(VecDeque::from(vec![9]), Identity, vec![1, 2].into_iter()).unwrap();
        assert_eq!(out, VecDeque::from(vec![9, 1, 2]));
    }

    #[test]
    fn test_source_error_propagates() {
        let items = vec![Ok(1), Err(anyhow::anyhow!("truncated record")), Ok(3)];
        let err = transduce(Identity, sum, 0, TrySource::new(items.into_iter())).unwrap_err();

        assert!(matches!(err, Error::Source(_)));
    }

    #[test]
    fn test_transducer_reports_stats() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let driver = Transducer::new(TransduceConfig::default().with_label("stats"));
        let outcome = driver.run(Identity, sum, 0, 1..=4).unwrap();

        assert_eq!(outcome.value, 10);
        assert_eq!(outcome.stats.items_pulled, 4);
        assert!(!outcome.stats.terminated_early);
        assert!(outcome.stats.elapsed.is_some());
    }

    #[test]
    fn test_pull_limit_never_advances_source_past_limit() {
        let pulled = Cell::new(0u64);
        let source = (0u64..).inspect(|_| pulled.set(pulled.get() + 1));
        let driver = Transducer::new(TransduceConfig::default().with_pull_limit(10));

        let err = driver.run(Identity, sum, 0u64, source).unwrap_err();

        assert!(matches!(err, Error::PullLimitExceeded { limit: 10 }));
        assert_eq!(pulled.get(), 10);
    }

    #[test]
    fn test_transducer_pull_limit() {
        let driver = Transducer::new(
            TransduceConfig::default()
                .with_pull_limit(10)
                .with_stats(false),
        );

        let err = driver.run(Identity, sum, 0u64, 0u64..).unwrap_err();
        assert!(matches!(err, Error::PullLimitExceeded { limit: 10 }));

        let outcome = driver.run(Identity, sum, 0, 0..10).unwrap();
        assert_eq!(outcome.value, 45);
        assert_eq!(outcome.stats.elapsed, None);
    }

    proptest! {
        #[test]
        fn test_identity_transduce_matches_fold(xs in prop::collection::vec(-1000i64..1000, 0..64)) {
            let expected: i64 = xs.iter().sum();
            let total = transduce(Identity, sum, 0, xs.into_iter()).unwrap();
            prop_assert_eq!(total, expected);
        }
    }
}
