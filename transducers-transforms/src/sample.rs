//! Probabilistic sampling

use std::fmt;
use std::sync::Arc;

use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};
use transducers_core::error::{Error, Result};
use transducers_core::{Reducer, Step, Transform};

/// A source of independent uniform values in `[0, 1)`
pub trait RandomSource {
    /// Draw the next value
    fn next_f64(&mut self) -> f64;
}

impl<G> RandomSource for G
where
    G: RngCore,
{
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Forwards each element independently with a fixed probability
pub struct RandomSample<G> {
    probability: f64,
    factory: Arc<G>,
}

/// Random sampling backed by the thread-local generator
pub type ThreadRandomSample = RandomSample<fn() -> ThreadRng>;

fn check_probability(probability: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(Error::invalid_argument(format!(
            "sample probability must be within [0, 1], got {probability}"
        )))
    }
}

/// Forward each element with probability `probability`, using the thread-local generator
pub fn random_sample(probability: f64) -> Result<ThreadRandomSample> {
    random_sample_with(probability, rand::thread_rng as fn() -> ThreadRng)
}

/// Like [`random_sample`], with a caller-provided random source.
///
/// `factory` is called once per pipeline instance, so every run draws from
/// its own source. Pass a closure building a seeded generator for
/// reproducible runs.
pub fn random_sample_with<G, S>(probability: f64, factory: G) -> Result<RandomSample<G>>
where
    G: Fn() -> S,
    S: RandomSource,
{
    Ok(RandomSample {
        probability: check_probability(probability)?,
        factory: Arc::new(factory),
    })
}

impl<G> RandomSample<G> {
    /// Probability that an element is forwarded
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<G> Clone for RandomSample<G> {
    fn clone(&self) -> Self {
        Self {
            probability: self.probability,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<G> fmt::Debug for RandomSample<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSample")
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

/// Reducer produced by [`RandomSample`]
#[derive(Debug)]
pub struct RandomSampleReducer<S, R> {
    probability: f64,
    rng: S,
    rf: R,
}

impl<G, S, R> Transform<R> for RandomSample<G>
where
    G: Fn() -> S,
    S: RandomSource,
{
    type Reducer = RandomSampleReducer<S, R>;

    fn apply(&self, rf: R) -> Self::Reducer {
        RandomSampleReducer {
            probability: self.probability,
            rng: (*self.factory)(),
            rf,
        }
    }
}

impl<A, T, S, R> Reducer<A, T> for RandomSampleReducer<S, R>
where
    S: RandomSource,
    R: Reducer<A, T>,
{
    fn step(&mut self, acc: A, item: T) -> Result<Step<A>> {
        if self.rng.next_f64() < self.probability {
            self.rf.step(acc, item)
        } else {
            Ok(Step::Continue(acc))
        }
    }

    fn complete(&mut self, acc: A) -> Result<A> {
        self.rf.complete(acc)
    }
}
