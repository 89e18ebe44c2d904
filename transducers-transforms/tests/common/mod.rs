//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::ops::Mul;

/// Install a test-friendly subscriber so `RUST_LOG`-style output shows up with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// `a, a*r, a*r^2, ...` without end
pub fn geometric<T>(a: T, r: T) -> impl Iterator<Item = T>
where
    T: Mul<Output = T> + Clone,
{
    std::iter::successors(Some(a), move |x| Some(x.clone() * r.clone()))
}

/// Wrap `iter` so that every pull increments `counter`
pub fn counted<'a, I>(iter: I, counter: &'a Cell<usize>) -> impl Iterator<Item = I::Item> + 'a
where
    I: Iterator + 'a,
{
    iter.inspect(move |_| counter.set(counter.get() + 1))
}
