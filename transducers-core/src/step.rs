//! Early-termination signal returned by every reducing step

/// The outcome of one reducing step.
///
/// `Continue` carries the updated accumulator. `Reduced` carries the final
/// accumulator and tells every caller up the chain, and finally the driver,
/// that no further elements may be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<A> {
    /// Keep reducing with this accumulator
    Continue(A),
    /// Reduction is complete; this is the final accumulator
    Reduced(A),
}

impl<A> Step<A> {
    /// Whether this step carries the early-termination signal
    pub fn is_reduced(&self) -> bool {
        matches!(self, Step::Reduced(_))
    }

    /// Unwrap the accumulator, dropping the signal if present
    pub fn into_inner(self) -> A {
        match self {
            Step::Continue(acc) | Step::Reduced(acc) => acc,
        }
    }

    /// Borrow the accumulator
    pub fn value(&self) -> &A {
        match self {
            Step::Continue(acc) | Step::Reduced(acc) => acc,
        }
    }

    /// Mark this step as final. A step that is already reduced is returned
    /// as is, so the signal is never nested.
    pub fn reduced(self) -> Self {
        Step::Reduced(self.into_inner())
    }

    /// Transform the accumulator while keeping the signal
    pub fn map<B, F>(self, f: F) -> Step<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Step::Continue(acc) => Step::Continue(f(acc)),
            Step::Reduced(acc) => Step::Reduced(f(acc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_is_idempotent() {
        let step = Step::Continue(3).reduced().reduced();

        assert_eq!(step, Step::Reduced(3));
        assert!(step.is_reduced());
    }

    #[test]
    fn test_into_inner_unwraps_both() {
        assert_eq!(Step::Continue("a").into_inner(), "a");
        assert_eq!(Step::Reduced("b").into_inner(), "b");
    }

    #[test]
    fn test_map_keeps_signal() {
        assert_eq!(Step::Reduced(2).map(|x| x * 10), Step::Reduced(20));
        assert_eq!(Step::Continue(2).map(|x| x + 1), Step::Continue(3));
        assert_eq!(*Step::Continue(5).value(), 5);
    }
}
