//! Transform trait, composition and run-time transform chains

use std::fmt;

use crate::reducer::{BoxedReducer, Reducer};

/// A transformation stage: adapts a downstream reducer into a new reducer.
///
/// `apply` is called once per pipeline instance. Stateful transforms must
/// allocate their private state inside `apply`, so that applying the same
/// transform twice yields two independent reducers.
pub trait Transform<R> {
    /// The reducer produced by wrapping `R`
    type Reducer;

    /// Wrap `downstream` with this stage
    fn apply(&self, downstream: R) -> Self::Reducer;
}

impl<R, X> Transform<R> for &X
where
    X: Transform<R> + ?Sized,
{
    type Reducer = X::Reducer;

    fn apply(&self, downstream: R) -> Self::Reducer {
        (**self).apply(downstream)
    }
}

/// The identity transform: hands the downstream reducer back unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<R> Transform<R> for Identity {
    type Reducer = R;

    fn apply(&self, downstream: R) -> R {
        downstream
    }
}

/// Two transforms run one after the other.
///
/// Data flows through `first`, then `second`. Construction nests the other
/// way round: `second` wraps the downstream reducer, then `first` wraps that.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compose<X, Y> {
    first: X,
    second: Y,
}

/// Compose two transforms; elements pass through `first` before `second`
pub fn compose<X, Y>(first: X, second: Y) -> Compose<X, Y> {
    Compose { first, second }
}

impl<X, Y> Compose<X, Y> {
    /// The stage that sees raw input
    pub fn first(&self) -> &X {
        &self.first
    }

    /// The stage that feeds the downstream reducer
    pub fn second(&self) -> &Y {
        &self.second
    }
}

impl<R, X, Y> Transform<R> for Compose<X, Y>
where
    Y: Transform<R>,
    X: Transform<Y::Reducer>,
{
    type Reducer = X::Reducer;

    fn apply(&self, downstream: R) -> Self::Reducer {
        self.first.apply(self.second.apply(downstream))
    }
}

/// Compose any number of transforms, in processing order.
///
/// `compose![]` is [`Identity`], `compose![a]` is `a`, and
/// `compose![a, b, c]` is `compose(a, compose(b, c))`.
#[macro_export]
macro_rules! compose {
    () => {
        $crate::transform::Identity
    };
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::transform::compose($first, $crate::compose!($($rest),+))
    };
}

/// Method-style composition for any transform
pub trait TransformExt: Sized {
    /// Run `self`, then `next`
    fn then<Y>(self, next: Y) -> Compose<Self, Y> {
        compose(self, next)
    }
}

impl<X> TransformExt for X {}

type StageFn<A, T> =
    Box<dyn Fn(BoxedReducer<'static, A, T>) -> BoxedReducer<'static, A, T> + Send + Sync>;

struct Stage<A, T> {
    name: String,
    wrap: StageFn<A, T>,
}

/// A chain of transforms assembled at run time and executed as a single transform.
///
/// All stages map `T` to `T`, so the chain can be built from configuration
/// or user input. An empty chain behaves as the identity.
pub struct TransformChain<A, T> {
    /// The stages in processing order
    stages: Vec<Stage<A, T>>,
}

impl<A: 'static, T: 'static> TransformChain<A, T> {
    /// Create an empty transform chain
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage at the end of the chain
    pub fn push<X>(&mut self, name: impl Into<String>, stage: X) -> &mut Self
    where
        X: Transform<BoxedReducer<'static, A, T>> + Send + Sync + 'static,
        X::Reducer: Reducer<A, T> + 'static,
    {
        let wrap: StageFn<A, T> = Box::new(
            move |downstream: BoxedReducer<'static, A, T>| -> BoxedReducer<'static, A, T> {
                Box::new(stage.apply(downstream))
            },
        );
        self.stages.push(Stage {
            name: name.into(),
            wrap,
        });
        self
    }

    /// Builder-style variant of [`TransformChain::push`]
    #[must_use]
    pub fn with_stage<X>(mut self, name: impl Into<String>, stage: X) -> Self
    where
        X: Transform<BoxedReducer<'static, A, T>> + Send + Sync + 'static,
        X::Reducer: Reducer<A, T> + 'static,
    {
        self.push(name, stage);
        self
    }

    /// Number of stages in this chain
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in processing order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name.as_str()).collect()
    }
}

impl<A: 'static, T: 'static> Default for TransformChain<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T> fmt::Debug for TransformChain<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<A, T, R> Transform<R> for TransformChain<A, T>
where
    A: 'static,
    T: 'static,
    R: Reducer<A, T> + 'static,
{
    type Reducer = BoxedReducer<'static, A, T>;

    fn apply(&self, downstream: R) -> Self::Reducer {
        tracing::trace!(stages = self.stages.len(), "building transform chain");
        let innermost: BoxedReducer<'static, A, T> = Box::new(downstream);
        self.stages
            .iter()
            .rev()
            .fold(innermost, |reducer, stage| (stage.wrap)(reducer))
    }
}
