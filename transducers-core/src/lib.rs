//! Core protocol, composition and drivers for transducer pipelines
//!
//! A transducer pipeline is a chain of transforms that each wrap a reducing
//! function. The pipeline is independent of where elements come from (any
//! [`Source`], including unbounded ones) and of how they are accumulated (any
//! [`Reducer`], or a plain `(acc, item) -> acc` function). No intermediate
//! collections are built, and early termination travels as a returned
//! [`Step::Reduced`] value that stops the driver from pulling further input.
//!
//! ```
//! use transducers_core::{compose, sink, transduce, Identity};
//!
//! let total = transduce(compose(Identity, Identity), sink::sum, 0, 1..=4).unwrap();
//! assert_eq!(total, 10);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod eduction;
pub mod error;
pub mod reducer;
pub mod sink;
pub mod source;
pub mod step;
pub mod transform;

// Re-export key types for convenience
pub use config::TransduceConfig;
pub use driver::{into, reduce, transduce, transduce_with, TransduceOutcome, TransduceStats, Transducer};
pub use eduction::{eduction, Eduction};
pub use error::{Error, Result};
pub use reducer::{
    completing, completing_with, reducer_fn, try_completing, BoxedReducer, Completing,
    CompletingWith, Extender, Reducer, ReducerFn, TryCompleting,
};
pub use source::{Source, TrySource};
pub use step::Step;
pub use transform::{compose, Compose, Identity, Transform, TransformChain, TransformExt};

/// Everything needed to define and run pipelines
pub mod prelude {
    pub use crate::compose;
    pub use crate::driver::{into, reduce, transduce, transduce_with, Transducer};
    pub use crate::eduction::eduction;
    pub use crate::error::{Error, Result};
    pub use crate::reducer::{completing, Reducer};
    pub use crate::source::Source;
    pub use crate::step::Step;
    pub use crate::transform::{Transform, TransformExt};
}
