//! Transform library for transducer pipelines
//!
//! Every constructor here returns a value implementing
//! [`transducers_core::Transform`]. Stateless transforms (`mapping`,
//! `filtering`, `cat`, ...) hold only their configuration. Stateful ones
//! (`taking`, `dedupe`, `partition_by`, ...) create their counters and buffers
//! inside `apply`, so one definition can be reused across runs without sharing
//! state between them.
//!
//! ```
//! use transducers_core::{compose, sink, transduce};
//! use transducers_transforms::{filtering, mapping, taking};
//!
//! let xf = compose![filtering(|x: &u64| x % 2 == 1), mapping(|x: u64| x * x), taking(3)];
//! let out = transduce(xf, sink::append, Vec::new(), 0u64..).unwrap();
//! assert_eq!(out, vec![1, 9, 25]);
//! ```

#![warn(missing_docs)]

pub mod cat;
pub mod dedupe;
pub mod drop;
pub mod filter;
pub mod map;
pub mod partition;
pub mod sample;
pub mod take;

pub use cat::{cat, Cat};
pub use dedupe::{dedupe, Dedupe};
pub use drop::{drop, drop_while, DropWhile, Dropping};
pub use filter::{filtering, remove, Filtering};
pub use map::{
    keep, keep_indexed, mapcatting, mapping, replace, try_mapping, Keep, KeepIndexed, Mapping,
    Replace, TryMapping,
};
pub use partition::{partition_all, partition_by, PartitionAll, PartitionBy};
pub use sample::{random_sample, random_sample_with, RandomSample, RandomSource, ThreadRandomSample};
pub use take::{take_nth, take_while, taking, TakeNth, TakeWhile, Taking};

/// Core protocol and every transform constructor
pub mod prelude {
    pub use crate::{
        cat, dedupe, drop, drop_while, filtering, keep, keep_indexed, mapcatting, mapping,
        partition_all, partition_by, random_sample, random_sample_with, remove, replace,
        take_nth, take_while, taking, try_mapping,
    };
    pub use transducers_core::prelude::*;
    pub use transducers_core::sink;
}
