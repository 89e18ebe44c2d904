//! Error types for transducer pipelines

use thiserror::Error;

/// Result type for transducer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for transducer operations
///
/// Early termination is not an error: it travels as [`crate::Step::Reduced`].
/// Exhaustion of the input is not an error either.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument passed to a transform constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A caller-supplied function (mapping, reducing step, ...) failed.
    ///
    /// The original error is carried unmodified and can be recovered with
    /// [`anyhow::Error::downcast_ref`].
    #[error("Callback failed: {0}")]
    Callback(anyhow::Error),

    /// The input producer failed to deliver its next element
    #[error("Source error: {0}")]
    Source(anyhow::Error),

    /// The configured pull limit was reached before the reduction finished
    #[error("Pull limit exceeded: more than {limit} items requested from the source")]
    PullLimitExceeded {
        /// Maximum number of items the driver was allowed to pull
        limit: u64,
    },
}

impl Error {
    /// Wrap an error raised by caller-supplied code
    pub fn callback(err: impl Into<anyhow::Error>) -> Self {
        Error::Callback(err.into())
    }

    /// Wrap an error raised by an input producer
    pub fn producer(err: impl Into<anyhow::Error>) -> Self {
        Error::Source(err.into())
    }

    /// Build an [`Error::InvalidArgument`] and log it at the point of construction
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "rejected transform argument");
        Error::InvalidArgument(message)
    }

    /// Returns the caller's original error, if this error came from a callback
    pub fn callback_error(&self) -> Option<&anyhow::Error> {
        match self {
            Error::Callback(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("bad input {0}")]
    struct BadInput(i32);

    #[test]
    fn test_callback_error_keeps_original() {
        let err = Error::callback(BadInput(7));

        let original = err
            .callback_error()
            .and_then(|e| e.downcast_ref::<BadInput>());
        assert_eq!(original, Some(&BadInput(7)));
        assert_eq!(err.to_string(), "Callback failed: bad input 7");
    }

    #[test]
    fn test_non_callback_has_no_callback_error() {
        let err = Error::invalid_argument("n must be positive");

        assert!(err.callback_error().is_none());
        assert_eq!(err.to_string(), "Invalid argument: n must be positive");
    }

    #[test]
    fn test_pull_limit_message() {
        let err = Error::PullLimitExceeded { limit: 10 };

        assert_eq!(
            err.to_string(),
            "Pull limit exceeded: more than 10 items requested from the source"
        );
    }
}
