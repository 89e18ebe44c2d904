//! Driver configuration

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::driver::Transducer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransduceConfig {
    /// Label recorded on the tracing span of every run
    pub label: String,

    /// Maximum number of items that may be pulled from the source.
    ///
    /// The source is never advanced beyond this many items. Reaching the
    /// limit fails the run with `PullLimitExceeded` unless the source's size
    /// hint reports that it is exhausted. `None` lets the pipeline alone
    /// decide when to stop, which is what an unbounded source composed
    /// behind `taking` relies on.
    pub pull_limit: Option<u64>,

    /// Whether to measure wall-clock time of each run
    pub collect_stats: bool,
}

impl Default for TransduceConfig {
    fn default() -> Self {
        Self {
            label: "transduce".to_string(),
            pull_limit: None,
            collect_stats: true,
        }
    }
}

impl TransduceConfig {
    /// Set the tracing label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Limit the number of items pulled from the source
    #[must_use]
    pub fn with_pull_limit(mut self, limit: u64) -> Self {
        self.pull_limit = Some(limit);
        self
    }

    /// Enable or disable timing
    #[must_use]
    pub fn with_stats(mut self, collect_stats: bool) -> Self {
        self.collect_stats = collect_stats;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransduceConfig::default();

        assert_eq!(config.label, "transduce");
        assert_eq!(config.pull_limit, None);
        assert!(config.collect_stats);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TransduceConfig = serde_json::from_str(r#"{"pull_limit": 50}"#).unwrap();

        assert_eq!(config, TransduceConfig::default().with_pull_limit(50));
    }

    #[test]
    fn test_builders() {
        let config = TransduceConfig::default()
            .with_label("ingest")
            .with_stats(false);

        assert_eq!(config.label, "ingest");
        assert!(!config.collect_stats);
    }
}
