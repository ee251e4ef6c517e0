//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Knobs for one research run.
///
/// All fields have defaults and are caller-overridable; there is no
/// process-wide configuration. Model identity and sampling temperature
/// live on the [`CompletionModel`](crate::traits::CompletionModel)
/// implementation, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of sources selected per run.
    ///
    /// Default: 5.
    pub max_sources: usize,

    /// Maximum characters fetched per source document.
    ///
    /// Default: 6000.
    pub max_chars_per_source: usize,

    /// Maximum search queries generated from one question.
    ///
    /// Default: 3.
    pub max_queries: usize,

    /// Floor for the per-query candidate pool.
    ///
    /// Each query's result list is capped at
    /// `max(max_sources, per_query_floor)` before merging. A tunable,
    /// not a derived invariant.
    ///
    /// Default: 5.
    pub per_query_floor: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_sources: 5,
            max_chars_per_source: 6000,
            max_queries: 3,
            per_query_floor: 5,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of sources.
    pub fn with_max_sources(mut self, max: usize) -> Self {
        self.max_sources = max;
        self
    }

    /// Set the maximum characters fetched per source.
    pub fn with_max_chars_per_source(mut self, max: usize) -> Self {
        self.max_chars_per_source = max;
        self
    }

    /// Set the maximum number of generated queries.
    pub fn with_max_queries(mut self, max: usize) -> Self {
        self.max_queries = max;
        self
    }

    /// Set the per-query candidate pool floor.
    pub fn with_per_query_floor(mut self, floor: usize) -> Self {
        self.per_query_floor = floor;
        self
    }

    /// Candidate pool size requested from the searcher for each query.
    pub fn per_query_limit(&self) -> usize {
        self.max_sources.max(self.per_query_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_sources, 5);
        assert_eq!(config.max_chars_per_source, 6000);
        assert_eq!(config.max_queries, 3);
    }

    #[test]
    fn test_per_query_limit_floor() {
        // The floor wins when max_sources is small.
        let config = PipelineConfig::new().with_max_sources(2);
        assert_eq!(config.per_query_limit(), 5);

        let config = PipelineConfig::new().with_max_sources(8);
        assert_eq!(config.per_query_limit(), 8);

        let config = PipelineConfig::new()
            .with_max_sources(2)
            .with_per_query_floor(1);
        assert_eq!(config.per_query_limit(), 2);
    }
}
