//! Typed errors for the research pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! The taxonomy follows the pipeline's propagation policy: transport
//! failures on search and fetch are [`FetchError`] and get swallowed
//! per-query / per-source by the orchestrator, while everything in
//! [`PipelineError`] aborts the whole run.

use thiserror::Error;

/// Errors that abort a research run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Model transport failure (HTTP, auth, rate limit).
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model reply not parseable as the required structure.
    #[error("malformed {stage} reply: {source}")]
    MalformedResponse {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An answer bullet violates the citation contract.
    #[error(transparent)]
    Citation(#[from] CitationError),

    /// The summary failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The run's outputs disagree with its own search state.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    /// JSON serialization error while building a prompt or artifact.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing API key, bad base URL).
    #[error("config error: {0}")]
    Config(String),
}

/// Citation contract violations in the final answer.
#[derive(Debug, Error)]
pub enum CitationError {
    /// A bullet does not end with a bracketed citation group.
    #[error("bullet missing ending citations: {bullet}")]
    MissingCitations { bullet: String },

    /// A bullet cites source IDs outside the declared set.
    #[error("bullet cites unknown sources {unknown:?}: {bullet}")]
    UnknownSources { bullet: String, unknown: Vec<String> },
}

/// Structural validation failures in the final answer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Summary field absent or blank.
    #[error("missing or empty summary")]
    EmptySummary,

    /// Summaries are synthesis, not citation-bearing.
    #[error("summary must not contain citations/brackets: {summary}")]
    BracketedSummary { summary: String },
}

/// Disagreements between the run's search state and its outputs.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    /// Search ran but round-robin selection produced nothing usable.
    #[error("search was performed but no sources survived selection")]
    NoSourcesSelected,

    /// The answer reply declares no sources despite a search having run.
    #[error("expected sources when did_search=true, got empty sources")]
    MissingDeclaredSources,
}

/// Transport errors from the search and fetch collaborators.
///
/// These never abort a run on their own: a failed search yields an empty
/// bucket and a failed fetch yields a degraded context block.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success HTTP status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for search/fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
