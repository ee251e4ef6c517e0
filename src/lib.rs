//! Citation-grounded web research for question answering.
//!
//! Given a question, the pipeline decides whether web research is
//! warranted, fans out search queries, selects a deduplicated set of
//! sources, extracts verbatim passages from each, and generates an
//! answer whose bullets carry trailing source citations. Citations are
//! validated against the selected sources before anything is returned.
//!
//! The model, searcher and fetcher are trait seams, so the whole
//! pipeline runs against mocks in tests and against OpenAI + Tavily +
//! plain HTTP in production.
//!
//! # Example
//!
//! ```rust,ignore
//! use citeseek::{FsBundle, HttpFetcher, OpenAiModel, ResearchPipeline, TavilyWebSearcher};
//!
//! let pipeline = ResearchPipeline::new(
//!     OpenAiModel::from_env()?,
//!     TavilyWebSearcher::from_env()?,
//!     HttpFetcher::new(),
//! )
//! .with_sink(FsBundle::new("runs"));
//!
//! let result = pipeline.ask("What changed in Redis 8?").await?;
//! println!("{}", result.summary);
//! ```

pub mod ai;
pub mod bundle;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

pub use ai::OpenAiModel;
pub use bundle::FsBundle;
pub use error::{
    CitationError, ConsistencyError, FetchError, PipelineError, Result, ValidationError,
};
pub use pipeline::ResearchPipeline;
pub use traits::{
    ArtifactSink, CompletionModel, Fetcher, HttpFetcher, MockWebSearcher, NoopSink,
    TavilyWebSearcher, WebSearcher,
};
pub use types::{
    AnswerResult, FetchedDoc, Passage, PipelineConfig, RunContext, RunMeta, SearchResult,
    SelectedSource,
};
