//! Data types for the research pipeline.

pub mod answer;
pub mod config;
pub mod context;
pub mod source;

pub use answer::{AnswerReply, AnswerResult, RunMeta};
pub use config::PipelineConfig;
pub use context::RunContext;
pub use source::{FetchedDoc, Passage, SearchResult, SelectedSource, SourceBucket};
