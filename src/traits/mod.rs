//! Core trait abstractions.
//!
//! Each trait is a seam for an external collaborator: the language
//! model, the web-search provider, the document fetcher, and the
//! optional artifact sink.

pub mod fetcher;
pub mod model;
pub mod searcher;
pub mod sink;

pub use fetcher::{Fetcher, HttpFetcher};
pub use model::CompletionModel;
pub use searcher::{MockWebSearcher, TavilyWebSearcher, WebSearcher};
pub use sink::{ArtifactSink, NoopSink};
