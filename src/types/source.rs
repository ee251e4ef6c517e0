//! Source and passage types.

use serde::{Deserialize, Serialize};

/// A single web search hit.
///
/// The URL is the dedup key during selection; title and snippet may be
/// empty. Results with an empty (trimmed) URL are unusable and get
/// skipped silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    /// Create a new search result.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Ordered results produced by one query. May be empty, e.g. when that
/// query's search call failed.
pub type SourceBucket = Vec<SearchResult>;

/// A search result promoted to the run's final source list.
///
/// Tagged with the 1-based ordinal assigned at selection time; the
/// `S<n>` label is the only identifier the rest of the pipeline and the
/// final answer may reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedSource {
    /// 1-based rank in selection order.
    pub ordinal: usize,

    /// The underlying search result.
    #[serde(flatten)]
    pub result: SearchResult,
}

impl SelectedSource {
    /// Promote a search result with the given ordinal.
    pub fn new(ordinal: usize, result: SearchResult) -> Self {
        Self { ordinal, result }
    }

    /// The `S<n>` source ID.
    pub fn id(&self) -> String {
        format!("S{}", self.ordinal)
    }

    /// The declared-source line: `S<n>: <title> - <url>`.
    pub fn labeled_line(&self) -> String {
        format!("{}: {} - {}", self.id(), self.result.title, self.result.url)
    }
}

/// A short verbatim excerpt plus justification extracted from a fetched
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Direct excerpt from the document text (at most 300 chars).
    pub quote: String,

    /// Why the excerpt matters for the question (at most 120 chars).
    pub why: String,
}

/// A fetched, cleaned document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedDoc {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_source_labels() {
        let source = SelectedSource::new(
            3,
            SearchResult::new("Redis Docs", "https://redis.io/docs", "In-memory store"),
        );
        assert_eq!(source.id(), "S3");
        assert_eq!(source.labeled_line(), "S3: Redis Docs - https://redis.io/docs");
    }

    #[test]
    fn test_search_result_optional_fields_deserialize() {
        let r: SearchResult = serde_json::from_str(r#"{"url": "https://a.com"}"#).unwrap();
        assert_eq!(r.url, "https://a.com");
        assert!(r.title.is_empty());
        assert!(r.snippet.is_empty());
    }
}
