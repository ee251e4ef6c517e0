//! Web searcher trait for query fan-out.
//!
//! Abstracts over search providers (Tavily, SerpAPI, etc.). The
//! orchestrator fans generated queries out through this trait and
//! treats any per-query failure as an empty result bucket rather than
//! aborting the run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, FetchResult};
use crate::security::SecretString;
use crate::types::SearchResult;

/// Web search for one query.
///
/// # Implementations
///
/// - [`TavilyWebSearcher`] - Tavily API
/// - [`MockWebSearcher`] - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning results in provider rank order.
    async fn search(&self, query: &str) -> FetchResult<Vec<SearchResult>>;

    /// Search with a specific result limit.
    async fn search_with_limit(
        &self,
        query: &str,
        limit: usize,
    ) -> FetchResult<Vec<SearchResult>> {
        let mut results = self.search(query).await?;
        results.truncate(limit);
        Ok(results)
    }
}

/// Mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    results: std::sync::RwLock<std::collections::HashMap<String, Vec<SearchResult>>>,
    fail_queries: std::sync::RwLock<Vec<String>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Add (title, url, snippet) triples as results for a query.
    pub fn with_hits(self, query: &str, hits: &[(&str, &str, &str)]) -> Self {
        let results = hits
            .iter()
            .map(|(title, url, snippet)| SearchResult::new(*title, *url, *snippet))
            .collect();
        self.with_results(query, results)
    }

    /// Mark a query as failing.
    pub fn fail_query(self, query: &str) -> Self {
        self.fail_queries.write().unwrap().push(query.to_string());
        self
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> FetchResult<Vec<SearchResult>> {
        if self.fail_queries.read().unwrap().iter().any(|q| q == query) {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock search refused",
            ))));
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Tavily-backed web searcher.
pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    search_depth: String,
}

impl TavilyWebSearcher {
    /// Create a new Tavily web searcher.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            client: reqwest::Client::new(),
            search_depth: "basic".to_string(),
        }
    }

    /// Create from the `TAVILY_API_KEY` environment variable.
    pub fn from_env() -> crate::error::Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                crate::error::PipelineError::Config("TAVILY_API_KEY is not set".to_string())
            })?;
        Ok(Self::new(api_key))
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    async fn search(&self, query: &str) -> FetchResult<Vec<SearchResult>> {
        self.search_with_limit(query, 5).await
    }

    async fn search_with_limit(
        &self,
        query: &str,
        limit: usize,
    ) -> FetchResult<Vec<SearchResult>> {
        #[derive(Serialize)]
        struct Request<'a> {
            query: &'a str,
            search_depth: &'a str,
            max_results: usize,
            include_answer: bool,
            include_raw_content: bool,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            results: Vec<TavilyResult>,
        }

        #[derive(Deserialize)]
        struct TavilyResult {
            #[serde(default)]
            title: Option<String>,
            #[serde(default)]
            url: Option<String>,
            #[serde(default)]
            content: Option<String>,
        }

        let request = Request {
            query,
            search_depth: &self.search_depth,
            max_results: limit,
            include_answer: false,
            include_raw_content: false,
        };

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: "https://api.tavily.com/search".to_string(),
                status: status.as_u16(),
            });
        }

        let tavily_response: Response = response
            .json()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let results = tavily_response
            .results
            .into_iter()
            .map(|r| {
                SearchResult::new(
                    r.title.unwrap_or_default().trim(),
                    r.url.unwrap_or_default().trim(),
                    r.content.unwrap_or_default().trim(),
                )
            })
            // Drop empties: a hit needs a URL plus at least one of
            // title/snippet to be worth selecting.
            .filter(|r| !r.url.is_empty() && (!r.title.is_empty() || !r.snippet.is_empty()))
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_web_searcher() {
        let searcher = MockWebSearcher::new().with_hits(
            "redis persistence",
            &[
                ("Redis Persistence", "https://redis.io/persistence", "RDB and AOF"),
                ("AOF docs", "https://redis.io/aof", ""),
            ],
        );

        let results = searcher.search("redis persistence").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://redis.io/persistence");

        // Unknown query yields an empty bucket, not an error.
        let empty = searcher.search("unknown").await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_search_with_limit() {
        let searcher = MockWebSearcher::new().with_hits(
            "query",
            &[
                ("a", "https://a.com", ""),
                ("b", "https://b.com", ""),
                ("c", "https://c.com", ""),
                ("d", "https://d.com", ""),
            ],
        );

        let results = searcher.search_with_limit("query", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_fail_query() {
        let searcher = MockWebSearcher::new().fail_query("down");
        assert!(searcher.search("down").await.is_err());
    }
}
