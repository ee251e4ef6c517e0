//! Document fetcher trait and the HTTP implementation.
//!
//! Turns a URL into cleaned, best-effort main text. Fetch failures are
//! per-source: the orchestrator catches them and degrades that source's
//! context block instead of aborting the run.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::types::FetchedDoc;

/// Fetch a URL and return cleaned page text, truncated to `max_chars`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, max_chars: usize) -> FetchResult<FetchedDoc>;
}

/// HTTP fetcher that strips page chrome and markup, keeping visible text.
///
/// Pulls all visible text from the page; readability-grade extraction is
/// out of scope.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a 15 second timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            user_agent: "citeseek/0.1 (research-assistant)".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client (e.g., with a different timeout).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Extract the `<title>` text, if any.
    fn extract_title(html: &str) -> Option<String> {
        let title_pattern = regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
        title_pattern
            .captures(html)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Strip non-content elements and tags, leaving collapsed visible text.
    fn clean_html(html: &str) -> String {
        let mut text = html.to_string();

        // Remove junk elements wholesale.
        for tag in ["script", "style", "noscript", "svg", "header", "footer", "nav", "aside"] {
            let pattern =
                regex::Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")).unwrap();
            text = pattern.replace_all(&text, " ").to_string();
        }

        // Remove remaining tags.
        let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
        text = tag_pattern.replace_all(&text, " ").to_string();

        // Decode common HTML entities.
        text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        // Collapse whitespace.
        let whitespace = regex::Regex::new(r"\s+").unwrap();
        whitespace.replace_all(&text, " ").trim().to_string()
    }

    /// Truncate on a char boundary, appending an ellipsis when cut.
    fn truncate_chars(text: String, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text;
        }
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> FetchResult<FetchedDoc> {
        let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, "fetching source document");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let title = Self::extract_title(&html);
        let text = Self::truncate_chars(Self::clean_html(&html), max_chars);

        Ok(FetchedDoc {
            url: url.to_string(),
            title,
            text,
        })
    }
}
