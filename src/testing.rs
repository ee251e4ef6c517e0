//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline
//! without making real model or network calls. `MockWebSearcher` lives
//! next to the searcher trait.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult, PipelineError, Result};
use crate::traits::{CompletionModel, Fetcher};
use crate::types::FetchedDoc;

/// A mock completion model replaying a scripted sequence of replies.
///
/// Replies are consumed in FIFO order, one per `complete` call, which
/// matches the pipeline's fixed call order (gate, queries, one extract
/// per source, answer). Every received prompt is recorded for
/// assertions. A call past the end of the script fails, which usually
/// means the test scripted fewer replies than the pipeline needed.
///
/// Clones share the script and the recorded prompts, so a test can keep
/// a handle for assertions after handing the model to a pipeline.
#[derive(Clone, Default)]
pub struct MockModel {
    replies: Arc<RwLock<VecDeque<String>>>,
    prompts: Arc<RwLock<Vec<String>>>,
    model_id: String,
}

impl MockModel {
    /// Create a new mock model with an empty script.
    pub fn new() -> Self {
        Self {
            model_id: "mock-model".to_string(),
            ..Default::default()
        }
    }

    /// Append one reply to the script.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(reply.into());
        self
    }

    /// Append several replies to the script.
    pub fn with_replies(self, replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        {
            let mut queue = self.replies.write().unwrap();
            for reply in replies {
                queue.push_back(reply.into());
            }
        }
        self
    }

    /// Set the reported model identifier.
    pub fn with_model_id(mut self, id: impl Into<String>) -> Self {
        self.model_id = id.into();
        self
    }

    /// All prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        self.replies.write().unwrap().pop_front().ok_or_else(|| {
            PipelineError::Model(Box::new(std::io::Error::other(
                "mock model script exhausted",
            )))
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// A mock fetcher returning predefined documents by URL.
#[derive(Default)]
pub struct MockFetcher {
    docs: Arc<RwLock<HashMap<String, FetchedDoc>>>,
    fail_urls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined document for a URL.
    pub fn with_doc(self, url: &str, title: Option<&str>, text: &str) -> Self {
        self.docs.write().unwrap().insert(
            url.to_string(),
            FetchedDoc {
                url: url.to_string(),
                title: title.map(|t| t.to_string()),
                text: text.to_string(),
            },
        );
        self
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: &str) -> Self {
        self.fail_urls.write().unwrap().push(url.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> FetchResult<FetchedDoc> {
        if self.fail_urls.read().unwrap().iter().any(|u| u == url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        let mut doc = self
            .docs
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::InvalidUrl {
                url: url.to_string(),
            })?;

        if doc.text.chars().count() > max_chars {
            doc.text = doc.text.chars().take(max_chars).collect();
        }
        Ok(doc)
    }
}
