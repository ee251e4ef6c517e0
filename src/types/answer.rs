//! Final answer types and the parsed model reply.

use serde::{Deserialize, Serialize};

/// The answer-generation reply as parsed from the model, before
/// validation.
///
/// Fields default so a structurally-valid JSON object with missing keys
/// parses; the orchestrator rejects missing summaries and broken
/// citations afterwards. Anything that is not a JSON object fails the
/// parse and aborts the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReply {
    /// High-level synthesis (no citations allowed).
    #[serde(default)]
    pub summary: Option<String>,

    /// Citation-bearing answer bullets.
    #[serde(default)]
    pub answer_bullets: Vec<String>,

    /// Declared source lines: `S<n>: <title> - <url>`.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Orchestration metadata attached to every result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    /// Whether web search ran for this question.
    pub did_search: bool,

    /// The queries fanned out (empty when search was skipped).
    pub search_queries: Vec<String>,

    /// Configured source cap for the run.
    pub max_sources: usize,

    /// Model identifier used for all completions.
    pub model: String,

    /// Unique run identifier.
    pub run_id: String,
}

/// The validated, citation-checked result of one research run.
///
/// This is the crate's only stable wire format; the metadata serializes
/// under the `_meta` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub summary: String,

    /// 4-8 bullets, each ending with a bracketed citation group when
    /// sources were declared.
    pub answer_bullets: Vec<String>,

    /// Declared source lines in ordinal order. Empty when search was
    /// skipped.
    pub sources: Vec<String>,

    #[serde(rename = "_meta")]
    pub meta: RunMeta,
}
