//! Per-source passage extraction.

use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::format_extract_prompt;
use crate::traits::CompletionModel;
use crate::types::Passage;

/// Maximum passages kept per source, regardless of how many the model
/// returned.
pub const MAX_PASSAGES: usize = 5;

/// Maximum quote length in characters.
pub const MAX_QUOTE_CHARS: usize = 300;

/// Maximum justification length in characters.
pub const MAX_WHY_CHARS: usize = 120;

/// The extraction reply shape: `{ "passages": [{"quote", "why"}] }`.
#[derive(Debug, Deserialize)]
struct PassageReply {
    #[serde(default)]
    passages: Vec<RawPassage>,
}

#[derive(Debug, Deserialize)]
struct RawPassage {
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    why: Option<String>,
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Parse and clean an extraction reply.
///
/// Unparseable replies fail with `MalformedResponse`. Cleanup trims both
/// fields, discards passages whose quote is empty after trimming, clamps
/// quote/justification lengths, and caps the list at [`MAX_PASSAGES`].
pub fn parse_passage_reply(raw: &str) -> Result<Vec<Passage>> {
    let reply: PassageReply =
        serde_json::from_str(raw).map_err(|source| PipelineError::MalformedResponse {
            stage: "extract",
            source,
        })?;

    let mut cleaned: Vec<Passage> = reply
        .passages
        .into_iter()
        .filter_map(|p| {
            let quote = p.quote.unwrap_or_default().trim().to_string();
            let why = p.why.unwrap_or_default().trim().to_string();
            if quote.is_empty() {
                return None;
            }
            Some(Passage {
                quote: truncate_chars(&quote, MAX_QUOTE_CHARS),
                why: truncate_chars(&why, MAX_WHY_CHARS),
            })
        })
        .collect();
    cleaned.truncate(MAX_PASSAGES);
    Ok(cleaned)
}

/// Extract 0-5 quote/justification pairs relevant to the question from
/// one fetched document.
///
/// Called once per selected source; the orchestrator isolates failures
/// here so one bad source cannot abort the run.
pub async fn extract_passages(
    model: &dyn CompletionModel,
    question: &str,
    title: &str,
    url: &str,
    text: &str,
) -> Result<Vec<Passage>> {
    let raw = model
        .complete(&format_extract_prompt(question, title, url, text))
        .await?;

    let passages = parse_passage_reply(&raw)?;
    debug!(url = %url, count = passages.len(), "extracted passages");
    Ok(passages)
}
