//! Search query generation.

use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::format_query_prompt;
use crate::traits::CompletionModel;
use crate::types::RunContext;

/// The query-generation reply shape: `{ "queries": [...] }`.
///
/// Entries are kept loosely typed so non-string junk can be dropped
/// instead of failing the whole parse.
#[derive(Debug, Deserialize)]
struct QueryPlan {
    #[serde(default)]
    queries: Vec<serde_json::Value>,
}

/// Parse and clean a query-generation reply.
///
/// Unparseable replies fail with `MalformedResponse`. Cleanup drops
/// non-string and whitespace-only entries, trims the rest, and truncates
/// to `max_queries`. The result may be empty; the orchestrator falls
/// back to the original question in that case.
pub fn parse_query_reply(raw: &str, max_queries: usize) -> Result<Vec<String>> {
    let plan: QueryPlan =
        serde_json::from_str(raw).map_err(|source| PipelineError::MalformedResponse {
            stage: "query",
            source,
        })?;

    let mut queries: Vec<String> = plan
        .queries
        .into_iter()
        .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|q| !q.is_empty())
        .collect();
    queries.truncate(max_queries);
    Ok(queries)
}

/// Ask the model for up to `max_queries` short search queries.
pub async fn generate_queries(
    model: &dyn CompletionModel,
    question: &str,
    ctx: &RunContext,
    max_queries: usize,
) -> Result<Vec<String>> {
    let raw = model
        .complete(&format_query_prompt(&ctx.today, question))
        .await?;

    let queries = parse_query_reply(&raw, max_queries)?;
    debug!(count = queries.len(), "generated search queries");
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_caps() {
        let raw = r#"{"queries": ["  redis persistence  ", "redis aof vs rdb", "redis docs", "extra"]}"#;
        let queries = parse_query_reply(raw, 3).unwrap();
        assert_eq!(
            queries,
            vec!["redis persistence", "redis aof vs rdb", "redis docs"]
        );
    }

    #[test]
    fn test_parse_drops_non_string_and_blank_entries() {
        let raw = r#"{"queries": ["valid", 42, null, "   ", {"q": "no"}, "also valid"]}"#;
        let queries = parse_query_reply(raw, 3).unwrap();
        assert_eq!(queries, vec!["valid", "also valid"]);
    }

    #[test]
    fn test_parse_missing_field_yields_empty() {
        let queries = parse_query_reply("{}", 3).unwrap();
        assert!(queries.is_empty());
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let err = parse_query_reply("Here are some queries:", 3).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedResponse { stage: "query", .. }
        ));
    }
}
