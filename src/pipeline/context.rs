//! Evidence context assembly.
//!
//! Renders one block per selected source and concatenates them, blank
//! line separated, in selection order. The concatenation is the evidence
//! context handed to answer generation.

use crate::types::{Passage, SelectedSource};

/// Render the context block for a successfully extracted source.
pub fn render_source_block(source: &SelectedSource, passages: &[Passage]) -> String {
    let mut lines = vec![
        format!("SOURCE_ID: {}", source.id()),
        format!("TITLE: {}", source.result.title),
        format!("URL: {}", source.result.url),
        "PASSAGES:".to_string(),
    ];

    for p in passages {
        lines.push(format!("- {}  (why: {})", p.quote, p.why));
    }

    lines.join("\n")
}

/// Render the degraded block for a source whose fetch or extraction
/// failed.
///
/// Keeps the run going with the error message and the original search
/// snippet as fallback evidence.
pub fn render_failure_block(source: &SelectedSource, error: &str) -> String {
    format!(
        "SOURCE_ID: {id}\nTITLE: {title}\nURL: {url}\nPASSAGES:\n- (EXTRACTION FAILED: {error})\n- SNIPPET: {snippet}",
        id = source.id(),
        title = source.result.title,
        url = source.result.url,
        snippet = source.result.snippet,
    )
}

/// Join per-source blocks into the final context, in selection order.
pub fn assemble_context(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;

    fn source() -> SelectedSource {
        SelectedSource::new(
            2,
            SearchResult::new("Redis Docs", "https://redis.io", "In-memory data store"),
        )
    }

    #[test]
    fn test_render_source_block() {
        let passages = vec![
            Passage {
                quote: "Redis is in-memory.".to_string(),
                why: "storage model".to_string(),
            },
            Passage {
                quote: "AOF logs writes.".to_string(),
                why: "persistence".to_string(),
            },
        ];

        let block = render_source_block(&source(), &passages);
        assert!(block.starts_with("SOURCE_ID: S2\n"));
        assert!(block.contains("TITLE: Redis Docs"));
        assert!(block.contains("- Redis is in-memory.  (why: storage model)"));
        assert!(block.contains("- AOF logs writes.  (why: persistence)"));
    }

    #[test]
    fn test_render_source_block_zero_passages() {
        let block = render_source_block(&source(), &[]);
        assert!(block.ends_with("PASSAGES:"));
    }

    #[test]
    fn test_render_failure_block_includes_error_and_snippet() {
        let block = render_failure_block(&source(), "HTTP 503 fetching https://redis.io");
        assert!(block.contains("EXTRACTION FAILED: HTTP 503"));
        assert!(block.contains("- SNIPPET: In-memory data store"));
    }

    #[test]
    fn test_assemble_context_blank_line_separated() {
        let blocks = vec!["A".to_string(), "B".to_string()];
        assert_eq!(assemble_context(&blocks), "A\n\nB");
        assert_eq!(assemble_context(&[]), "");
    }
}
