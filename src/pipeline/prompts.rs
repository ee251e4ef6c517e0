//! LLM prompts for the research pipeline.

/// Prompt for the search gate decision.
pub const GATE_PROMPT: &str = r#"You decide whether web search is needed.
Today is {today}.

Return ONLY one word: YES or NO.

Say YES if:
- the question depends on recent info, prices, versions, current events, or anything likely to change
- OR the question asks about a field or topic that changes frequently
- OR you are not confident without verifying sources
- OR the user explicitly asks for sources

Say NO if:
- the question is conceptual or timeless (definitions, fundamentals) and can be answered without checking current sources

Question:
{question}
"#;

/// Prompt for generating search queries.
pub const QUERY_PROMPT: &str = r#"You generate web search queries.
Today is {today}.

Given the user's question, produce 1-3 search queries that would likely return authoritative and recent sources.
Prefer official docs and reputable sources when possible.

Return ONLY valid JSON in this exact format:
{
  "queries": ["..."]
}

Rules:
- 1 to 3 queries
- queries must be short (<= 12 words each)
- prefer official documentation, GitHub repos, reputable engineering blogs, or well-known vendors
- avoid listicles
- prefer resources that contain sources and examples
- no extra keys, no markdown

Question:
{question}
"#;

/// Prompt for extracting passages from one fetched document.
pub const EXTRACT_PROMPT: &str = r#"You extract the most relevant passages from a document.

Return ONLY valid JSON in this exact format:
{
  "passages": [
    {"quote": "...", "why": "..."}
  ]
}

Rules:
- Extract 3 to 5 passages.
- Each quote must be a direct excerpt from the provided document text.
- Each quote must be <= 300 characters.
- "why" must be <= 120 characters.
- No extra keys. No markdown.

Question:
{question}

Document:
TITLE: {title}
URL: {url}
TEXT:
{text}
"#;

/// Prompt for the final answer generation.
pub const ANSWER_PROMPT: &str = r#"You are a practical research assistant.
Return ONLY valid JSON matching this schema:

{
  "summary": "...",
  "answer_bullets": ["..."],
  "sources": {sources_json}
}

Rules:
- summary must be 1-3 sentences (<= 450 characters total).
- summary must be a high-level synthesis of the answer_bullets and the provided PASSAGES.
- summary must NOT include citations, brackets, or source IDs.
- Do not introduce new facts in summary that are not supported by the PASSAGES.
- answer_bullets must be 4-8 bullets.
- Every bullet MUST end with citations in square brackets, like: [S1] or [S1, S2].
- There must be no punctuation after the citation; the citation must be the last characters in the bullet.
- Citations must refer ONLY to the source IDs provided in sources (S1, S2, ...).
- You MUST use the provided sources list exactly (do not change it).
- No extra keys. No markdown. JSON only.
- Base claims only on the provided PASSAGES; if a detail isn't present, don't assert it.
- If the passages are empty or insufficient, set summary to a cautious statement about limited evidence and include 1 bullet noting that.

Search performed: {did_search}
Search queries: {search_queries}

Question: {question}

Source passages (may be empty):
{context}
"#;

/// Format the gate prompt.
pub fn format_gate_prompt(today: &str, question: &str) -> String {
    GATE_PROMPT
        .replace("{today}", today)
        .replace("{question}", question)
}

/// Format the query-generation prompt.
pub fn format_query_prompt(today: &str, question: &str) -> String {
    QUERY_PROMPT
        .replace("{today}", today)
        .replace("{question}", question)
}

/// Format the passage-extraction prompt.
pub fn format_extract_prompt(question: &str, title: &str, url: &str, text: &str) -> String {
    EXTRACT_PROMPT
        .replace("{question}", question)
        .replace("{title}", title)
        .replace("{url}", url)
        .replace("{text}", text)
}

/// Format the answer prompt.
///
/// `search_queries` and `sources_json` are JSON-encoded lists; the model
/// is required to echo the sources list verbatim.
pub fn format_answer_prompt(
    question: &str,
    context: &str,
    did_search: bool,
    search_queries: &str,
    sources_json: &str,
) -> String {
    ANSWER_PROMPT
        .replace("{sources_json}", sources_json)
        .replace("{did_search}", if did_search { "true" } else { "false" })
        .replace("{search_queries}", search_queries)
        .replace("{question}", question)
        .replace("{context}", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gate_prompt() {
        let formatted = format_gate_prompt("2026-08-30", "What changed in Rust 1.90?");
        assert!(formatted.contains("2026-08-30"));
        assert!(formatted.contains("What changed in Rust 1.90?"));
        assert!(!formatted.contains("{today}"));
    }

    #[test]
    fn test_format_extract_prompt() {
        let formatted = format_extract_prompt(
            "what is redis",
            "Redis Docs",
            "https://redis.io",
            "Redis is an in-memory store.",
        );
        assert!(formatted.contains("TITLE: Redis Docs"));
        assert!(formatted.contains("URL: https://redis.io"));
        assert!(formatted.contains("Redis is an in-memory store."));
    }

    #[test]
    fn test_format_answer_prompt_embeds_sources_verbatim() {
        let sources = r#"["S1: Redis Docs - https://redis.io"]"#;
        let formatted =
            format_answer_prompt("what is redis", "SOURCE_ID: S1", true, "[\"redis\"]", sources);

        assert!(formatted.contains(sources));
        assert!(formatted.contains("Search performed: true"));
        assert!(formatted.contains("SOURCE_ID: S1"));
        // Schema braces survive placeholder replacement.
        assert!(formatted.contains("\"answer_bullets\": [\"...\"]"));
    }
}
