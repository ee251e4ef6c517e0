//! Research pipeline - the core of the crate.
//!
//! The pipeline orchestrates:
//! - Gate decision (is web search needed at all?)
//! - Query generation and search fan-out
//! - Round-robin deduplicated source selection
//! - Per-source fetch + passage extraction (failure-isolated)
//! - Context assembly and answer generation
//! - Citation and summary validation

pub mod context;
pub mod extract;
pub mod gate;
pub mod prompts;
pub mod queries;
pub mod run;
pub mod select;
pub mod validate;

pub use context::{assemble_context, render_failure_block, render_source_block};
pub use extract::{extract_passages, parse_passage_reply, MAX_PASSAGES, MAX_QUOTE_CHARS, MAX_WHY_CHARS};
pub use gate::decide_should_search;
pub use prompts::{
    format_answer_prompt, format_extract_prompt, format_gate_prompt, format_query_prompt,
    ANSWER_PROMPT, EXTRACT_PROMPT, GATE_PROMPT, QUERY_PROMPT,
};
pub use queries::{generate_queries, parse_query_reply};
pub use run::ResearchPipeline;
pub use select::{gather_buckets, select_sources};
pub use validate::{declared_source_ids, trailing_citations, validate_citations, validate_summary};
