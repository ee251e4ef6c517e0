//! The research orchestrator - main entry point of the crate.
//!
//! Walks one question through the full state machine: gate decision,
//! query generation, search fan-out, round-robin source selection,
//! per-source fetch + passage extraction, context assembly, answer
//! generation, and citation/summary validation.
//!
//! Per-source failures degrade that source's context block; everything
//! else that goes wrong aborts the run with no partial result.

use serde_json::json;
use tracing::{info, warn};

use crate::bundle::{new_run_id, url_hash};
use crate::error::{ConsistencyError, PipelineError, Result, ValidationError};
use crate::pipeline::context::{assemble_context, render_failure_block, render_source_block};
use crate::pipeline::extract::extract_passages;
use crate::pipeline::gate::decide_should_search;
use crate::pipeline::prompts::format_answer_prompt;
use crate::pipeline::queries::generate_queries;
use crate::pipeline::select::{gather_buckets, select_sources};
use crate::pipeline::validate::{validate_citations, validate_summary};
use crate::traits::{
    sink::{ArtifactSink, NoopSink},
    CompletionModel, Fetcher, WebSearcher,
};
use crate::types::{
    AnswerReply, AnswerResult, Passage, PipelineConfig, RunContext, RunMeta, SelectedSource,
};

/// The research-and-answer pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ResearchPipeline::new(model, searcher, fetcher)
///     .with_config(PipelineConfig::new().with_max_sources(3))
///     .with_sink(FsBundle::new("runs"));
///
/// let result = pipeline.ask("What changed in Redis 8?").await?;
/// ```
pub struct ResearchPipeline<M: CompletionModel, S: WebSearcher, F: Fetcher> {
    model: M,
    searcher: S,
    fetcher: F,
    sink: Box<dyn ArtifactSink>,
    config: PipelineConfig,
}

impl<M: CompletionModel, S: WebSearcher, F: Fetcher> ResearchPipeline<M, S, F> {
    /// Create a pipeline with default configuration and no artifact
    /// persistence.
    pub fn new(model: M, searcher: S, fetcher: F) -> Self {
        Self {
            model,
            searcher,
            fetcher,
            sink: Box::new(NoopSink),
            config: PipelineConfig::default(),
        }
    }

    /// Set the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a write-behind artifact sink.
    pub fn with_sink(mut self, sink: impl ArtifactSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Answer a question, researching the web first when the gate says
    /// so.
    pub async fn ask(&self, question: &str) -> Result<AnswerResult> {
        self.ask_with_context(question, &RunContext::now()).await
    }

    /// Answer a question with an explicit temporal context (useful for
    /// tests and replays).
    pub async fn ask_with_context(
        &self,
        question: &str,
        ctx: &RunContext,
    ) -> Result<AnswerResult> {
        let run_id = new_run_id();
        let started = std::time::Instant::now();
        let started_at = chrono::Utc::now();

        info!(run_id = %run_id, question = %question, "research run starting");

        let mut meta = json!({
            "run_id": run_id,
            "started_at_utc": started_at.to_rfc3339(),
            "question": question,
            "today": ctx.today,
            "model": self.model.model_id(),
            "config": {
                "max_sources": self.config.max_sources,
                "max_queries": self.config.max_queries,
                "max_chars_per_source": self.config.max_chars_per_source,
            },
        });
        self.sink.write_json(&run_id, "meta.json", &meta).await;

        let did_search = decide_should_search(&self.model, question, ctx).await?;
        meta["did_search"] = json!(did_search);
        self.sink.write_json(&run_id, "meta.json", &meta).await;

        let mut context = String::new();
        let mut source_lines: Vec<String> = Vec::new();
        let mut search_queries: Vec<String> = Vec::new();

        if did_search {
            search_queries =
                generate_queries(&self.model, question, ctx, self.config.max_queries).await?;
            if search_queries.is_empty() {
                // Fan-out never degenerates to zero queries once the
                // gate says yes.
                search_queries = vec![question.to_string()];
            }
            self.sink
                .write_json(&run_id, "search_queries.json", &json!(search_queries))
                .await;

            let buckets = gather_buckets(
                &self.searcher,
                &search_queries,
                self.config.per_query_limit(),
            )
            .await;

            let search_dump: Vec<_> = search_queries
                .iter()
                .zip(&buckets)
                .map(|(query, results)| json!({"query": query, "results": results}))
                .collect();
            self.sink
                .write_json(&run_id, "search_results.json", &json!(search_dump))
                .await;

            let selected = select_sources(&buckets, self.config.max_sources);
            if selected.is_empty() {
                return Err(ConsistencyError::NoSourcesSelected.into());
            }
            self.sink
                .write_json(&run_id, "selected_sources.json", &json!(selected))
                .await;

            info!(
                run_id = %run_id,
                queries = search_queries.len(),
                sources = selected.len(),
                "sources selected"
            );

            let mut blocks: Vec<String> = Vec::with_capacity(selected.len());
            for source in &selected {
                source_lines.push(source.labeled_line());

                match self.evidence_for_source(&run_id, question, source).await {
                    Ok(passages) => blocks.push(render_source_block(source, &passages)),
                    Err(error) => {
                        warn!(
                            run_id = %run_id,
                            source = %source.id(),
                            url = %source.result.url,
                            error = %error,
                            "source degraded to snippet"
                        );
                        blocks.push(render_failure_block(source, &error));
                    }
                }
            }

            context = assemble_context(&blocks);
            self.sink.write_text(&run_id, "context.txt", &context).await;
        }

        let prompt = format_answer_prompt(
            question,
            &context,
            did_search,
            &serde_json::to_string(&search_queries)?,
            &serde_json::to_string(&source_lines)?,
        );

        let raw = self.model.complete(&prompt).await?;
        let reply: AnswerReply =
            serde_json::from_str(&raw).map_err(|source| PipelineError::MalformedResponse {
                stage: "answer",
                source,
            })?;

        validate_citations(&reply.answer_bullets, &reply.sources)?;

        let summary = reply.summary.ok_or(ValidationError::EmptySummary)?;
        validate_summary(&summary)?;

        if did_search && reply.sources.is_empty() {
            return Err(ConsistencyError::MissingDeclaredSources.into());
        }

        let result = AnswerResult {
            summary,
            answer_bullets: reply.answer_bullets,
            sources: reply.sources,
            meta: RunMeta {
                did_search,
                search_queries,
                max_sources: self.config.max_sources,
                model: self.model.model_id().to_string(),
                run_id: run_id.clone(),
            },
        };

        self.sink
            .write_json(&run_id, "final.json", &serde_json::to_value(&result)?)
            .await;

        meta["ended_at_utc"] = json!(chrono::Utc::now().to_rfc3339());
        meta["elapsed_ms"] = json!(started.elapsed().as_millis() as u64);
        self.sink.write_json(&run_id, "meta.json", &meta).await;

        info!(
            run_id = %run_id,
            did_search,
            bullets = result.answer_bullets.len(),
            sources = result.sources.len(),
            "research run finished"
        );

        Ok(result)
    }

    /// Fetch one selected source and extract its passages.
    ///
    /// Any failure here, transport or parse, comes back as a plain
    /// message for the degraded context block; it never aborts the run.
    async fn evidence_for_source(
        &self,
        run_id: &str,
        question: &str,
        source: &SelectedSource,
    ) -> std::result::Result<Vec<Passage>, String> {
        let url = &source.result.url;

        let doc = self
            .fetcher
            .fetch(url, self.config.max_chars_per_source)
            .await
            .map_err(|e| e.to_string())?;

        self.sink
            .write_json(
                run_id,
                &format!("fetch/{}.json", url_hash(url)),
                &json!({"url": doc.url, "title": doc.title, "text": doc.text}),
            )
            .await;

        let title = if !source.result.title.is_empty() {
            source.result.title.clone()
        } else {
            doc.title.clone().unwrap_or_else(|| "Untitled".to_string())
        };

        let passages = extract_passages(&self.model, question, &title, url, &doc.text)
            .await
            .map_err(|e| e.to_string())?;

        self.sink
            .write_json(
                run_id,
                &format!("extracts/{}.json", url_hash(url)),
                &json!({
                    "source_id": source.id(),
                    "title": source.result.title,
                    "url": url,
                    "passages": passages,
                }),
            )
            .await;

        Ok(passages)
    }
}
