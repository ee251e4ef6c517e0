//! Write-behind artifact sink.
//!
//! The pipeline emits intermediate artifacts (search dumps, fetched
//! documents, assembled context, the final answer) through this trait.
//! Writes are fire-and-forget: implementations log failures and never
//! surface them, so the sink's absence or breakage cannot change
//! pipeline semantics.

use async_trait::async_trait;

/// Fire-and-forget persistence for per-run artifacts.
///
/// Paths are relative to the run identified by `run_id`; the sink
/// decides the physical layout.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Persist a JSON artifact.
    async fn write_json(&self, run_id: &str, rel_path: &str, value: &serde_json::Value);

    /// Persist a text artifact.
    async fn write_text(&self, run_id: &str, rel_path: &str, text: &str);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl ArtifactSink for NoopSink {
    async fn write_json(&self, _run_id: &str, _rel_path: &str, _value: &serde_json::Value) {}

    async fn write_text(&self, _run_id: &str, _rel_path: &str, _text: &str) {}
}
