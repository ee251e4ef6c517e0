//! Filesystem run bundles.
//!
//! Persists every run's intermediate artifacts under
//! `<base_dir>/<utc-date>/<run-id>/` for later inspection:
//!
//! ```text
//! runs/2026-08-30/20260830_142501Z_a1b2c3/
//!   meta.json
//!   search_queries.json
//!   search_results.json
//!   selected_sources.json
//!   fetch/<url-hash>.json
//!   extracts/<url-hash>.json
//!   context.txt
//!   final.json
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

use crate::traits::sink::ArtifactSink;

/// Generate a fresh run identifier: UTC timestamp plus a short random
/// suffix, e.g. `20260830_142501Z_a1b2c3`.
pub fn new_run_id() -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M%SZ");
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
    format!("{stamp}_{suffix}")
}

/// Short stable hash for using a URL as a file name.
pub fn url_hash(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..16].to_string()
}

/// [`ArtifactSink`] writing JSON and text files under a base directory,
/// grouped by UTC date and run id.
#[derive(Debug, Clone)]
pub struct FsBundle {
    base_dir: PathBuf,
}

impl FsBundle {
    /// Create a bundle sink rooted at `base_dir` (e.g., "runs").
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory for a given run.
    ///
    /// The date segment comes from the run id's timestamp prefix, so a
    /// run that crosses midnight still keeps all its artifacts in one
    /// directory. Ids without a parseable prefix fall back to the
    /// current UTC date.
    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        let date = run_id
            .get(..8)
            .and_then(|stamp| NaiveDate::parse_from_str(stamp, "%Y%m%d").ok())
            .unwrap_or_else(|| Utc::now().date_naive());
        self.base_dir.join(date.to_string()).join(run_id)
    }

    async fn write_bytes(&self, run_id: &str, rel_path: &str, bytes: &[u8]) {
        let path = self.run_dir(run_id).join(rel_path);

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %parent.display(), error = %e, "failed to create artifact dir");
                return;
            }
        }

        if let Err(e) = tokio::fs::write(&path, bytes).await {
            warn!(path = %path.display(), error = %e, "failed to write artifact");
        }
    }
}

#[async_trait]
impl ArtifactSink for FsBundle {
    async fn write_json(&self, run_id: &str, rel_path: &str, value: &serde_json::Value) {
        match serde_json::to_vec_pretty(value) {
            Ok(bytes) => self.write_bytes(run_id, rel_path, &bytes).await,
            Err(e) => warn!(rel_path, error = %e, "failed to serialize artifact"),
        }
    }

    async fn write_text(&self, run_id: &str, rel_path: &str, text: &str) {
        self.write_bytes(run_id, rel_path, text.as_bytes()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        let a = new_run_id();
        let b = new_run_id();
        assert_ne!(a, b);
        assert!(a.contains('_'));
    }

    #[test]
    fn test_url_hash_is_stable_and_short() {
        let h1 = url_hash("https://redis.io/docs");
        let h2 = url_hash("https://redis.io/docs");
        let h3 = url_hash("https://redis.io/other");

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert_eq!(h1.len(), 16);
    }

    #[test]
    fn test_run_dir_date_comes_from_run_id() {
        let bundle = FsBundle::new("runs");

        let dir = bundle.run_dir("20261231_235959Z_a1b2c3");
        assert_eq!(
            dir,
            PathBuf::from("runs/2026-12-31/20261231_235959Z_a1b2c3")
        );

        // Same id, same directory, no matter when it is resolved.
        assert_eq!(dir, bundle.run_dir("20261231_235959Z_a1b2c3"));
    }

    #[tokio::test]
    async fn test_fs_bundle_writes_artifacts() {
        let dir = std::env::temp_dir().join(format!("citeseek-test-{}", new_run_id()));
        let bundle = FsBundle::new(&dir);
        let run_id = new_run_id();

        bundle
            .write_json(&run_id, "meta.json", &serde_json::json!({"question": "q"}))
            .await;
        bundle
            .write_text(&run_id, "context.txt", "SOURCE_ID: S1")
            .await;
        bundle
            .write_json(&run_id, "fetch/abc123.json", &serde_json::json!({"url": "u"}))
            .await;

        let run_dir = bundle.run_dir(&run_id);
        assert!(run_dir.join("meta.json").exists());
        assert!(run_dir.join("context.txt").exists());
        assert!(run_dir.join("fetch/abc123.json").exists());

        let meta = std::fs::read_to_string(run_dir.join("meta.json")).unwrap();
        assert!(meta.contains("question"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
