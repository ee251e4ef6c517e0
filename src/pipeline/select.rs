//! Source selection: round-robin dedup merge across query buckets.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use crate::traits::WebSearcher;
use crate::types::{SelectedSource, SourceBucket};

/// Run each query through the searcher, producing one bucket per query
/// in query order.
///
/// Queries run concurrently; `join_all` keeps bucket order equal to
/// query order. A failed search yields an empty bucket rather than
/// aborting; each bucket is capped at `per_query_limit` candidates.
pub async fn gather_buckets(
    searcher: &dyn WebSearcher,
    queries: &[String],
    per_query_limit: usize,
) -> Vec<SourceBucket> {
    let searches = queries
        .iter()
        .map(|query| searcher.search_with_limit(query, per_query_limit));

    join_all(searches)
        .await
        .into_iter()
        .zip(queries)
        .map(|(outcome, query)| match outcome {
            Ok(results) => results,
            Err(e) => {
                warn!(query = %query, error = %e, "search failed, using empty bucket");
                Vec::new()
            }
        })
        .collect()
}

/// Merge per-query buckets into an ordered, deduplicated source list of
/// at most `max_sources` entries.
///
/// Column-wise round-robin: take index 0 from every bucket in query
/// order, then index 1, and so on, so each query contributes one source
/// before any query contributes a second. A result is taken only if its
/// trimmed URL is non-empty and not seen before. A full pass that takes
/// nothing terminates the merge. Ordinals are assigned in selection
/// order, starting at 1.
pub fn select_sources(buckets: &[SourceBucket], max_sources: usize) -> Vec<SelectedSource> {
    let mut selected: Vec<SelectedSource> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    let mut column = 0;
    while selected.len() < max_sources {
        let mut progressed = false;

        for bucket in buckets {
            let Some(result) = bucket.get(column) else {
                continue;
            };
            let url = result.url.trim();
            if url.is_empty() || seen_urls.contains(url) {
                continue;
            }

            seen_urls.insert(url.to_string());
            selected.push(SelectedSource::new(selected.len() + 1, result.clone()));
            progressed = true;

            if selected.len() >= max_sources {
                break;
            }
        }

        if !progressed {
            break;
        }
        column += 1;
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;
    use proptest::prelude::*;

    fn bucket_of(results: &[(&str, &str)]) -> SourceBucket {
        results
            .iter()
            .map(|(title, url)| SearchResult::new(*title, *url, ""))
            .collect()
    }

    fn urls(selected: &[SelectedSource]) -> Vec<&str> {
        selected.iter().map(|s| s.result.url.as_str()).collect()
    }

    #[test]
    fn test_round_robin_is_breadth_first() {
        let buckets = vec![
            bucket_of(&[("a", "https://a"), ("b", "https://b"), ("c", "https://c")]),
            bucket_of(&[("d", "https://d"), ("e", "https://e")]),
            bucket_of(&[("f", "https://f")]),
        ];

        let selected = select_sources(&buckets, 4);
        assert_eq!(urls(&selected), vec!["https://a", "https://d", "https://f", "https://b"]);

        // Ordinals follow selection order, 1-based.
        let ids: Vec<String> = selected.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3", "S4"]);
    }

    #[test]
    fn test_duplicate_url_selected_once_at_first_position() {
        let buckets = vec![
            bucket_of(&[("a", "https://dup"), ("b", "https://b")]),
            bucket_of(&[("a again", "https://dup"), ("c", "https://c")]),
        ];

        let selected = select_sources(&buckets, 5);
        assert_eq!(urls(&selected), vec!["https://dup", "https://b", "https://c"]);
        assert_eq!(selected[0].result.title, "a");
    }

    #[test]
    fn test_empty_and_whitespace_urls_skipped() {
        let buckets = vec![
            bucket_of(&[("blank", ""), ("ws", "   "), ("ok", "https://ok")]),
        ];

        let selected = select_sources(&buckets, 5);
        assert_eq!(urls(&selected), vec!["https://ok"]);
    }

    #[test]
    fn test_terminates_when_pass_takes_nothing() {
        // Pass 1 hits only an exhausted bucket and a duplicate, so the
        // merge stops there; the fresh URL at column 2 stays unreached.
        let buckets = vec![
            bucket_of(&[("a", "https://a")]),
            bucket_of(&[("b", "https://b"), ("a dup", "https://a"), ("c", "https://c")]),
        ];

        let selected = select_sources(&buckets, 5);
        assert_eq!(urls(&selected), vec!["https://a", "https://b"]);
    }

    #[test]
    fn test_zero_max_sources() {
        let buckets = vec![bucket_of(&[("a", "https://a")])];
        assert!(select_sources(&buckets, 0).is_empty());
    }

    #[tokio::test]
    async fn test_gather_buckets_isolates_search_failure() {
        use crate::traits::MockWebSearcher;

        let searcher = MockWebSearcher::new()
            .with_hits("good", &[("a", "https://a", "")])
            .fail_query("bad");

        let queries = vec!["good".to_string(), "bad".to_string()];
        let buckets = gather_buckets(&searcher, &queries, 5).await;

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].len(), 1);
        assert!(buckets[1].is_empty());
    }

    proptest! {
        // With distinct URLs, the selected count is exactly
        // min(max_sources, total available).
        #[test]
        fn prop_cap(
            bucket_sizes in proptest::collection::vec(0usize..6, 0..5),
            max_sources in 0usize..12,
        ) {
            let mut next_id = 0usize;
            let buckets: Vec<SourceBucket> = bucket_sizes
                .iter()
                .map(|&len| {
                    (0..len)
                        .map(|_| {
                            next_id += 1;
                            SearchResult::new("t", format!("https://u{next_id}"), "")
                        })
                        .collect()
                })
                .collect();

            let total: usize = bucket_sizes.iter().sum();
            let selected = select_sources(&buckets, max_sources);

            prop_assert_eq!(selected.len(), max_sources.min(total));

            // No URL selected twice.
            let mut seen = std::collections::HashSet::new();
            for s in &selected {
                prop_assert!(seen.insert(s.result.url.clone()));
            }

            // Ordinals are 1..=len.
            for (i, s) in selected.iter().enumerate() {
                prop_assert_eq!(s.ordinal, i + 1);
            }
        }
    }
}
