//! Citation and summary validation of the final answer.
//!
//! Two independent, pure checks run after the answer reply is parsed.
//! Both fail fast on the first violation: an answer with broken
//! citations is worse than no answer.

use std::collections::HashSet;

use crate::error::{CitationError, Result, ValidationError};

/// Extract the declared source-ID set from source lines.
///
/// A line declares an ID when its trimmed form starts with `S<digits>`
/// immediately followed by a colon, as in `S1: Title - URL`. Lines that
/// don't match are ignored.
pub fn declared_source_ids(sources: &[String]) -> HashSet<String> {
    sources
        .iter()
        .filter_map(|line| parse_source_id(line.trim()))
        .collect()
}

/// Parse the leading `S<digits>:` token, returning the `S<digits>` part.
fn parse_source_id(line: &str) -> Option<String> {
    let (head, _) = line.split_once(':')?;
    let digits = head.strip_prefix('S')?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .then(|| head.to_string())
}

/// Extract the trailing bracketed citation tokens from a bullet.
///
/// The bracket group must be the very end of the trimmed bullet, with
/// nothing after the closing bracket and at least one character inside.
/// Returns the comma-separated, trimmed tokens, or `None` when there is
/// no valid trailing group.
pub fn trailing_citations(bullet: &str) -> Option<Vec<String>> {
    let trimmed = bullet.trim();
    let body = trimmed.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let contents = &body[open + 1..];
    if contents.is_empty() || contents.contains(']') {
        return None;
    }
    Some(contents.split(',').map(|t| t.trim().to_string()).collect())
}

/// Check that every bullet cites only declared source IDs.
///
/// When the declared set is empty there is nothing to check against and
/// validation is skipped entirely (the no-search path).
pub fn validate_citations(answer_bullets: &[String], sources: &[String]) -> Result<()> {
    let source_ids = declared_source_ids(sources);
    if source_ids.is_empty() {
        return Ok(());
    }

    for bullet in answer_bullets {
        let cited = trailing_citations(bullet).ok_or_else(|| CitationError::MissingCitations {
            bullet: bullet.clone(),
        })?;

        let unknown: Vec<String> = cited
            .into_iter()
            .filter(|c| !source_ids.contains(c))
            .collect();
        if !unknown.is_empty() {
            return Err(CitationError::UnknownSources {
                bullet: bullet.clone(),
                unknown,
            }
            .into());
        }
    }

    Ok(())
}

/// Check that the summary is non-empty and citation-free.
pub fn validate_summary(summary: &str) -> Result<()> {
    if summary.trim().is_empty() {
        return Err(ValidationError::EmptySummary.into());
    }
    if summary.contains('[') || summary.contains(']') {
        return Err(ValidationError::BracketedSummary {
            summary: summary.to_string(),
        }
        .into());
    }
    Ok(())
}
