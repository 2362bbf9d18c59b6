//! Question-selection policies for fresh and replay loads.

use std::collections::HashSet;

use crate::model::{Question, QuestionId};

/// Pick up to `target` questions for a fresh round.
///
/// Questions whose id is in `seen` are filtered out first. If fewer than
/// `target` novel questions remain, the filter is discarded and the first
/// `target` of the raw batch are taken instead: prefer freshness, but fall
/// back to repeats rather than under-filling the round.
#[must_use]
pub fn select_fresh(
    batch: Vec<Question>,
    seen: &HashSet<QuestionId>,
    target: usize,
) -> Vec<Question> {
    let novel: Vec<Question> = batch
        .iter()
        .filter(|q| !seen.contains(q.id()))
        .cloned()
        .collect();

    if novel.len() >= target {
        novel.into_iter().take(target).collect()
    } else {
        batch.into_iter().take(target).collect()
    }
}

/// Keep exactly the pool questions whose id was answered wrong, in pool
/// order. No fallback applies: an empty result means nothing to replay.
#[must_use]
pub fn select_replay(pool: Vec<Question>, wrong: &HashSet<QuestionId>) -> Vec<Question> {
    pool.into_iter().filter(|q| wrong.contains(q.id())).collect()
}
