//! Score ordering.

use crate::models::SortMode;
use std::cmp::Ordering;

/// Compares two scores under `mode`.
///
/// Scores are finite by construction; equal scores compare `Equal` so a
/// stable sort keeps their prior relative order.
#[must_use]
pub fn compare_scores(mode: SortMode, a: f64, b: f64) -> Ordering {
    let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    match mode {
        SortMode::ScoreAsc => ordering,
        SortMode::ScoreDesc => ordering.reverse(),
    }
}

/// Stably sorts `items` by the score `key` extracts.
pub fn sort_by_score<T>(items: &mut [T], mode: SortMode, key: impl Fn(&T) -> f64) {
    // slice::sort_by is a stable merge sort.
    items.sort_by(|a, b| compare_scores(mode, key(a), key(b)));
}
