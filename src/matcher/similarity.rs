//! Token-set similarity and ranking.

use crate::model::{RoomMatch, RoomRecord};
use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

/// Insertions plus deletions needed to turn `a` into `b`.
fn indel_distance(a: &str, b: &str) -> usize {
    indel::distance(a.chars(), b.chars())
}

/// `100 * (1 - dist / lensum)`, truncated.
fn score_from_distance(dist: usize, lensum: usize) -> u8 {
    if lensum == 0 {
        return 100;
    }
    ((lensum - dist.min(lensum)) * 100 / lensum) as u8
}

/// Indel-based ratio of two strings, 0..=100.
pub fn ratio(a: &str, b: &str) -> u8 {
    let lensum = a.chars().count() + b.chars().count();
    score_from_distance(indel_distance(a, b), lensum)
}

/// Order- and duplicate-insensitive similarity of two whitespace-tokenized strings.
///
/// Both inputs are reduced to token sets. The shared tokens (sorted) form a
/// core; each side's leftover tokens (sorted) are appended to it, and the best
/// ratio among core vs. core+left, core vs. core+right and core+left vs.
/// core+right wins. A side that adds nothing to a non-empty core scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    match (tokens_a.is_empty(), tokens_b.is_empty()) {
        (true, true) => return 100,
        (true, false) | (false, true) => return 0,
        _ => {}
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100;
    }

    let diff_ab_joined = diff_ab.join(" ");
    let diff_ba_joined = diff_ba.join(" ");
    let ab_len = diff_ab_joined.chars().count();
    let ba_len = diff_ba_joined.chars().count();
    let sect_len = intersection.join(" ").chars().count();

    // The shared core cancels out, so core+left vs. core+right costs the same
    // edits as left vs. right.
    let dist = indel_distance(&diff_ab_joined, &diff_ba_joined);

    if sect_len == 0 {
        return score_from_distance(dist, ab_len + ba_len);
    }

    // core+left differs from core by one separator plus the left tokens
    let sect_ab_len = sect_len + 1 + ab_len;
    let sect_ba_len = sect_len + 1 + ba_len;
    let mut best = score_from_distance(dist, sect_ab_len + sect_ba_len);
    best = best.max(score_from_distance(1 + ab_len, sect_len + sect_ab_len));
    best = best.max(score_from_distance(1 + ba_len, sect_len + sect_ba_len));
    best
}

/// Scores every candidate against `target_normalized` and sorts descending.
/// `sort_by` is stable, so ties keep catalog order.
pub fn score_candidates(target_normalized: &str, candidates: &[&RoomRecord]) -> Vec<RoomMatch> {
    let mut scored: Vec<RoomMatch> = candidates
        .iter()
        .map(|record| RoomMatch {
            room_name: record.room_name.clone(),
            similarity: token_set_ratio(target_normalized, &record.features.normalized),
        })
        .collect();

    scored.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    scored
}
