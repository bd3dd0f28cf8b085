//! Evidence line scoring and selection.
//!
//! # Responsibility
//! - Score each non-blank line by additive diagnostic signal weights.
//! - Select a bounded, ordered, deduplicated excerpt subset with a fallback
//!   minimum.
//!
//! # Invariants
//! - Output length never exceeds the requested bound.
//! - Output preserves original relative line order; scores only decide
//!   membership, never final ordering.
//! - Every output line is at most `MAX_EXCERPT_LINE_LEN` chars.

use crate::summarize::{cap_with_ellipsis, refs};
use std::collections::BTreeSet;

/// Maximum display length of one excerpt line, ellipsis included.
pub const MAX_EXCERPT_LINE_LEN: usize = 300;

/// Selection keeps topping up from unscored lines until it reaches this many.
const MIN_EVIDENCE_TARGET: usize = 3;

/// Case-insensitive substring markers and their additive weights.
const SIGNAL_WEIGHTS: &[(&str, u32)] = &[
    ("error", 3),
    ("fatal", 3),
    ("exception", 2),
    ("traceback", 2),
    ("warning", 1),
    ("implicit declaration", 2),
    ("redefinition", 2),
];

/// Weight added when a line carries a `path:line[:col]` reference.
const REFERENCE_WEIGHT: u32 = 2;

/// Scores one line by summing all matching signal weights.
///
/// Weights are purely additive; a line matching several markers accumulates
/// every applicable weight. The score is never normalized.
pub fn score_line(line: &str) -> u32 {
    let lower = line.to_lowercase();
    let mut score: u32 = SIGNAL_WEIGHTS
        .iter()
        .filter(|(marker, _)| lower.contains(marker))
        .map(|(_, weight)| weight)
        .sum();
    if refs::contains_reference(line) {
        score += REFERENCE_WEIGHT;
    }
    score
}

/// Selects at most `max_lines` excerpt lines from `lines`.
///
/// Blank lines are discarded before scoring. When any line scores positive,
/// candidates are ranked by (score descending, original index ascending) and
/// the winners are re-sorted back into original order; otherwise the first
/// `max_lines` non-blank lines are taken as-is. The result is deduplicated
/// by exact text, padded up to `min(3, max_lines, available)` from remaining
/// non-blank lines, and each line is truncated to the display length.
pub fn select_evidence(lines: &[&str], max_lines: usize) -> Vec<String> {
    let nonblank: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut scored: Vec<(u32, usize)> = Vec::new();
    for (index, line) in nonblank.iter().enumerate() {
        let score = score_line(line);
        if score > 0 {
            scored.push((score, index));
        }
    }

    let selected: Vec<&str> = if scored.is_empty() {
        nonblank.iter().copied().take(max_lines).collect()
    } else {
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let mut winners: Vec<usize> = scored.iter().take(max_lines).map(|(_, idx)| *idx).collect();
        winners.sort_unstable();
        winners.into_iter().map(|idx| nonblank[idx]).collect()
    };

    let mut seen = BTreeSet::new();
    let mut picked: Vec<&str> = Vec::new();
    for line in selected {
        if seen.insert(line) {
            picked.push(line);
        }
    }

    let target = MIN_EVIDENCE_TARGET.min(max_lines).min(nonblank.len());
    for line in nonblank.iter().copied() {
        if picked.len() >= target {
            break;
        }
        if seen.insert(line) {
            picked.push(line);
        }
    }

    picked
        .into_iter()
        .take(max_lines)
        .map(|line| cap_with_ellipsis(line, MAX_EXCERPT_LINE_LEN))
        .collect()
}
