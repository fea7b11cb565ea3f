//! Converts raw automaton hits into reported matches: whole-word gating,
//! overlap policy, and final ordering.

use crate::scanner::RawHit;
use serde::Serialize;

/// A single reported occurrence: `[start, end)` in the original input, with
/// the original (pre-fold) pattern string that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub pattern: String,
}

/// Is the byte "word": ASCII letter, digit, or underscore? Every other
/// byte, including all bytes `>= 0x80`, is non-word.
#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whole-word boundary predicate: both neighbors (or the virtual input
/// boundary) must be non-word.
#[inline]
pub fn word_boundary_ok(left: Option<u8>, right: Option<u8>) -> bool {
    !left.map(is_word_byte).unwrap_or(false) && !right.map(is_word_byte).unwrap_or(false)
}

/// Convert raw hits over an in-memory buffer into `(start, end, ordinal)`
/// candidates, applying whole-word gating if requested. `input_len` is the
/// length of the *entire logical input*, used to decide whether `end` sits
/// at the true end-of-input (virtual boundary) rather than just the end of
/// `bytes`.
pub fn resolve_candidates(
    raw_hits: &[RawHit],
    bytes: &[u8],
    base_offset: usize,
    input_len: usize,
    pattern_lens: &[usize],
    whole_word: bool,
) -> Vec<(usize, usize, u32)> {
    raw_hits
        .iter()
        .filter_map(|hit| {
            let end = hit.end;
            let len = pattern_lens[hit.pattern_ordinal as usize];
            let start = end - len;

            if whole_word {
                let left = if start > 0 {
                    Some(bytes[start - base_offset - 1])
                } else {
                    None
                };
                let right = if end < input_len {
                    Some(bytes[end - base_offset])
                } else {
                    None
                };
                if !word_boundary_ok(left, right) {
                    return None;
                }
            }

            Some((start, end, hit.pattern_ordinal))
        })
        .collect()
}

/// Apply the overlap policy and final ordering to a set of candidate
/// `(start, end, ordinal)` hits, producing the reported match list.
///
/// - `overlapping = true`: every candidate survives.
/// - `overlapping = false`: greedy left-to-right, non-overlapping cover.
///   Candidates are considered in `(start, end, ordinal)` order; a
///   candidate is kept only if its `start` is at or past the watermark left
///   by the previous kept candidate, biasing ties toward the earliest
///   start and, among equal starts, the smallest pattern ordinal.
pub fn apply_overlap(
    mut candidates: Vec<(usize, usize, u32)>,
    overlapping: bool,
    originals: &[String],
) -> Vec<Match> {
    candidates.sort_unstable();
    candidates.dedup();

    if overlapping {
        return candidates
            .into_iter()
            .map(|(start, end, ordinal)| Match {
                start,
                end,
                pattern: originals[ordinal as usize].clone(),
            })
            .collect();
    }

    let mut out = Vec::new();
    let mut watermark = 0usize;
    for (start, end, ordinal) in candidates {
        if start < watermark {
            continue;
        }
        watermark = end;
        out.push(Match {
            start,
            end,
            pattern: originals[ordinal as usize].clone(),
        });
    }
    out
}
