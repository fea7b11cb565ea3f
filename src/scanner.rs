//! Scanner core: drive the automaton over a byte range and emit raw hits.

use crate::automaton::Automaton;
use crate::pattern::fold_byte;

/// A raw hit before post-filtering: the pattern ends at `end` (absolute,
/// exclusive) in the caller's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHit {
    pub end: usize,
    pub pattern_ordinal: u32,
}

/// Walk `bytes` left to right starting from the automaton's root state,
/// emitting every pattern recognized at every position. `base_offset` is
/// the absolute offset of `bytes[0]` in the logical input; every emitted
/// `end` is `base_offset + i + 1` for the byte at local index `i`.
///
/// This reports all matches the automaton recognizes, including
/// overlapping ones — overlap and whole-word gating are applied by
/// [`crate::postfilter`].
pub fn scan_raw(bytes: &[u8], base_offset: usize, automaton: &Automaton) -> Vec<RawHit> {
    let mut hits = Vec::new();
    let mut state = Automaton::root();
    let fold = automaton.case_insensitive();

    for (i, &b) in bytes.iter().enumerate() {
        let byte = if fold { fold_byte(b) } else { b };
        state = automaton.step(state, byte);

        for &ordinal in automaton.outputs(state) {
            hits.push(RawHit {
                end: base_offset + i + 1,
                pattern_ordinal: ordinal,
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::NormalizedPatterns;

    #[test]
    fn emits_absolute_offsets() {
        let normalized = NormalizedPatterns::build(&["fox"], false).unwrap();
        let automaton = Automaton::build(&normalized, false);

        let hits = scan_raw(b"the fox", 100, &automaton);
        assert_eq!(hits, vec![RawHit { end: 100 + 7, pattern_ordinal: 0 }]);
    }

    #[test]
    fn emits_every_overlapping_occurrence() {
        let normalized = NormalizedPatterns::build(&["abcd", "bcde", "cdef"], false).unwrap();
        let automaton = Automaton::build(&normalized, false);

        let hits = scan_raw(b"abcdefgh", 0, &automaton);
        let mut ends: Vec<usize> = hits.iter().map(|h| h.end).collect();
        ends.sort_unstable();
        assert_eq!(ends, vec![4, 5, 6]);
    }
}
