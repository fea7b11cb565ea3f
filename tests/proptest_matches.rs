//! Property-based tests over random pattern sets and random input, checking
//! the invariants spec.md §8 states for "all inputs S and pattern sets P":
//! soundness, mode equivalence (bytes vs. chunked-mmap vs. parallel-mmap
//! across several chunk sizes / thread counts), and the non-overlap cover.

use proptest::prelude::*;
use std::io::Write;

use litescan::{Matcher, MatcherConfig};

/// Small alphabet so generated patterns actually recur in generated input;
/// a full byte range would make matches vanishingly rare.
fn pattern() -> impl Strategy<Value = String> {
    "[a-c]{1,4}"
}

fn patterns() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(pattern(), 1..6)
}

fn input() -> impl Strategy<Value = Vec<u8>> {
    "[a-cA-C ]{0,200}".prop_map(|s| s.into_bytes())
}

fn config() -> impl Strategy<Value = MatcherConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(overlapping, case_insensitive, whole_word)| MatcherConfig {
            overlapping,
            case_insensitive,
            whole_word,
        },
    )
}

fn fold_if(bytes: &[u8], case_insensitive: bool) -> Vec<u8> {
    if case_insensitive {
        litescan::pattern::fold(bytes)
    } else {
        bytes.to_vec()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every emitted match's bytes fold-equal the pattern it names, and
    /// under whole_word the boundary predicate actually holds.
    #[test]
    fn soundness(patterns in patterns(), text in input(), cfg in config()) {
        let matcher = match Matcher::new(&patterns, cfg) {
            Ok(m) => m,
            Err(_) => return Ok(()), // all-empty pattern set, nothing to check
        };
        let matches = matcher.match_bytes(&text);

        for m in &matches {
            prop_assert_eq!(
                fold_if(&text[m.start..m.end], cfg.case_insensitive),
                fold_if(m.pattern.as_bytes(), cfg.case_insensitive)
            );

            if cfg.whole_word {
                let left = if m.start > 0 { Some(text[m.start - 1]) } else { None };
                let right = text.get(m.end).copied();
                prop_assert!(litescan::postfilter::word_boundary_ok(left, right));
            }
        }
    }

    /// `match_bytes`, `match_file_memmap` at several chunk sizes, and
    /// `match_file_memmap_parallel` at several thread counts agree as
    /// multisets of (start, end, pattern) over the same input.
    #[test]
    fn mode_equivalence(patterns in patterns(), text in input()) {
        let matcher = match Matcher::new(&patterns, MatcherConfig::default()) {
            Ok(m) => m,
            Err(_) => return Ok(()),
        };

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&text).unwrap();
        tmp.flush().unwrap();

        let mut baseline = matcher.match_bytes(&text);
        baseline.sort_by(|a, b| (a.start, a.end, &a.pattern).cmp(&(b.start, b.end, &b.pattern)));

        for chunk_size in [1usize, 2, 7, 64] {
            let mut chunked = matcher.match_file_memmap(tmp.path(), chunk_size).unwrap();
            chunked.sort_by(|a, b| (a.start, a.end, &a.pattern).cmp(&(b.start, b.end, &b.pattern)));
            prop_assert_eq!(&chunked, &baseline, "chunk_size={}", chunk_size);
        }

        for threads in [1usize, 3, 8] {
            let mut parallel = matcher.match_file_memmap_parallel(tmp.path(), threads).unwrap();
            parallel.sort_by(|a, b| (a.start, a.end, &a.pattern).cmp(&(b.start, b.end, &b.pattern)));
            prop_assert_eq!(&parallel, &baseline, "threads={}", threads);
        }
    }

    /// In non-overlapping mode, matches are pairwise disjoint on the byte
    /// axis and their starts are strictly increasing.
    #[test]
    fn non_overlap_cover_is_disjoint(patterns in patterns(), text in input(), case_insensitive in any::<bool>(), whole_word in any::<bool>()) {
        let cfg = MatcherConfig { overlapping: false, case_insensitive, whole_word };
        let matcher = match Matcher::new(&patterns, cfg) {
            Ok(m) => m,
            Err(_) => return Ok(()),
        };
        let matches = matcher.match_bytes(&text);

        for w in matches.windows(2) {
            prop_assert!(w[0].start < w[1].start);
            prop_assert!(w[0].end <= w[1].start);
        }
    }
}
