use litescan::{Matcher, MatcherConfig};
use std::io::Write;

fn config(overlapping: bool, case_insensitive: bool, whole_word: bool) -> MatcherConfig {
    MatcherConfig {
        overlapping,
        case_insensitive,
        whole_word,
    }
}

#[test]
fn scenario_basic_pangram() {
    let matcher = Matcher::new(&["fox", "jump", "quick"], MatcherConfig::default()).unwrap();
    let matches = matcher.match_bytes(b"The Quick Brown Fox Jumps Over The Lazy Dog");
    let mut patterns: Vec<&str> = matches.iter().map(|m| m.pattern.as_str()).collect();
    patterns.sort_unstable();
    assert_eq!(patterns, vec!["fox", "jump", "quick"]);
}

#[test]
fn scenario_overlapping_patterns_non_overlap_mode() {
    let matcher = Matcher::new(
        &["abcd", "bcde", "cdef"],
        config(false, true, false),
    )
    .unwrap();
    let matches = matcher.match_bytes(b"abcdefgh");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].pattern, "abcd");
    assert_eq!((matches[0].start, matches[0].end), (0, 4));
}

#[test]
fn scenario_overlapping_patterns_overlap_mode() {
    let matcher = Matcher::new(&["abcd", "bcde", "cdef"], config(true, true, false)).unwrap();
    let matches = matcher.match_bytes(b"abcdefgh");
    assert_eq!(matches.len(), 3);
}

#[test]
fn scenario_banana_ana_non_overlap_resumes() {
    let matcher = Matcher::new(&["ana"], config(false, true, false)).unwrap();
    let matches = matcher.match_bytes(b"banana");
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].start, matches[0].end), (1, 4));
}

#[test]
fn scenario_case_insensitivity_default() {
    let matcher = Matcher::new(&["hello", "world"], MatcherConfig::default()).unwrap();
    let matches = matcher.match_bytes(b"HELLO World");
    assert_eq!(matches.len(), 2);
}

#[test]
fn scenario_case_sensitive_opt_in() {
    let matcher = Matcher::new(&["hello"], config(true, false, false)).unwrap();
    let matches = matcher.match_bytes(b"HELLO hello");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start, 6);
}

#[test]
fn scenario_whole_word_gating() {
    let matcher = Matcher::new(&["cat", "dog", "a"], config(true, true, true)).unwrap();
    let matches = matcher.match_bytes(b"concatenate cat a scattered dog");
    let patterns: Vec<&str> = matches.iter().map(|m| m.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["cat", "a", "dog"]);
}

#[test]
fn scenario_long_pattern_across_chunk_boundary() {
    let pattern: String = std::iter::repeat('x').take(10_000).collect();
    let matcher = Matcher::new(&[pattern.as_str()], MatcherConfig::default()).unwrap();

    let mut text = vec![b'a'; 5_000];
    text.extend(pattern.bytes());
    text.extend(vec![b'b'; 5_000]);

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&text).unwrap();

    let matches = matcher.match_file_memmap(tmp.path(), 4096).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start, 5_000);
    assert_eq!(matches[0].end, 5_000 + pattern.len());
}

#[test]
fn chunked_scan_independent_of_chunk_size() {
    let matcher = Matcher::new(&["needle", "pin", "haystack"], MatcherConfig::default()).unwrap();
    let mut text = Vec::new();
    for i in 0..500 {
        if i % 37 == 0 {
            text.extend_from_slice(b"needle");
        } else if i % 17 == 0 {
            text.extend_from_slice(b"pin");
        } else {
            text.extend_from_slice(b"filler ");
        }
    }
    text.extend_from_slice(b"haystack");

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&text).unwrap();

    let baseline = matcher.match_bytes(&text);
    for chunk_size in [16, 64, 256, 1024, 8192] {
        let chunked = matcher.match_file_memmap(tmp.path(), chunk_size).unwrap();
        assert_eq!(chunked, baseline, "mismatch at chunk_size={chunk_size}");
    }
}

#[test]
fn parallel_scan_agrees_with_sequential_across_thread_counts() {
    let matcher = Matcher::new(&["alpha", "beta", "gamma"], MatcherConfig::default()).unwrap();
    let mut text = Vec::new();
    for i in 0..2000 {
        match i % 5 {
            0 => text.extend_from_slice(b"alpha "),
            1 => text.extend_from_slice(b"beta "),
            2 => text.extend_from_slice(b"gamma "),
            _ => text.extend_from_slice(b"filler "),
        }
    }

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&text).unwrap();

    let baseline = matcher.match_bytes(&text);
    for threads in [1, 2, 4, 8] {
        let parallel = matcher.match_file_memmap_parallel(tmp.path(), threads).unwrap();
        assert_eq!(parallel, baseline, "mismatch at threads={threads}");
    }
}

#[test]
fn match_file_reports_line_numbers() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    writeln!(tmp, "nothing here").unwrap();
    writeln!(tmp, "an error occurred").unwrap();
    writeln!(tmp, "all clear").unwrap();
    writeln!(tmp, "another error").unwrap();

    let matcher = Matcher::new(&["error"], MatcherConfig::default()).unwrap();
    let matches = matcher.match_file(tmp.path()).unwrap();

    let lines: Vec<usize> = matches.iter().map(|m| m.line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn match_stream_sees_matches_once_buffer_grows() {
    let matcher = Matcher::new(&["complete"], MatcherConfig::default()).unwrap();
    assert!(matcher.match_stream(b"not yet comp").is_empty());
    assert_eq!(matcher.match_stream(b"not yet complete now").len(), 1);
}

#[test]
fn empty_pattern_set_reports_named_error() {
    let err = Matcher::new(&["", "", ""], MatcherConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Pattern set cannot be empty");
}
