//! Aho–Corasick automaton: goto trie, failure links, and merged output sets.
//!
//! Built once from a normalized pattern set and frozen; scans never mutate
//! it and may proceed concurrently from any number of threads (it holds no
//! interior mutability).

use crate::pattern::NormalizedPatterns;
use std::collections::VecDeque;

const ROOT: u32 = 0;

/// Number of explicit trie edges above which a state switches from a linear
/// scan over a small edge list to a dense 256-entry lookup table.
///
/// Mirrors the state-size classification used for building the automaton:
/// most states in a literal-pattern trie have very few children, so a
/// linear scan wins; root and other heavily-branching states benefit from
/// O(1) array indexing.
const DENSE_THRESHOLD: usize = 8;

/// Transition table for a single automaton state.
enum Edges {
    Empty,
    Few(Vec<(u8, u32)>),
    Dense(Box<[u32; 256]>),
}

const NO_EDGE: u32 = u32::MAX;

impl Edges {
    fn get(&self, byte: u8) -> Option<u32> {
        match self {
            Edges::Empty => None,
            Edges::Few(edges) => edges.iter().find(|&&(b, _)| b == byte).map(|&(_, t)| t),
            Edges::Dense(table) => {
                let t = table[byte as usize];
                if t == NO_EDGE {
                    None
                } else {
                    Some(t)
                }
            }
        }
    }
}

struct State {
    edges: Edges,
    failure: u32,
    /// Pattern ordinals that end at this state, including those inherited
    /// from failure-link suffixes. Sorted and deduplicated.
    outputs: Vec<u32>,
}

/// An immutable, thread-shareable multi-pattern automaton over byte strings.
pub struct Automaton {
    states: Vec<State>,
    case_insensitive: bool,
    max_pattern_len: usize,
}

impl Automaton {
    /// Build the automaton from an already-normalized pattern set.
    pub fn build(patterns: &NormalizedPatterns, case_insensitive: bool) -> Self {
        let mut builder_edges: Vec<Vec<(u8, u32)>> = vec![Vec::new()];
        let mut builder_outputs: Vec<Vec<u32>> = vec![Vec::new()];

        for (ordinal, folded) in patterns.folded().iter().enumerate() {
            let mut current = ROOT;
            for &byte in folded {
                let existing = builder_edges[current as usize]
                    .iter()
                    .find(|&&(b, _)| b == byte)
                    .map(|&(_, t)| t);

                current = match existing {
                    Some(next) => next,
                    None => {
                        let new_id = builder_edges.len() as u32;
                        builder_edges.push(Vec::new());
                        builder_outputs.push(Vec::new());
                        builder_edges[current as usize].push((byte, new_id));
                        new_id
                    }
                };
            }
            builder_outputs[current as usize].push(ordinal as u32);
        }

        let failure = Self::compute_failure_links(&builder_edges, &mut builder_outputs);

        let states = builder_edges
            .into_iter()
            .zip(builder_outputs)
            .zip(failure)
            .map(|((edges, mut outputs), failure)| {
                outputs.sort_unstable();
                outputs.dedup();
                State {
                    edges: Self::pack_edges(edges),
                    failure,
                    outputs,
                }
            })
            .collect();

        Automaton {
            states,
            case_insensitive,
            max_pattern_len: patterns.max_len(),
        }
    }

    fn pack_edges(edges: Vec<(u8, u32)>) -> Edges {
        if edges.is_empty() {
            Edges::Empty
        } else if edges.len() <= DENSE_THRESHOLD {
            Edges::Few(edges)
        } else {
            let mut table = Box::new([NO_EDGE; 256]);
            for (b, t) in edges {
                table[b as usize] = t;
            }
            Edges::Dense(table)
        }
    }

    /// BFS over the trie computing failure links, merging output sets from
    /// failure-link suffixes as each state is discovered.
    fn compute_failure_links(
        edges: &[Vec<(u8, u32)>],
        outputs: &mut [Vec<u32>],
    ) -> Vec<u32> {
        let n = edges.len();
        let mut failure = vec![ROOT; n];
        let mut queue = VecDeque::new();

        for &(_, child) in &edges[ROOT as usize] {
            failure[child as usize] = ROOT;
            queue.push_back(child);
        }

        while let Some(state) = queue.pop_front() {
            for &(byte, child) in &edges[state as usize] {
                queue.push_back(child);

                let mut fallback = failure[state as usize];
                let target = loop {
                    if fallback == ROOT {
                        break edges[ROOT as usize]
                            .iter()
                            .find(|&&(b, _)| b == byte)
                            .map(|&(_, t)| t)
                            .filter(|&t| t != child)
                            .unwrap_or(ROOT);
                    }
                    if let Some(t) = edges[fallback as usize]
                        .iter()
                        .find(|&&(b, _)| b == byte)
                        .map(|&(_, t)| t)
                    {
                        break t;
                    }
                    fallback = failure[fallback as usize];
                };

                failure[child as usize] = target;

                let suffix_outputs = outputs[target as usize].clone();
                outputs[child as usize].extend(suffix_outputs);
            }
        }

        failure
    }

    /// Whether this automaton folds ASCII case before matching.
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Length in bytes of the longest pattern compiled into this automaton.
    pub fn max_pattern_len(&self) -> usize {
        self.max_pattern_len
    }

    /// Follow one byte transition from `state`, walking failure links as
    /// needed. Returns the resulting state (root if nothing matches).
    #[inline]
    pub(crate) fn step(&self, state: u32, byte: u8) -> u32 {
        let mut current = state;
        loop {
            if let Some(next) = self.states[current as usize].edges.get(byte) {
                return next;
            }
            if current == ROOT {
                return ROOT;
            }
            current = self.states[current as usize].failure;
        }
    }

    /// Root state, the starting point of every scan.
    #[inline]
    pub(crate) fn root() -> u32 {
        ROOT
    }

    /// Pattern ordinals recognized upon arrival at `state`.
    #[inline]
    pub(crate) fn outputs(&self, state: u32) -> &[u32] {
        &self.states[state as usize].outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::NormalizedPatterns;

    fn build(patterns: &[&str], case_insensitive: bool) -> Automaton {
        let normalized = NormalizedPatterns::build(patterns, case_insensitive).unwrap();
        Automaton::build(&normalized, case_insensitive)
    }

    fn run(automaton: &Automaton, text: &[u8]) -> Vec<u32> {
        let mut state = Automaton::root();
        let mut found = Vec::new();
        for &b in text {
            let byte = if automaton.case_insensitive() {
                crate::pattern::fold_byte(b)
            } else {
                b
            };
            state = automaton.step(state, byte);
            found.extend_from_slice(automaton.outputs(state));
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    #[test]
    fn finds_all_patterns_in_overlapping_text() {
        let automaton = build(&["he", "she", "his", "hers"], false);
        let found = run(&automaton, b"she sells his shells");
        assert!(found.contains(&0)); // "he" inside "she"
        assert!(found.contains(&1)); // "she"
        assert!(found.contains(&2)); // "his"
    }

    #[test]
    fn case_insensitive_matches_folded_bytes() {
        let automaton = build(&["Hello", "World"], true);
        let found = run(&automaton, b"hello world");
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn no_match_returns_empty() {
        let automaton = build(&["hello", "world"], false);
        assert!(run(&automaton, b"nothing here").is_empty());
    }

    #[test]
    fn overlapping_suffix_patterns_all_recognized() {
        let automaton = build(&["test", "testing", "est"], false);
        let found = run(&automaton, b"testing");
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn dense_state_with_many_children() {
        let patterns: Vec<String> = (0u8..20).map(|i| format!("{}x", (b'a' + i) as char)).collect();
        let refs: Vec<&str> = patterns.iter().map(|s| s.as_str()).collect();
        let automaton = build(&refs, false);
        let found = run(&automaton, b"ax bx cx");
        assert_eq!(found.len(), 3);
    }
}
