//! Parallel mmap scanner: partition the mapped file across worker threads,
//! each independently scanning its own primary region, then merge.
//!
//! Grounded on `matchy::literal_mph`'s use of `rayon` for CPU-bound fan-out
//! rather than hand-rolled `thread::spawn`/`join` bookkeeping. Each worker
//! is handed a disjoint primary region of the file and reuses
//! [`crate::chunked::scan_window`] exactly as the single-threaded chunked
//! scanner does for one chunk, so the overlap and primary-region rules are
//! identical between the sequential and parallel paths.

use rayon::prelude::*;

use crate::automaton::Automaton;
use crate::chunked::{scan_window, SliceSource};
use crate::pattern::NormalizedPatterns;
use crate::postfilter::{self, Match};

/// Scan `data` using `threads` workers, each covering roughly `data.len() /
/// threads` bytes. Workers never lock each other; each returns its own
/// candidate list, and the coordinator merges, applies the overlap policy,
/// and sorts once all workers have finished. If any worker fails, the first
/// error encountered (by partition order) is returned and all partial
/// results are discarded.
pub fn scan(
    data: &[u8],
    automaton: &Automaton,
    patterns: &NormalizedPatterns,
    whole_word: bool,
    overlapping: bool,
    threads: usize,
) -> std::io::Result<Vec<Match>> {
    let threads = threads.max(1);
    let len = data.len();
    let pattern_lens: Vec<usize> = patterns.folded().iter().map(|p| p.len()).collect();

    if len == 0 {
        return Ok(Vec::new());
    }

    let partition_size = len.div_ceil(threads);
    let boundaries: Vec<usize> = (0..=threads)
        .map(|i| (i * partition_size).min(len))
        .collect();

    let results: Vec<std::io::Result<Vec<(usize, usize, u32)>>> = boundaries
        .windows(2)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            if start >= end {
                return Ok(Vec::new());
            }
            let mut source = SliceSource::new(data);
            let mut out = Vec::new();
            scan_window(
                &mut source,
                automaton,
                &pattern_lens,
                whole_word,
                start,
                end - start,
                &mut out,
            )?;
            Ok(out)
        })
        .collect();

    let mut merged = Vec::new();
    for r in results {
        merged.extend(r?);
    }

    Ok(postfilter::apply_overlap(merged, overlapping, patterns.originals()))
}
