//! Chunked scanning over a byte source too large (or too slow) to hand the
//! scanner in one piece, while still reporting every match exactly once.
//!
//! Each chunk is scanned independently from the automaton's root state, so
//! a pattern straddling a chunk boundary is only found if both chunks carry
//! enough shared context. We achieve that with `M - 1` bytes of overlap
//! (`M` = longest pattern length) and a "primary region" rule: a chunk only
//! reports matches whose start falls before the overlap it shares with the
//! next chunk, leaving the next chunk to report anything that starts in the
//! shared region. The last chunk has no next chunk, so it reports
//! everything remaining.

use std::io;
use std::ops::Range;

use crate::automaton::Automaton;
use crate::pattern::NormalizedPatterns;
use crate::postfilter::{self, Match};

/// A source of bytes addressable by absolute offset, for a logical input of
/// known total length. Implementations may hold the whole input (mmap) or
/// maintain a sliding window over sequential reads (streaming files).
pub trait ChunkSource {
    /// Total length of the logical input, if known up front. `None` when
    /// the source is still being read and the length isn't known yet (the
    /// chunked scanner treats `None` as "keep going until a short read").
    fn len(&self) -> Option<usize>;

    /// Return the bytes in `range`, reading further as needed. `range.end`
    /// may extend past the true end of input; implementations must clip
    /// and return whatever is actually available starting at `range.start`.
    fn slice(&mut self, range: Range<usize>) -> io::Result<&[u8]>;
}

/// In-memory source over a single fully-available byte slice (used by the
/// mmap-backed scanner, since the whole file is already addressable).
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ChunkSource for SliceSource<'_> {
    fn len(&self) -> Option<usize> {
        Some(self.data.len())
    }

    fn slice(&mut self, range: Range<usize>) -> io::Result<&[u8]> {
        let end = range.end.min(self.data.len());
        let start = range.start.min(end);
        Ok(&self.data[start..end])
    }
}

/// Sequential-read source with a bounded sliding buffer, for reading chunks
/// out of a `Read` without holding the whole input in memory.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    /// Absolute offset of `buf[0]`.
    buf_base: usize,
    eof: bool,
}

impl<R: io::Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            buf_base: 0,
            eof: false,
        }
    }

    fn fill_to(&mut self, want_end: usize, read_size: usize) -> io::Result<()> {
        while !self.eof && self.buf_base + self.buf.len() < want_end {
            let mut chunk = vec![0u8; read_size];
            let n = {
                let mut total = 0;
                loop {
                    match self.reader.read(&mut chunk[total..]) {
                        Ok(0) => break,
                        Ok(k) => {
                            total += k;
                            if total == chunk.len() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
                total
            };
            if n == 0 {
                self.eof = true;
                break;
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }

    /// Drop buffered bytes before `keep_from`, since the scanner never asks
    /// for them again.
    fn drop_before(&mut self, keep_from: usize) {
        if keep_from > self.buf_base {
            let drop_n = (keep_from - self.buf_base).min(self.buf.len());
            self.buf.drain(..drop_n);
            self.buf_base += drop_n;
        }
    }
}

impl<R: io::Read> ChunkSource for ReaderSource<R> {
    fn len(&self) -> Option<usize> {
        None
    }

    fn slice(&mut self, range: Range<usize>) -> io::Result<&[u8]> {
        self.drop_before(range.start);
        // Read generously past what's asked so repeated small reads ahead
        // (the 1-byte boundary lookahead) don't thrash the underlying reader.
        let read_size = (range.end - range.start).max(64 * 1024);
        self.fill_to(range.end, read_size)?;

        let local_start = range.start.saturating_sub(self.buf_base).min(self.buf.len());
        let local_end = range
            .end
            .saturating_sub(self.buf_base)
            .min(self.buf.len());
        Ok(&self.buf[local_start..local_end])
    }
}

/// Scan one primary region `[primary_start, primary_start + stride)`,
/// extended on both sides by one byte of whole-word context and on the
/// right by the automaton's overlap requirement, appending surviving
/// candidates to `out`. Returns whether this was the last region (no data
/// remained past it).
///
/// This is the unit both [`scan_candidates`]'s internal loop and the
/// parallel scanner's per-worker partitions are built from: the parallel
/// scanner simply calls this once per partition instead of looping.
pub(crate) fn scan_window<S: ChunkSource>(
    source: &mut S,
    automaton: &Automaton,
    pattern_lens: &[usize],
    whole_word: bool,
    primary_start: usize,
    stride: usize,
    out: &mut Vec<(usize, usize, u32)>,
) -> io::Result<bool> {
    let overlap = automaton.max_pattern_len().saturating_sub(1);
    let read_end = primary_start + stride + overlap;
    let ext_start = primary_start.saturating_sub(1);
    let total_len = source.len();
    let ext = source.slice(ext_start..read_end + 1)?;

    if ext.is_empty() {
        return Ok(true);
    }

    let has_left_margin = primary_start > 0;
    let local_window_start = if has_left_margin { 1 } else { 0 };

    let fetched_end = ext_start + ext.len();
    let window_end_local = (read_end.min(fetched_end) - ext_start).max(local_window_start);
    let window = &ext[local_window_start..window_end_local];

    if window.is_empty() {
        return Ok(true);
    }

    let primary_end = primary_start + stride;

    // For a known-length source, "last" means this *partition's own* primary
    // region reaches the end of input, not merely that this window's
    // overlap-extended read happens to reach it — the latter can go true for
    // a non-final partition too (whenever the pattern length is a sizable
    // fraction of the partition size), which would make this call over-report
    // into the next partition's primary region. See the parallel scanner,
    // where every worker wraps the *whole* file in one `SliceSource` and only
    // `primary_end` (this worker's own partition boundary), not `read_end`,
    // tells `scan_window` whether it is the last partition.
    let is_last = match total_len {
        Some(l) => primary_end >= l,
        None => fetched_end <= read_end,
    };

    let raw_hits = crate::scanner::scan_raw(window, primary_start, automaton);

    for hit in raw_hits {
        let len = pattern_lens[hit.pattern_ordinal as usize];
        let start = hit.end - len;
        let end = hit.end;

        if !is_last && start >= primary_end {
            continue; // left for the next region to report
        }

        if whole_word {
            let left = if start > ext_start {
                Some(ext[start - ext_start - 1])
            } else {
                None
            };
            let right = if end - ext_start < ext.len() {
                Some(ext[end - ext_start])
            } else {
                None
            };
            if !postfilter::word_boundary_ok(left, right) {
                continue;
            }
        }

        out.push((start, end, hit.pattern_ordinal));
    }

    Ok(is_last)
}

/// Scan `source` (of logical length `input_len`, if known) in chunks of
/// `chunk_size` bytes, returning deduplicated, whole-word-filtered
/// candidates. Callers apply [`postfilter::apply_overlap`] once all chunks
/// (and, for the parallel scanner, all workers) have reported.
pub fn scan_candidates<S: ChunkSource>(
    source: &mut S,
    automaton: &Automaton,
    patterns: &NormalizedPatterns,
    whole_word: bool,
    chunk_size: usize,
) -> io::Result<Vec<(usize, usize, u32)>> {
    let overlap = automaton.max_pattern_len().saturating_sub(1);
    let stride = chunk_size - overlap;
    let pattern_lens: Vec<usize> = patterns.folded().iter().map(|p| p.len()).collect();

    let mut candidates = Vec::new();
    let mut primary_start = 0usize;

    loop {
        let is_last = scan_window(
            source,
            automaton,
            &pattern_lens,
            whole_word,
            primary_start,
            stride,
            &mut candidates,
        )?;

        if is_last {
            break;
        }
        primary_start += stride;
    }

    Ok(candidates)
}

/// Full pipeline: chunked scan plus the overlap policy, for a single source.
pub fn scan<S: ChunkSource>(
    source: &mut S,
    automaton: &Automaton,
    patterns: &NormalizedPatterns,
    whole_word: bool,
    overlapping: bool,
    chunk_size: usize,
) -> io::Result<Vec<Match>> {
    let candidates = scan_candidates(source, automaton, patterns, whole_word, chunk_size)?;
    Ok(postfilter::apply_overlap(candidates, overlapping, patterns.originals()))
}
