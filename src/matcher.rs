//! Public façade: construct a [`Matcher`] once from a pattern set, then
//! scan any number of inputs through whichever of the seven entry points
//! fits the caller's data source.

use std::io::Read;
use std::path::Path;

use crate::automaton::Automaton;
use crate::chunked::{self, ReaderSource, SliceSource};
use crate::error::{Error, Result};
use crate::file_reader;
use crate::mmap_file::MmapFile;
use crate::pattern::NormalizedPatterns;
use crate::postfilter::{self, Match};
use crate::scanner;

/// The three behavioral knobs every scan obeys, mirroring the reference
/// `TextMatcher(patterns, overlapping=True, case_insensitive=True,
/// whole_word=False)` constructor.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    pub overlapping: bool,
    pub case_insensitive: bool,
    pub whole_word: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            overlapping: true,
            case_insensitive: true,
            whole_word: false,
        }
    }
}

/// A match reported by [`Matcher::match_file`], with the 1-based source
/// line number prepended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub pattern: String,
}

/// A compiled pattern set ready to scan. Construction is the expensive
/// step (building the automaton); scanning is cheap and may run
/// concurrently across any number of threads from a shared `&Matcher`.
pub struct Matcher {
    automaton: Automaton,
    patterns: NormalizedPatterns,
    config: MatcherConfig,
}

impl Matcher {
    /// Build a matcher from a pattern set. Empty patterns are dropped; an
    /// entirely empty surviving set is an error.
    pub fn new<S: AsRef<str>>(patterns: &[S], config: MatcherConfig) -> Result<Self> {
        let normalized = NormalizedPatterns::build(patterns, config.case_insensitive)?;
        let automaton = Automaton::build(&normalized, config.case_insensitive);
        Ok(Self {
            automaton,
            patterns: normalized,
            config,
        })
    }

    /// Start building a [`Matcher`] with non-default configuration one flag
    /// at a time.
    pub fn builder<S: AsRef<str>>(patterns: &[S]) -> MatcherBuilder<'_, S> {
        MatcherBuilder {
            patterns,
            config: MatcherConfig::default(),
        }
    }

    /// Original, pre-fold pattern strings in ordinal order.
    pub fn patterns(&self) -> &[String] {
        self.patterns.originals()
    }

    /// The configuration this matcher was built with.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    fn candidates_over(&self, bytes: &[u8], base_offset: usize, input_len: usize) -> Vec<(usize, usize, u32)> {
        let raw_hits = scanner::scan_raw(bytes, base_offset, &self.automaton);
        let pattern_lens: Vec<usize> = self.patterns.folded().iter().map(|p| p.len()).collect();
        postfilter::resolve_candidates(
            &raw_hits,
            bytes,
            base_offset,
            input_len,
            &pattern_lens,
            self.config.whole_word,
        )
    }

    /// Scan a single in-memory buffer in its entirety.
    pub fn match_bytes(&self, bytes: &[u8]) -> Vec<Match> {
        self.match_bytes_at(bytes, 0)
    }

    /// As [`Matcher::match_bytes`], but `bytes` is itself a slice of some
    /// larger logical input starting at absolute offset `base_offset`; every
    /// reported `start`/`end` is in that larger input's coordinate space.
    fn match_bytes_at(&self, bytes: &[u8], base_offset: usize) -> Vec<Match> {
        let candidates = self.candidates_over(bytes, base_offset, base_offset + bytes.len());
        postfilter::apply_overlap(candidates, self.config.overlapping, self.patterns.originals())
    }

    /// Scan a single buffer representing the *current* contents of a
    /// growing stream. Each call re-scans `buffer` from scratch: there is
    /// no retained state between calls, so callers deduplicate by
    /// `(start, end, pattern)` across calls themselves if they only want
    /// newly-completed matches.
    pub fn match_stream(&self, buffer: &[u8]) -> Vec<Match> {
        self.match_bytes(buffer)
    }

    /// Scan a file line by line (transparently gzip-decompressing `.gz`
    /// files), prefixing every match with its 1-based line number. Lines
    /// are read as raw bytes, not validated as UTF-8. `start`/`end` are
    /// file-absolute byte offsets, not offsets relative to the line, so
    /// results agree with [`Matcher::match_file_memmap`] /
    /// [`Matcher::match_file_stream`] once the line number is dropped.
    pub fn match_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LineMatch>> {
        let path = path.as_ref();
        let mut reader = file_reader::open(path).map_err(|e| Error::io_at(path, e))?;
        let mut out = Vec::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        let mut offset = 0usize;

        while let Some(raw_len) =
            file_reader::read_line(&mut *reader, &mut buf).map_err(|e| Error::io_at(path, e))?
        {
            line_no += 1;
            for m in self.match_bytes_at(&buf, offset) {
                out.push(LineMatch {
                    line: line_no,
                    start: m.start,
                    end: m.end,
                    pattern: m.pattern,
                });
            }
            offset += raw_len;
        }

        Ok(out)
    }

    /// Scan a file by memory-mapping it whole and chunking the automaton
    /// feed internally, so arbitrarily large files never need the whole
    /// scan buffer duplicated.
    pub fn match_file_memmap<P: AsRef<Path>>(&self, path: P, chunk_size: usize) -> Result<Vec<Match>> {
        let path = path.as_ref();
        let mapped = MmapFile::open(path).map_err(|e| Error::io_at(path, e.into_io()))?;
        let chunk_size = self.effective_chunk_size(chunk_size)?;

        let mut source = SliceSource::new(mapped.as_slice());
        chunked::scan(
            &mut source,
            &self.automaton,
            &self.patterns,
            self.config.whole_word,
            self.config.overlapping,
            chunk_size,
        )
        .map_err(|e| Error::io_at(path, e))
    }

    /// Same as [`Matcher::match_file_memmap`] but fans the scan out across
    /// `threads` workers over disjoint partitions of the mapped file.
    pub fn match_file_memmap_parallel<P: AsRef<Path>>(
        &self,
        path: P,
        threads: usize,
    ) -> Result<Vec<Match>> {
        let path = path.as_ref();
        let mapped = MmapFile::open(path).map_err(|e| Error::io_at(path, e.into_io()))?;

        crate::parallel::scan(
            mapped.as_slice(),
            &self.automaton,
            &self.patterns,
            self.config.whole_word,
            self.config.overlapping,
            threads,
        )
        .map_err(|e| Error::io_at(path, e))
    }

    /// Scan a file via sequential reads, never holding more than a bounded
    /// sliding window in memory. `buffer_size` is the nominal read-ahead
    /// size used to size each chunk; it is raised to the longest pattern
    /// length when smaller.
    pub fn match_file_stream<P: AsRef<Path>>(&self, path: P, buffer_size: usize) -> Result<Vec<Match>> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io_at(path, e))?;
        self.match_read_stream(file, buffer_size)
            .map_err(|e| e.with_path(path))
    }

    /// As [`Matcher::match_file_stream`] but over any [`Read`], for callers
    /// that already have an open reader (sockets, pipes, `file_reader`'s
    /// gzip-transparent streams). A `buffer_size` of `0` is rejected with
    /// [`Error::InvalidChunkSize`], exactly as [`Matcher::match_file_memmap`]
    /// rejects a zero `chunk_size`.
    pub fn match_read_stream<R: Read>(&self, reader: R, buffer_size: usize) -> Result<Vec<Match>> {
        let chunk_size = self.effective_chunk_size(buffer_size)?;
        let mut source = ReaderSource::new(reader);
        let matches = chunked::scan(
            &mut source,
            &self.automaton,
            &self.patterns,
            self.config.whole_word,
            self.config.overlapping,
            chunk_size,
        )?;
        Ok(matches)
    }

    fn effective_chunk_size(&self, requested: usize) -> Result<usize> {
        if requested == 0 {
            return Err(Error::InvalidChunkSize(requested));
        }
        Ok(requested.max(self.automaton.max_pattern_len().max(1)))
    }
}

/// Builder for [`Matcher`], sugar over [`Matcher::new`] for callers who
/// want to set one non-default flag without naming all three.
pub struct MatcherBuilder<'a, S: AsRef<str>> {
    patterns: &'a [S],
    config: MatcherConfig,
}

impl<'a, S: AsRef<str>> MatcherBuilder<'a, S> {
    pub fn overlapping(mut self, value: bool) -> Self {
        self.config.overlapping = value;
        self
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.config.case_insensitive = value;
        self
    }

    pub fn whole_word(mut self, value: bool) -> Self {
        self.config.whole_word = value;
        self
    }

    pub fn build(self) -> Result<Matcher> {
        Matcher::new(self.patterns, self.config)
    }
}
