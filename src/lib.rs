//! `litescan`: a multi-pattern literal text search engine built on an
//! Aho–Corasick automaton, with in-memory, chunked-mmap, streamed, and
//! parallel scanning over the same compiled pattern set.
//!
//! ```
//! use litescan::{Matcher, MatcherConfig};
//!
//! let matcher = Matcher::new(&["fox", "jump", "quick"], MatcherConfig::default())?;
//! let matches = matcher.match_bytes(b"The Quick Brown Fox Jumps");
//! assert_eq!(matches.len(), 3);
//! # Ok::<(), litescan::Error>(())
//! ```

pub mod automaton;
pub mod chunked;
pub mod error;
pub mod file_reader;
pub mod matcher;
pub mod mmap_file;
pub mod parallel;
pub mod pattern;
pub mod postfilter;
pub mod scanner;

pub use error::{Error, Result};
pub use matcher::{LineMatch, Matcher, MatcherBuilder, MatcherConfig};
pub use postfilter::Match;
