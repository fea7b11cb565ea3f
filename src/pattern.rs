//! Pattern normalization: filtering, ordinal assignment, and case folding.

use crate::error::{Error, Result};

/// ASCII-only case fold: `A..Z` -> `a..z`, every other byte unchanged.
#[inline]
pub fn fold_byte(b: u8) -> u8 {
    if b.is_ascii_uppercase() {
        b | 0x20
    } else {
        b
    }
}

/// Fold a byte slice in place into a freshly allocated buffer.
pub fn fold(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().map(fold_byte).collect()
}

/// A pattern set after dropping empty patterns and assigning stable ordinals.
///
/// `originals[i]` is the pattern as supplied by the caller; `folded[i]` is
/// its case-folded byte sequence (identical to `originals[i]`'s bytes when
/// `case_insensitive` is false). Both are indexed by pattern ordinal `i`.
pub struct NormalizedPatterns {
    originals: Vec<String>,
    folded: Vec<Vec<u8>>,
}

impl NormalizedPatterns {
    /// Drop empty patterns, fail if nothing remains, and fold the survivors.
    pub fn build<S: AsRef<str>>(patterns: &[S], case_insensitive: bool) -> Result<Self> {
        let mut originals = Vec::new();
        let mut folded = Vec::new();

        for p in patterns {
            let p = p.as_ref();
            if p.is_empty() {
                continue;
            }
            let bytes = p.as_bytes();
            folded.push(if case_insensitive { fold(bytes) } else { bytes.to_vec() });
            originals.push(p.to_string());
        }

        if originals.is_empty() {
            return Err(Error::EmptyPatternSet);
        }

        Ok(Self { originals, folded })
    }

    /// Number of surviving patterns.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// There is always at least one pattern after a successful `build`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Original pattern strings in ordinal order.
    pub fn originals(&self) -> &[String] {
        &self.originals
    }

    /// Folded byte sequences in ordinal order (the trie is built over these).
    pub fn folded(&self) -> &[Vec<u8>] {
        &self.folded
    }

    /// Length in bytes of the longest pattern, used to size chunk overlap.
    pub fn max_len(&self) -> usize {
        self.folded.iter().map(|p| p.len()).max().unwrap_or(0)
    }
}
