//! Memory-mapped file access for the chunked and parallel scanners.

use memmap2::{Mmap, MmapOptions};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Errors specific to opening or mapping a file.
#[derive(Debug)]
pub enum MmapError {
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for MmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmapError::Io { path, source } => {
                write!(f, "failed to mmap {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for MmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmapError::Io { source, .. } => Some(source),
        }
    }
}

impl MmapError {
    /// Collapse into a plain `io::Error` for callers that want one error
    /// type across mmap and regular file I/O (see [`crate::matcher`]).
    pub fn into_io(self) -> std::io::Error {
        match self {
            MmapError::Io { source, .. } => source,
        }
    }
}

/// A read-only memory-mapped file, holding the mapping alive for as long as
/// the scan needs it.
pub struct MmapFile {
    mmap: Option<Mmap>,
    path: PathBuf,
}

impl MmapFile {
    /// Map `path` read-only. Zero-length files are represented with an
    /// empty byte slice rather than mapped (mapping a zero-length file is
    /// platform-dependent and `memmap2` rejects it outright).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MmapError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| MmapError::Io {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| MmapError::Io {
                path: path.clone(),
                source,
            })?
            .len();

        if len == 0 {
            return Ok(Self { mmap: None, path });
        }

        // SAFETY: the file is not expected to be mutated by another process
        // for the duration of the scan; this is the same assumption
        // `memmap2`-based tools universally make for read-only scanning.
        let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|source| MmapError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            mmap: Some(mmap),
            path,
        })
    }

    /// Borrow the mapped bytes.
    pub fn as_slice(&self) -> &[u8] {
        match &self.mmap {
            Some(m) => &m[..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn maps_file_contents() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello mmap world").unwrap();
        let mapped = MmapFile::open(tmp.path()).unwrap();
        assert_eq!(mapped.as_slice(), b"hello mmap world");
    }

    #[test]
    fn empty_file_maps_to_empty_slice() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mapped = MmapFile::open(tmp.path()).unwrap();
        assert!(mapped.is_empty());
        assert_eq!(mapped.as_slice(), b"");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = MmapFile::open("/nonexistent/path/does-not-exist").unwrap_err();
        assert!(matches!(err, MmapError::Io { .. }));
    }
}
