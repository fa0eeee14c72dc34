//! Loading saved inputs into owned buffers.

use repro_core::{CoreResult, InputDigest, IoKind, IoPhase, ReplayConfig, ReproError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// An input read completely into memory.
///
/// Its length is the number of bytes actually read, never a size
/// reported ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    path: PathBuf,
    bytes: Vec<u8>,
    digest: InputDigest,
}

impl InputBuffer {
    /// Wrap bytes read from `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let digest = InputDigest::compute(&bytes);
        Self {
            path: path.into(),
            bytes,
            digest,
        }
    }

    /// Source path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contents
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the input is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Digest of the contents
    #[must_use]
    pub fn digest(&self) -> InputDigest {
        self.digest
    }
}

/// Reads input files to completion
#[derive(Debug, Clone, Default)]
pub struct InputLoader {
    limit: Option<u64>,
    strict_length: bool,
}

impl InputLoader {
    /// Loader with no size limit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader configured from a replay config
    #[must_use]
    pub fn from_config(config: &ReplayConfig) -> Self {
        Self {
            limit: config.length_limit(),
            strict_length: config.strict_length,
        }
    }

    /// Reject inputs longer than `limit` bytes
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Fail instead of truncating when the read length differs from metadata
    #[must_use]
    pub fn with_strict_length(mut self, strict: bool) -> Self {
        self.strict_length = strict;
        self
    }

    /// Read the file at `path` into memory
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or read, exceeds the
    /// limit, or its buffer cannot be allocated
    pub fn load(&self, path: &Path) -> CoreResult<InputBuffer> {
        let file = File::open(path).map_err(|e| ReproError::io(path, IoPhase::Open, &e))?;
        let metadata = file
            .metadata()
            .map_err(|e| ReproError::io(path, IoPhase::Open, &e))?;

        // Opening a directory succeeds on Unix; reading it does not.
        if metadata.is_dir() {
            return Err(ReproError::Io {
                path: path.to_path_buf(),
                phase: IoPhase::Open,
                kind: IoKind::IsDirectory,
                message: "expected a file".to_string(),
            });
        }

        // Only regular files have a meaningful length up front.
        let expected = metadata.is_file().then(|| metadata.len());
        self.load_from_reader(path, file, expected)
    }

    /// Read `reader` to completion, with `expected` as a capacity hint
    ///
    /// # Errors
    ///
    /// Same as [`InputLoader::load`]
    pub fn load_from_reader<R: Read>(
        &self,
        path: &Path,
        reader: R,
        expected: Option<u64>,
    ) -> CoreResult<InputBuffer> {
        if let (Some(limit), Some(len)) = (self.limit, expected) {
            if len > limit {
                return Err(ReproError::InputTooLarge {
                    path: path.to_path_buf(),
                    size: len,
                    limit,
                });
            }
        }

        let mut bytes = Vec::new();
        if let Some(len) = expected {
            let alloc_err = || ReproError::Allocation {
                path: path.to_path_buf(),
                len,
            };
            let capacity = usize::try_from(len).map_err(|_| alloc_err())?;
            bytes.try_reserve_exact(capacity).map_err(|_| alloc_err())?;
        }

        // One byte past the limit is enough to tell that it was exceeded.
        let cap = self.limit.map_or(u64::MAX, |limit| limit.saturating_add(1));
        if let Err(err) = reader.take(cap).read_to_end(&mut bytes) {
            // Growing past the hint can fail the same way reserving it can.
            if err.kind() == ErrorKind::OutOfMemory {
                return Err(ReproError::Allocation {
                    path: path.to_path_buf(),
                    len: expected.unwrap_or(bytes.len() as u64),
                });
            }
            return Err(ReproError::io(path, IoPhase::Read, &err));
        }

        let actual = bytes.len() as u64;
        if let Some(limit) = self.limit {
            if actual > limit {
                return Err(ReproError::InputTooLarge {
                    path: path.to_path_buf(),
                    size: actual,
                    limit,
                });
            }
        }

        if let Some(expected) = expected {
            if expected != actual {
                if self.strict_length {
                    return Err(ReproError::LengthMismatch {
                        path: path.to_path_buf(),
                        expected,
                        actual,
                    });
                }
                tracing::warn!(
                    path = %path.display(),
                    expected,
                    actual,
                    "input changed size while reading, using bytes read"
                );
            }
        }

        tracing::debug!(path = %path.display(), len = actual, "input loaded");
        Ok(InputBuffer::new(path, bytes))
    }
}
