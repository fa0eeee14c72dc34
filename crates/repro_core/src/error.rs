//! Error taxonomy for a replay run.
//!
//! Every variant is terminal: the driver never retries. Each one maps to
//! exactly one [`ExitStatus`](crate::ExitStatus).

use std::fmt;
use std::path::PathBuf;

/// Core result type
pub type CoreResult<T> = Result<T, ReproError>;

/// Which step of loading an input failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoPhase {
    /// Opening the file or reading its metadata
    Open,
    /// Reading the file contents
    Read,
}

impl fmt::Display for IoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Read => write!(f, "read"),
        }
    }
}

/// Coarse classification of an I/O failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoKind {
    /// The path does not exist
    NotFound,
    /// The process may not read the path
    PermissionDenied,
    /// The path names a directory, not a file
    IsDirectory,
    /// Anything else reported by the OS
    Other,
}

impl From<std::io::ErrorKind> for IoKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::IsADirectory => Self::IsDirectory,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for IoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::Other => write!(f, "I/O error"),
        }
    }
}

/// Errors raised by the replay driver and its frontends
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReproError {
    /// Bad invocation: missing input, conflicting options
    #[error("Usage: {reason}")]
    Usage {
        /// What was wrong with the invocation
        reason: String,
    },

    /// Input could not be opened or read
    #[error("Cannot {phase} {}: {kind} ({message})", .path.display())]
    Io {
        /// Input path
        path: PathBuf,
        /// Step that failed
        phase: IoPhase,
        /// Failure class
        kind: IoKind,
        /// OS message
        message: String,
    },

    /// Input exceeds the configured length limit
    #[error("Input {} is {size} bytes, limit is {limit}", .path.display())]
    InputTooLarge {
        /// Input path
        path: PathBuf,
        /// Observed size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Buffer for the input could not be allocated
    #[error("Cannot allocate {len} bytes for {}", .path.display())]
    Allocation {
        /// Input path
        path: PathBuf,
        /// Requested length
        len: u64,
    },

    /// File changed size between metadata lookup and read
    #[error("Input {} reported {expected} bytes but {actual} were read", .path.display())]
    LengthMismatch {
        /// Input path
        path: PathBuf,
        /// Length from metadata
        expected: u64,
        /// Length actually read
        actual: u64,
    },

    /// Target library could not be loaded
    #[error("Cannot load target {}: {reason}", .path.display())]
    TargetLoad {
        /// Library path
        path: PathBuf,
        /// Loader message
        reason: String,
    },

    /// Target library lacks a required entry point
    #[error("Target {} does not export {symbol}", .path.display())]
    MissingSymbol {
        /// Library path
        path: PathBuf,
        /// Symbol name
        symbol: String,
    },

    /// Configuration is malformed or inconsistent
    #[error("Invalid configuration for {field}: {reason}")]
    Config {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ReproError {
    /// Build an I/O error from a `std::io::Error`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, phase: IoPhase, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            phase,
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }

    /// Build a usage error
    #[must_use]
    pub fn usage(reason: impl Into<String>) -> Self {
        Self::Usage {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ReproError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            field: "json".to_string(),
            reason: err.to_string(),
        }
    }
}
