//! Process exit statuses.

use crate::error::ReproError;
use serde::Serialize;
use std::fmt;

/// Exit status of a replay process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitStatus {
    /// Every input was read and handed to the target
    Success,
    /// An input could not be opened or read
    InputUnreadable,
    /// Bad invocation or configuration
    Usage,
    /// Input over the size limit or buffer allocation failed
    InputTooLarge,
    /// The target could not be loaded
    TargetUnavailable,
    /// Non-zero status forwarded from the target
    Target(i32),
}

impl ExitStatus {
    /// Numeric process exit code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InputUnreadable => 1,
            Self::Usage => 2,
            Self::InputTooLarge => 3,
            Self::TargetUnavailable => 4,
            // Status 0 would read as success; out-of-range values clamp to 255.
            Self::Target(status) => match u8::try_from(status) {
                Ok(0) | Err(_) => u8::MAX,
                Ok(code) => code,
            },
        }
    }

    /// Whether this is the success status
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Status for a target return value, honoring `propagate`
    #[must_use]
    pub fn from_target(status: i32, propagate: bool) -> Self {
        if propagate && status != 0 {
            Self::Target(status)
        } else {
            Self::Success
        }
    }
}

impl From<&ReproError> for ExitStatus {
    fn from(err: &ReproError) -> Self {
        match err {
            ReproError::Usage { .. } | ReproError::Config { .. } => Self::Usage,
            ReproError::Io { .. } | ReproError::LengthMismatch { .. } => Self::InputUnreadable,
            ReproError::InputTooLarge { .. } | ReproError::Allocation { .. } => {
                Self::InputTooLarge
            }
            ReproError::TargetLoad { .. } | ReproError::MissingSymbol { .. } => {
                Self::TargetUnavailable
            }
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::InputUnreadable => write!(f, "input unreadable"),
            Self::Usage => write!(f, "usage error"),
            Self::InputTooLarge => write!(f, "input too large"),
            Self::TargetUnavailable => write!(f, "target unavailable"),
            Self::Target(status) => write!(f, "target returned {}", status),
        }
    }
}
