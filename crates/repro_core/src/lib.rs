//! REPRO Core Types
//!
//! Pure types shared by the replay driver and its frontends.
//! This crate performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod digest;
pub mod error;
pub mod exit;

// Re-exports
pub use config::ReplayConfig;
pub use digest::InputDigest;
pub use error::{CoreResult, IoKind, IoPhase, ReproError};
pub use exit::ExitStatus;
