//! REPRO Target Adapters
//!
//! The capability interface the replay driver invokes, and the ways a
//! fuzz target can be bound to it.

#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(any(feature = "dynamic", feature = "linked"))]
mod abi;
pub mod init;
pub mod target;

#[cfg(feature = "dynamic")]
pub mod dynamic;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(any(test, feature = "testing"))]
pub mod fixture;
#[cfg(any(test, feature = "testing"))]
pub mod recording;

pub use init::InitGuard;
pub use target::{FnTarget, FuzzTarget};

#[cfg(feature = "dynamic")]
pub use dynamic::DynamicTarget;
#[cfg(feature = "linked")]
pub use linked::LinkedTarget;
#[cfg(any(test, feature = "testing"))]
pub use recording::RecordingTarget;
