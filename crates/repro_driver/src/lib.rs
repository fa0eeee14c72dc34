//! REPRO Replay Driver
//!
//! Loads saved fuzz inputs fully into memory and hands each one to a
//! fuzz target exactly once, after a one-time init hook.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod driver;
pub mod input;
pub mod report;

pub use corpus::collect_inputs;
pub use driver::ReplayDriver;
pub use input::{InputBuffer, InputLoader};
pub use report::{ReplayReport, ReplaySummary};
