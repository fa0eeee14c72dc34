//! Fuzz target resolved at link time.
//!
//! Build the driver with the `linked` feature and link it against an
//! object that defines both libFuzzer entry points, exactly as the
//! engine's own runtime would be linked.

use crate::abi;
use crate::init::InitGuard;
use crate::target::FuzzTarget;
use std::ffi::{c_char, c_int};

unsafe extern "C" {
    fn LLVMFuzzerTestOneInput(data: *const u8, size: usize) -> c_int;
    fn LLVMFuzzerInitialize(argc: *mut c_int, argv: *mut *mut *mut c_char) -> c_int;
}

/// The hook is process-wide, so its guard is too.
static PROCESS_INIT: InitGuard = InitGuard::new();

/// Handle to the link-time libFuzzer entry points
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedTarget;

impl LinkedTarget {
    /// Create a handle
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FuzzTarget for LinkedTarget {
    fn name(&self) -> &str {
        "linked"
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        PROCESS_INIT
            .run_once(|| abi::call_initialize(LLVMFuzzerInitialize, args))
            .unwrap_or(0)
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        abi::call_test_one_input(LLVMFuzzerTestOneInput, data)
    }
}
