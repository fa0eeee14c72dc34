//! Fuzz target fixture without an init hook.
//!
//! Exports only `LLVMFuzzerTestOneInput`, which logs `input len=N` to
//! `REPRO_FIXTURE_LOG` (if set) and returns 0.

#![allow(non_snake_case)]
#![warn(clippy::all)]

use std::io::Write;

/// # Safety
///
/// `data` points to `size` readable bytes, or `size` is 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn LLVMFuzzerTestOneInput(_data: *const u8, size: usize) -> std::ffi::c_int {
    let file = std::env::var_os("REPRO_FIXTURE_LOG").and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    if let Some(mut file) = file {
        let _ = writeln!(file, "input len={size}");
    }
    0
}
