//! Fuzz target fixture for the replay tests.
//!
//! Exports both libFuzzer entry points. Every call is appended as one line
//! to the file named by `REPRO_FIXTURE_LOG` (if set):
//!
//! - `init argc=null` or `init argc=N ARG...`
//! - `input len=N HEX`
//!
//! `LLVMFuzzerTestOneInput` returns `REPRO_FIXTURE_STATUS` (default 0).
//! In-process callers can read the recorded state back through the
//! `repro_fixture_*` exports.

#![allow(non_snake_case)]
#![warn(clippy::all)]

use std::ffi::{CStr, c_char, c_int};
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

static INIT_CALLS: AtomicU32 = AtomicU32::new(0);
static INPUT_CALLS: AtomicU32 = AtomicU32::new(0);
static LAST_ARGC: AtomicI32 = AtomicI32::new(-1);
static LAST_INPUT: Mutex<Vec<u8>> = Mutex::new(Vec::new());

fn log_line(line: &str) {
    let Some(path) = std::env::var_os("REPRO_FIXTURE_LOG") else {
        return;
    };
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        let _ = writeln!(file, "{line}");
    }
}

fn status() -> c_int {
    std::env::var("REPRO_FIXTURE_STATUS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// # Safety
///
/// `argc` and `argv` are both null, or describe `*argc` valid C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn LLVMFuzzerInitialize(
    argc: *mut c_int,
    argv: *mut *mut *mut c_char,
) -> c_int {
    INIT_CALLS.fetch_add(1, Ordering::SeqCst);
    if argc.is_null() || argv.is_null() {
        log_line("init argc=null");
        return 0;
    }

    // SAFETY: non-null per the check above, valid per the caller contract.
    let (count, args) = unsafe { (*argc, *argv) };
    LAST_ARGC.store(count, Ordering::SeqCst);
    let mut line = format!("init argc={count}");
    for i in 0..usize::try_from(count).unwrap_or(0) {
        // SAFETY: argv holds `count` valid C strings.
        let arg = unsafe { CStr::from_ptr(*args.add(i)) };
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    log_line(&line);
    0
}

/// # Safety
///
/// `data` points to `size` readable bytes, or `size` is 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn LLVMFuzzerTestOneInput(data: *const u8, size: usize) -> c_int {
    let bytes = if size == 0 {
        &[][..]
    } else {
        // SAFETY: per the caller contract.
        unsafe { std::slice::from_raw_parts(data, size) }
    };
    INPUT_CALLS.fetch_add(1, Ordering::SeqCst);
    log_line(&format!("input len={size} {}", hex::encode(bytes)));
    if let Ok(mut last) = LAST_INPUT.lock() {
        last.clear();
        last.extend_from_slice(bytes);
    }
    status()
}

/// Number of `LLVMFuzzerInitialize` calls so far
#[unsafe(no_mangle)]
pub extern "C" fn repro_fixture_init_calls() -> u32 {
    INIT_CALLS.load(Ordering::SeqCst)
}

/// Number of `LLVMFuzzerTestOneInput` calls so far
#[unsafe(no_mangle)]
pub extern "C" fn repro_fixture_input_calls() -> u32 {
    INPUT_CALLS.load(Ordering::SeqCst)
}

/// `argc` of the last init call with arguments, -1 if there was none
#[unsafe(no_mangle)]
pub extern "C" fn repro_fixture_last_argc() -> c_int {
    LAST_ARGC.load(Ordering::SeqCst)
}

/// Copy up to `cap` bytes of the last input into `out`, returning its full length
///
/// # Safety
///
/// `out` points to `cap` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn repro_fixture_last_input(out: *mut u8, cap: usize) -> usize {
    let Ok(last) = LAST_INPUT.lock() else {
        return 0;
    };
    let n = last.len().min(cap);
    if n > 0 {
        // SAFETY: `out` has room for `cap >= n` bytes; the regions are distinct.
        unsafe { std::ptr::copy_nonoverlapping(last.as_ptr(), out, n) };
    }
    last.len()
}
