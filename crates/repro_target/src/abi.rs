//! libFuzzer C ABI plumbing shared by the native backends.

use std::ffi::{CString, c_char, c_int};

/// `int LLVMFuzzerTestOneInput(const uint8_t *data, size_t size)`
pub(crate) type TestOneInputFn = unsafe extern "C" fn(*const u8, usize) -> c_int;

/// `int LLVMFuzzerInitialize(int *argc, char ***argv)`
pub(crate) type InitializeFn = unsafe extern "C" fn(*mut c_int, *mut *mut *mut c_char) -> c_int;

pub(crate) const TEST_ONE_INPUT: &str = "LLVMFuzzerTestOneInput";
pub(crate) const INITIALIZE: &str = "LLVMFuzzerInitialize";

/// Call a libFuzzer-style init hook.
///
/// With no arguments the hook receives null `argc`/`argv`. Otherwise a
/// NUL-terminated argv is built and leaked: hooks are allowed to keep it.
pub(crate) fn call_initialize(hook: InitializeFn, args: &[String]) -> i32 {
    if args.is_empty() {
        // SAFETY: libFuzzer hooks accept null argc/argv when no arguments exist.
        return unsafe { hook(std::ptr::null_mut(), std::ptr::null_mut()) };
    }

    let mut argv: Vec<*mut c_char> = args
        .iter()
        .filter_map(|arg| match CString::new(arg.as_str()) {
            Ok(c) => Some(c.into_raw()),
            Err(_) => {
                tracing::warn!(arg = %arg, "dropping init argument with interior NUL");
                None
            }
        })
        .collect();
    let argc = c_int::try_from(argv.len()).unwrap_or(c_int::MAX);
    argv.push(std::ptr::null_mut());

    let argc: &'static mut c_int = Box::leak(Box::new(argc));
    let argv: &'static mut *mut *mut c_char = Box::leak(Box::new(argv.leak().as_mut_ptr()));

    // SAFETY: argc/argv point to leaked, valid, NUL-terminated storage.
    unsafe { hook(argc, argv) }
}

/// Call a libFuzzer-style test function on a buffer.
pub(crate) fn call_test_one_input(test: TestOneInputFn, data: &[u8]) -> i32 {
    // SAFETY: the pointer and length describe a live, initialized slice that
    // outlives the call. Empty slices yield a dangling but non-null pointer,
    // which the libFuzzer contract permits with size 0.
    unsafe { test(data.as_ptr(), data.len()) }
}
