//! Shared library that loads fine but is not a fuzz target.

/// Unrelated export, so the library is not empty
#[unsafe(no_mangle)]
pub extern "C" fn repro_fixture_empty_version() -> u32 {
    1
}
