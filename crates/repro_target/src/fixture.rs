//! Locating the fixture target libraries built next to a test binary.
//!
//! The `repro_fixture*` workspace crates build as `cdylib`s. Cargo places
//! them in the same `deps` directory as test executables (with a metadata
//! hash in the name) and sometimes one level up without it.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Path of the fixture shared library for crate `name`, newest first
#[must_use]
pub fn fixture_library(name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let deps = exe.parent()?;
    let stem = format!("{DLL_PREFIX}{name}");

    [Some(deps), deps.parent()]
        .into_iter()
        .flatten()
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_library_of(path, &stem))
        .max_by_key(|path| modified(path))
}

fn is_library_of(path: &Path, stem: &str) -> bool {
    let Some(base) = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(DLL_SUFFIX))
    else {
        return false;
    };
    base == stem
        || base
            .strip_prefix(stem)
            .is_some_and(|hash| hash.starts_with('-'))
}

fn modified(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(base: &str) -> PathBuf {
        PathBuf::from(format!("/target/debug/deps/{base}{DLL_SUFFIX}"))
    }

    #[test]
    fn test_matches_plain_and_hashed_names() {
        let stem = format!("{DLL_PREFIX}repro_fixture");
        assert!(is_library_of(&lib(&stem), &stem));
        assert!(is_library_of(&lib(&format!("{stem}-0123abcd")), &stem));
    }

    #[test]
    fn test_ignores_other_fixtures() {
        let stem = format!("{DLL_PREFIX}repro_fixture");
        assert!(!is_library_of(&lib(&format!("{stem}_noinit")), &stem));
        assert!(!is_library_of(&lib(&format!("{stem}_noinit-0123abcd")), &stem));
        assert!(!is_library_of(
            Path::new("/target/debug/deps/librepro_fixture-0123abcd.rlib"),
            &stem
        ));
    }
}
