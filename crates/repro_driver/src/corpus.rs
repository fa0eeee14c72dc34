//! Expanding command-line paths into input files.

use repro_core::{CoreResult, IoPhase, ReproError};
use std::path::{Path, PathBuf};

/// Expand directories into the regular files they contain.
///
/// Files inside a directory are sorted by path so replay order is stable.
/// Directories are not walked recursively. Other paths pass through
/// untouched, including missing ones, so the loader reports them.
///
/// # Errors
///
/// Returns error if a directory cannot be listed
pub fn collect_inputs<P: AsRef<Path>>(paths: &[P]) -> CoreResult<Vec<PathBuf>> {
    let mut inputs = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            inputs.push(path.to_path_buf());
            continue;
        }

        let entries =
            std::fs::read_dir(path).map_err(|e| ReproError::io(path, IoPhase::Open, &e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReproError::io(path, IoPhase::Read, &e))?;
            let entry_path = entry.path();
            if entry_path.is_file() {
                files.push(entry_path);
            }
        }
        files.sort();

        tracing::debug!(dir = %path.display(), files = files.len(), "expanded corpus directory");
        inputs.extend(files);
    }

    Ok(inputs)
}
