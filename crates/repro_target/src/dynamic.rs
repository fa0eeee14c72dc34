//! Fuzz targets loaded from a shared object at runtime.

use crate::abi::{self, InitializeFn, TestOneInputFn};
use crate::target::FuzzTarget;
use libloading::Library;
use repro_core::{CoreResult, ReproError};
use std::path::{Path, PathBuf};

/// Target resolved from a shared object exporting the libFuzzer ABI.
///
/// `LLVMFuzzerTestOneInput` is required. `LLVMFuzzerInitialize` is weak in
/// libFuzzer, so a library without it initializes as a no-op.
pub struct DynamicTarget {
    name: String,
    path: PathBuf,
    test_one_input: TestOneInputFn,
    initialize: Option<InitializeFn>,
    // Must outlive the function pointers above.
    _library: Library,
}

impl DynamicTarget {
    /// Load a target library
    ///
    /// # Errors
    ///
    /// Returns error if the library cannot be loaded or lacks
    /// `LLVMFuzzerTestOneInput`
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let requested = path.as_ref();
        // dlopen only searches the filesystem for names containing a slash.
        let path = std::fs::canonicalize(requested).unwrap_or_else(|_| requested.to_path_buf());

        // SAFETY: loading runs the library's constructors. The caller names a
        // fuzz target built to be loaded into a harness process.
        let library = unsafe { Library::new(&path) }.map_err(|e| ReproError::TargetLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // SAFETY: the symbol types match the libFuzzer C declarations.
        let test_one_input = unsafe { library.get::<TestOneInputFn>(abi::TEST_ONE_INPUT.as_bytes()) }
            .map(|sym| *sym)
            .map_err(|_| ReproError::MissingSymbol {
                path: path.clone(),
                symbol: abi::TEST_ONE_INPUT.to_string(),
            })?;
        // SAFETY: as above.
        let initialize = unsafe { library.get::<InitializeFn>(abi::INITIALIZE.as_bytes()) }
            .ok()
            .map(|sym| *sym);

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(
            target_lib = %path.display(),
            has_initialize = initialize.is_some(),
            "loaded fuzz target"
        );

        Ok(Self {
            name,
            path,
            test_one_input,
            initialize,
            _library: library,
        })
    }

    /// Resolved path of the loaded library
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the library exports `LLVMFuzzerInitialize`
    #[must_use]
    pub fn has_initialize(&self) -> bool {
        self.initialize.is_some()
    }
}

impl FuzzTarget for DynamicTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        match self.initialize {
            Some(hook) => abi::call_initialize(hook, args),
            None => 0,
        }
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        abi::call_test_one_input(self.test_one_input, data)
    }
}

impl std::fmt::Debug for DynamicTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicTarget")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("has_initialize", &self.initialize.is_some())
            .finish()
    }
}
