//! One-shot guard for initialization hooks.

use std::sync::atomic::{AtomicBool, Ordering};

/// Runs an initialization hook at most once.
///
/// `const`-constructible so a process-wide hook can be guarded by a
/// `static`.
#[derive(Debug, Default)]
pub struct InitGuard {
    done: AtomicBool,
}

impl InitGuard {
    /// Create an unused guard
    #[must_use]
    pub const fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
        }
    }

    /// Run `hook` unless a previous call already did.
    ///
    /// Returns the hook's result on the first call, `None` afterwards.
    pub fn run_once<R>(&self, hook: impl FnOnce() -> R) -> Option<R> {
        if self
            .done
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        Some(hook())
    }

    /// Whether the hook has run
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}
