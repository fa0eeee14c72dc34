//! Replay reports for scripting.

use repro_core::{CoreResult, ExitStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

/// Outcome of one target invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Input path
    pub path: PathBuf,
    /// Zero-based run index for this input
    pub run: u32,
    /// Bytes passed to the target
    pub len: u64,
    /// BLAKE3 digest of the input, hex
    pub digest: String,
    /// Value returned by the target
    pub status: i32,
    /// Wall time spent in the target, microseconds
    pub elapsed_us: u64,
}

/// All invocations of one replay process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Target name
    pub target: String,
    /// Init hook result, if this summary's driver ran it
    pub init_status: Option<i32>,
    /// Reports in invocation order
    pub reports: Vec<ReplayReport>,
}

impl ReplaySummary {
    /// Create an empty summary
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Number of target invocations
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.reports.len()
    }

    /// Status of the last invocation that returned non-zero
    #[must_use]
    pub fn last_nonzero_status(&self) -> Option<i32> {
        self.reports
            .iter()
            .rev()
            .map(|r| r.status)
            .find(|&s| s != 0)
    }

    /// Process exit status for this summary
    #[must_use]
    pub fn exit_status(&self, propagate: bool) -> ExitStatus {
        match self.last_nonzero_status() {
            Some(status) => ExitStatus::from_target(status, propagate),
            None => ExitStatus::Success,
        }
    }

    /// Encode as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if encoding fails
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per invocation
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for r in &self.reports {
            let _ = writeln!(
                out,
                "{}\trun={}\tlen={}\tstatus={}\t{}us\t{}",
                r.path.display(),
                r.run,
                r.len,
                r.status,
                r.elapsed_us,
                r.digest
            );
        }
        let _ = writeln!(
            out,
            "target={} invocations={}",
            self.target,
            self.invocations()
        );
        out
    }
}
