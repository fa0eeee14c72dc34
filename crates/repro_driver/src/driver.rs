//! Replay driver: init once, then load and invoke each input.

use crate::input::InputLoader;
use crate::report::{ReplayReport, ReplaySummary};
use repro_core::{CoreResult, ExitStatus, ReplayConfig, ReproError};
use repro_target::{FuzzTarget, InitGuard};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Replays saved inputs against a fuzz target
pub struct ReplayDriver<T: FuzzTarget> {
    target: T,
    config: ReplayConfig,
    loader: InputLoader,
    init: InitGuard,
    init_args: Vec<String>,
    init_status: Option<i32>,
}

impl<T: FuzzTarget> ReplayDriver<T> {
    /// Create a driver with the default configuration
    #[must_use]
    pub fn new(target: T) -> Self {
        Self::with_config(target, ReplayConfig::default())
    }

    /// Create a driver with a custom configuration
    #[must_use]
    pub fn with_config(target: T, config: ReplayConfig) -> Self {
        Self {
            target,
            loader: InputLoader::from_config(&config),
            config,
            init: InitGuard::new(),
            init_args: Vec::new(),
            init_status: None,
        }
    }

    /// Arguments for the init hook, used only with `forward_init_args`
    #[must_use]
    pub fn with_init_args(mut self, args: Vec<String>) -> Self {
        self.init_args = args;
        self
    }

    /// The driven target
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Consume the driver, returning the target
    #[must_use]
    pub fn into_target(self) -> T {
        self.target
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Run the target's init hook unless it already ran.
    ///
    /// Returns the hook's status on the first call, `None` afterwards.
    pub fn initialize(&mut self) -> Option<i32> {
        let args: &[String] = if self.config.forward_init_args {
            &self.init_args
        } else {
            &[]
        };
        let target = &mut self.target;
        let status = self.init.run_once(|| target.initialize(args));
        if let Some(status) = status {
            tracing::debug!(target_name = %self.target.name(), status, "init hook returned");
            self.init_status = Some(status);
        }
        status
    }

    /// Load one input and pass it to the target once
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be loaded; the target is not
    /// invoked in that case
    pub fn replay_file(&mut self, path: &Path, run: u32) -> CoreResult<ReplayReport> {
        self.initialize();

        let input = self.loader.load(path)?;
        let len = input.len() as u64;
        let digest = input.digest();

        tracing::info!(path = %path.display(), len, run, "invoking target");
        let started = Instant::now();
        let status = self.target.test_one_input(input.as_bytes());
        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        drop(input);

        tracing::info!(path = %path.display(), status, elapsed_us, "target returned");

        Ok(ReplayReport {
            path: path.to_path_buf(),
            run,
            len,
            digest: digest.to_hex(),
            status,
            elapsed_us,
        })
    }

    /// Replay every input `runs` times, in order.
    ///
    /// Each buffer is released before the next is loaded. The first input
    /// that fails to load ends the run.
    ///
    /// # Errors
    ///
    /// Returns a usage error for an empty input list, otherwise the first
    /// load failure
    pub fn run_all<P: AsRef<Path>>(&mut self, paths: &[P]) -> CoreResult<ReplaySummary> {
        if paths.is_empty() {
            return Err(ReproError::usage("no input files given"));
        }
        self.config.validate()?;

        let mut summary = ReplaySummary::new(self.target.name());
        self.initialize();
        summary.init_status = self.init_status;

        for path in paths {
            let path = path.as_ref();
            let mut first_digest: Option<String> = None;
            for run in 0..self.config.runs {
                let report = self.replay_file(path, run)?;
                match &first_digest {
                    None => first_digest = Some(report.digest.clone()),
                    Some(first) if *first != report.digest => {
                        tracing::warn!(
                            path = %path.display(),
                            run,
                            "input changed between runs, replay is not deterministic"
                        );
                    }
                    Some(_) => {}
                }
                summary.reports.push(report);
            }
        }

        Ok(summary)
    }

    /// Replay a single path and map the outcome to an exit status
    pub fn run(&mut self, path: impl Into<PathBuf>) -> ExitStatus {
        let path = path.into();
        match self.run_all(&[path]) {
            Ok(summary) => summary.exit_status(self.config.propagate_status),
            Err(err) => {
                tracing::error!(error = %err, "replay failed");
                ExitStatus::from(&err)
            }
        }
    }
}

impl<T: FuzzTarget> std::fmt::Debug for ReplayDriver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayDriver")
            .field("target", &self.target.name())
            .field("config", &self.config)
            .field("initialized", &self.init.is_done())
            .finish()
    }
}
