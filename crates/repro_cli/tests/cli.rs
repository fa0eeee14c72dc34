//! Exit-code behavior of the `repro` binary.

use std::process::{Command, Output};

fn repro(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repro"))
        .args(args)
        .env_remove("REPRO_TARGET_LIB")
        .env_remove("REPRO_LOG")
        .output()
        .expect("failed to spawn repro")
}

#[test]
fn no_input_is_usage_error() {
    let out = repro(&[]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn help_exits_zero() {
    let out = repro(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("INPUT"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let out = repro(&["--no-such-flag", "crash1"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn bad_config_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("repro.json");
    std::fs::write(&config, "{ not json").unwrap();
    let out = repro(&["--config", config.to_str().unwrap(), "crash1"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("repro.json"), "stderr: {stderr}");
}

#[test]
fn zero_runs_is_usage_error() {
    let out = repro(&["--runs", "0", "crash1"]);
    assert_eq!(out.status.code(), Some(2));
}

#[cfg(all(feature = "dynamic", not(feature = "linked")))]
#[test]
fn missing_target_is_usage_error() {
    let out = repro(&["crash1"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--target-lib"), "stderr: {stderr}");
}

#[cfg(feature = "dynamic")]
#[test]
fn unloadable_target_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("libnot_a_target.so");
    std::fs::write(&lib, b"plain text").unwrap();
    let out = repro(&["--target-lib", lib.to_str().unwrap(), "crash1"]);
    assert_eq!(out.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("libnot_a_target.so"), "stderr: {stderr}");
}

#[cfg(feature = "dynamic")]
mod fixture_target {
    use repro_target::fixture::fixture_library;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};

    struct Run {
        out: Output,
        log: Vec<String>,
    }

    fn library(name: &str) -> PathBuf {
        fixture_library(name).unwrap_or_else(|| panic!("{name} library not built"))
    }

    fn replay(fixture: &str, dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Run {
        let log = dir.join("calls.log");
        let out = Command::new(env!("CARGO_BIN_EXE_repro"))
            .arg("--target-lib")
            .arg(library(fixture))
            .args(args)
            .env_remove("REPRO_TARGET_LIB")
            .env_remove("REPRO_LOG")
            .env_remove("REPRO_FIXTURE_STATUS")
            .env("REPRO_FIXTURE_LOG", &log)
            .envs(envs.iter().copied())
            .output()
            .expect("failed to spawn repro");
        let log = std::fs::read_to_string(&log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();
        Run { out, log }
    }

    fn input(dir: &Path, name: &str, bytes: &[u8]) -> String {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn crash_input_replayed_once() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", &[0x00, 0xFF, 0x10]);
        let run = replay("repro_fixture", dir.path(), &[&crash], &[]);
        assert_eq!(run.out.status.code(), Some(0));
        assert_eq!(run.log, vec!["init argc=null", "input len=3 00ff10"]);
    }

    #[test]
    fn empty_input_still_invoked() {
        let dir = tempfile::tempdir().unwrap();
        let empty = input(dir.path(), "empty", b"");
        let run = replay("repro_fixture", dir.path(), &[&empty], &[]);
        assert_eq!(run.out.status.code(), Some(0));
        assert_eq!(run.log, vec!["init argc=null", "input len=0 "]);
    }

    #[test]
    fn missing_input_exits_one_without_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let run = replay("repro_fixture", dir.path(), &[missing.to_str().unwrap()], &[]);
        assert_eq!(run.out.status.code(), Some(1));
        assert_eq!(run.log, vec!["init argc=null"]);
        let stderr = String::from_utf8_lossy(&run.out.stderr);
        assert!(stderr.contains("missing"), "stderr: {stderr}");
    }

    #[test]
    fn oversized_input_exits_three() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", &[0x00, 0xFF, 0x10]);
        let run = replay("repro_fixture", dir.path(), &["--max-len", "2", &crash], &[]);
        assert_eq!(run.out.status.code(), Some(3));
        assert!(!run.log.iter().any(|line| line.starts_with("input")));
    }

    #[test]
    fn target_status_ignored_unless_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", b"x");
        let status = [("REPRO_FIXTURE_STATUS", "7")];

        let run = replay("repro_fixture", dir.path(), &[&crash], &status);
        assert_eq!(run.out.status.code(), Some(0));

        let run = replay(
            "repro_fixture",
            dir.path(),
            &["--propagate-status", &crash],
            &status,
        );
        assert_eq!(run.out.status.code(), Some(7));
    }

    #[test]
    fn trailing_args_reach_init_hook() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", b"x");
        let run = replay("repro_fixture", dir.path(), &[&crash, "--", "-runs=3"], &[]);
        assert_eq!(run.out.status.code(), Some(0));
        assert_eq!(run.log.len(), 2);
        assert!(run.log[0].starts_with("init argc=2 "), "log: {:?}", run.log);
        assert!(run.log[0].ends_with(" -runs=3"), "log: {:?}", run.log);
    }

    #[test]
    fn corpus_directory_replayed_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus");
        std::fs::create_dir(&corpus).unwrap();
        input(&corpus, "b", &[0x02]);
        input(&corpus, "a", &[0x01]);
        let run = replay("repro_fixture", dir.path(), &[corpus.to_str().unwrap()], &[]);
        assert_eq!(run.out.status.code(), Some(0));
        assert_eq!(
            run.log,
            vec!["init argc=null", "input len=1 01", "input len=1 02"]
        );
    }

    #[test]
    fn target_without_init_hook_runs() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", &[0x00, 0xFF, 0x10]);
        let run = replay("repro_fixture_noinit", dir.path(), &[&crash], &[]);
        assert_eq!(run.out.status.code(), Some(0));
        assert_eq!(run.log, vec!["input len=3"]);
    }

    #[test]
    fn target_without_entry_point_exits_four() {
        let dir = tempfile::tempdir().unwrap();
        let crash = input(dir.path(), "crash1", b"x");
        let run = replay("repro_fixture_empty", dir.path(), &[&crash], &[]);
        assert_eq!(run.out.status.code(), Some(4));
        assert!(run.log.is_empty());
        let stderr = String::from_utf8_lossy(&run.out.stderr);
        assert!(stderr.contains("LLVMFuzzerTestOneInput"), "stderr: {stderr}");
    }
}
