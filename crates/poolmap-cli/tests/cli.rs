//! Integration tests: run the poolmap binary and check exit codes and output.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn poolmap() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_poolmap"));
    cmd.env_remove("POOLMAP_WORKERS")
        .env_remove("POOLMAP_SILENT")
        .env_remove("POOLMAP_INPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(cmd: &mut Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_help() {
    let out = poolmap().arg("--help").output().unwrap();
    assert!(out.status.success(), "poolmap --help should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--workers"));
    assert!(stdout.contains("--silent"));
    assert!(stdout.contains("--input"));
}

#[test]
fn test_zero_workers_fails() {
    let out = poolmap().args(["--workers", "0", "echo"]).output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--workers/POOLMAP_WORKERS must be greater than 0"));
}

#[test]
fn test_zero_workers_from_env_fails() {
    let out = poolmap().env("POOLMAP_WORKERS", "0").arg("echo").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("POOLMAP_WORKERS must be greater than 0"));
}

#[cfg(unix)]
#[test]
fn test_outputs_follow_input_order() {
    let out = run_with_stdin(
        poolmap().args(["--silent", "--workers", "3", "--", "echo", "got"]),
        "c\na\n\nb\n",
    );
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "got c\ngot a\ngot b\n");
}

#[cfg(unix)]
#[test]
fn test_failed_items_set_exit_status() {
    let out = run_with_stdin(
        poolmap().args(["--silent", "--", "sh", "-c", "test \"$1\" != bad && echo ok", "sh"]),
        "good\nbad\n",
    );
    assert!(!out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "ok\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bad: exit status: 1"));
    assert!(stderr.contains("1 of 2 items failed"));
}

#[cfg(unix)]
#[test]
fn test_empty_input_succeeds() {
    let out = run_with_stdin(poolmap().args(["--silent", "echo"]), "");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_silent_env_accepts_boolish_values() {
    for value in ["1", "yes", "on", "true"] {
        let out = run_with_stdin(poolmap().env("POOLMAP_SILENT", value).arg("echo"), "a\n");
        assert!(out.status.success(), "POOLMAP_SILENT={value} should be accepted");
        assert_eq!(String::from_utf8_lossy(&out.stdout), "a\n");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(!stderr.contains("took"), "POOLMAP_SILENT={value} still logged: {stderr}");
    }
}

#[cfg(all(unix, feature = "tracing"))]
#[test]
fn test_silent_env_can_be_switched_off() {
    for value in ["0", "no", "off", "false"] {
        let out = run_with_stdin(poolmap().env("POOLMAP_SILENT", value).arg("echo"), "a\n");
        assert!(out.status.success(), "POOLMAP_SILENT={value} should be accepted");
        assert_eq!(String::from_utf8_lossy(&out.stdout), "a\n");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("poolmap took"), "POOLMAP_SILENT={value} logged nothing: {stderr}");
    }
}

#[cfg(unix)]
#[test]
fn test_items_are_read_from_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.txt");
    std::fs::write(&path, "three\none\n\ntwo\n").unwrap();

    let out = poolmap()
        .args(["--silent", "--workers", "2", "--input"])
        .arg(&path)
        .args(["echo", "item"])
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "item three\nitem one\nitem two\n"
    );

    let out = poolmap()
        .env("POOLMAP_INPUT", &path)
        .args(["--silent", "echo"])
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "three\none\ntwo\n");
}

#[cfg(unix)]
#[test]
fn test_empty_output_keeps_its_line() {
    let out = run_with_stdin(
        poolmap().args(["--silent", "--", "sh", "-c", "test \"$1\" = b || echo \"$1\"", "sh"]),
        "a\nb\nc\n",
    );
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "a\n\nc\n");
}
