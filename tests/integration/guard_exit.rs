//! The guard calls `process::exit`, so each scenario runs in a child copy of
//! this test binary selected by name and gated by an environment variable.
use std::{env, process::Command};

use kagi_mcp::lib::{
    guard::{self, GUARD_EXIT_CODE},
    telemetry,
};

const CHILD_ENV: &str = "KAGI_MCP_GUARD_CHILD";
const GUARD_LOG_LINE: &str = "Unhandled panic; terminating process";

fn run_child(test_name: &str) -> (Option<i32>, String) {
    let exe = env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .args(["--exact", test_name, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .env("RUST_LOG", "info")
        .output()
        .expect("child test should start");
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn is_child() -> bool {
    env::var_os(CHILD_ENV).is_some()
}

#[test]
fn sync_panic_child() {
    if !is_child() {
        return;
    }
    telemetry::init_tracing().expect("tracing");
    guard::install();
    panic!("sync failure outside any handler");
}

#[test]
fn task_panic_child() {
    if !is_child() {
        return;
    }
    telemetry::init_tracing().expect("tracing");
    guard::install();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime.block_on(async {
        let handle = tokio::spawn(async {
            panic!("async failure nobody awaited");
        });
        tokio::task::yield_now().await;
        let _ = handle.await;
    });
    eprintln!("guard did not terminate the process");
}

#[test]
fn sync_panic_logs_once_and_exits_non_zero() {
    if is_child() {
        return;
    }
    let (code, stderr) = run_child("guard_exit::sync_panic_child");
    assert_eq!(code, Some(GUARD_EXIT_CODE), "stderr: {stderr}");
    assert_eq!(stderr.matches(GUARD_LOG_LINE).count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("sync failure outside any handler"), "{stderr}");
}

#[test]
fn task_panic_logs_once_and_exits_non_zero() {
    if is_child() {
        return;
    }
    let (code, stderr) = run_child("guard_exit::task_panic_child");
    assert_eq!(code, Some(GUARD_EXIT_CODE), "stderr: {stderr}");
    assert_eq!(stderr.matches(GUARD_LOG_LINE).count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("async failure nobody awaited"), "{stderr}");
    assert!(!stderr.contains("guard did not terminate"), "{stderr}");
}
