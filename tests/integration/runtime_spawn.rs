use std::{
    process::{Command as StdCommand, Stdio},
    time::Duration,
};

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use serde_json::Value;
use tokio::time::timeout;

use crate::common::{fixture, spawn_server_process, BINARY_PATH};

#[tokio::test]
async fn inspector_style_spawn_lists_tools() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    for name in ["kagi_search_fetch", "kagi_summarizer"] {
        assert!(
            list.tools.iter().any(|tool| tool.name.as_ref() == name),
            "list_tools should include {name}: {:?}",
            list.tools
        );
    }

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[test]
fn closed_stdin_exits_non_zero() {
    let output = StdCommand::new(BINARY_PATH)
        .env("KAGI_MCP_CONFIG", fixture("tests/fixtures/config_valid.toml"))
        .env_remove("KAGI_SUMMARIZER_ENGINE")
        .env("RUST_LOG", "info")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("process should start");

    assert!(
        !output.status.success(),
        "startup without a peer must fail, got {:?}",
        output.status
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to start Kagi MCP server"),
        "stderr should explain the failure: {stderr}"
    );
    assert!(
        !stderr.contains("started successfully"),
        "server must not report running: {stderr}"
    );
}

#[test]
fn missing_config_file_exits_non_zero() {
    let status = StdCommand::new(BINARY_PATH)
        .arg("--config")
        .arg(fixture("tests/fixtures/does_not_exist.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .status()
        .expect("process should start");
    assert_eq!(status.code(), Some(1), "config errors exit with status 1");
}

#[test]
fn tools_command_prints_descriptors() {
    let output = StdCommand::new(BINARY_PATH)
        .arg("tools")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(output.status.success(), "{:?}", output.status);

    let tools: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let names: Vec<&str> = tools
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    assert_eq!(names, vec!["kagi_search_fetch", "kagi_summarizer"]);
}
