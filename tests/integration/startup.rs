use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use tokio::time::timeout;

use kagi_mcp::server::runtime::{serve_transport, KagiServer};

use crate::common::ScriptedProvider;

#[tokio::test]
async fn transport_closed_before_handshake_fails_startup() {
    let server = KagiServer::new(Arc::new(ScriptedProvider::default()), String::new());
    let (server_transport, client_transport) = tokio::io::duplex(64);
    drop(client_transport);

    let exit = timeout(
        Duration::from_secs(5),
        serve_transport(server, server_transport),
    )
    .await
    .expect("startup must not hang on a dead transport")
    .expect_err("startup must fail without a peer");

    assert_eq!(exit.exit_code(), ExitCode::FAILURE);
    assert!(!exit.message().is_empty());
}

#[tokio::test]
async fn bound_server_runs_until_client_disconnects() -> Result<()> {
    let server = KagiServer::new(Arc::new(ScriptedProvider::default()), String::new());
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(serve_transport(server, server_transport));

    let client = serve_client(ClientInfo::default(), client_transport).await?;
    let info = client
        .peer_info()
        .cloned()
        .expect("handshake provides server info");
    assert_eq!(info.server_info.name, "kagi-mcp");
    assert!(!server_task.is_finished(), "server must still be running");

    client.cancel().await?;
    let outcome = timeout(Duration::from_secs(5), server_task).await??;
    assert!(outcome.is_ok(), "clean disconnect should not be an error");
    Ok(())
}
