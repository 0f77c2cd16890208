use std::{
    io,
    path::PathBuf,
    process::Stdio,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rmcp::{
    model::{CallToolResult, ClientInfo, Content},
    service::RunningService,
    serve_client, RoleClient,
};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

use kagi_mcp::{
    lib::errors::ProviderError,
    provider::KagiProvider,
    server::runtime::{serve_transport, KagiServer, RuntimeExit},
    tools::{SearchFetchArgs, SummarizerArgs},
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_kagi-mcp");
pub const TEST_API_KEY: &str = "test-api-key-123456";

pub async fn spawn_server_process() -> Result<(Child, ChildIoBridge, Option<JoinHandle<()>>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env("KAGI_MCP_CONFIG", fixture("tests/fixtures/config_valid.toml"))
        .env("KAGI_API_KEY", TEST_API_KEY)
        .env_remove("KAGI_SUMMARIZER_ENGINE")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let bridge = ChildIoBridge::new(stdout, stdin);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, bridge, stderr_handle))
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Provider double that records every call and answers from a script.
#[derive(Default)]
pub struct ScriptedProvider {
    pub searches: Mutex<Vec<SearchFetchArgs>>,
    pub summaries: Mutex<Vec<SummarizerArgs>>,
    pub failure: Option<(u16, &'static str)>,
}

impl ScriptedProvider {
    pub fn failing(status: u16, message: &'static str) -> Self {
        Self {
            failure: Some((status, message)),
            ..Self::default()
        }
    }

    pub fn search_result() -> CallToolResult {
        CallToolResult::success(vec![Content::text("1: Example Domain\nhttps://example.com")])
    }

    pub fn summary_result() -> CallToolResult {
        CallToolResult::success(vec![Content::text("Example Domain is reserved for docs.")])
    }

    fn answer(&self, ok: CallToolResult) -> Result<CallToolResult, ProviderError> {
        match self.failure {
            Some((status, message)) => Err(ProviderError::Api {
                status,
                message: message.to_string(),
            }),
            None => Ok(ok),
        }
    }
}

#[async_trait]
impl KagiProvider for ScriptedProvider {
    async fn search_fetch(&self, args: SearchFetchArgs) -> Result<CallToolResult, ProviderError> {
        self.searches.lock().expect("lock").push(args);
        self.answer(Self::search_result())
    }

    async fn summarize(&self, args: SummarizerArgs) -> Result<CallToolResult, ProviderError> {
        self.summaries.lock().expect("lock").push(args);
        self.answer(Self::summary_result())
    }
}

pub type ServerTask = JoinHandle<Result<(), RuntimeExit>>;

/// Serve `provider` over an in-memory pipe and connect a client to it.
pub async fn connect(
    provider: Arc<ScriptedProvider>,
) -> Result<(RunningService<RoleClient, ClientInfo>, ServerTask)> {
    let server = KagiServer::new(provider, "test instructions".into());
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(serve_transport(server, server_transport));
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}
