//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! stdout carries protocol messages only; logging goes to stderr.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::mcp::rpc::OutboundResponse;
use crate::mcp::service::McpService;

/// Serve the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(service: McpService) -> io::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve_lines(service, reader, writer).await
}

/// Serve any line-oriented reader/writer pair. Split out for tests.
pub async fn serve_lines<R, W>(service: McpService, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(response) = handle_line(&service, &line).await else {
            continue;
        };
        let mut out = serde_json::to_string(&response).map_err(io::Error::other)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }
    log::info!("stdin closed, shutting down");
    Ok(())
}

/// Dispatch one line. Blank lines produce nothing.
pub async fn handle_line(service: &McpService, line: &str) -> Option<OutboundResponse> {
    service.handle_message(line).await
}
