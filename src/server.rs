//! Process startup shared by both server binaries.
//!
//! - no flags or `--stdio`: stdio transport
//! - `--http [ADDR]`: stateless HTTP at `/mcp`, address defaults to `MCP_HTTP_ADDR`

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use clap::Parser;

use crate::config::ServerConfig;
use crate::mcp::{self, McpService, McpState, ToolRegistry};

#[derive(Debug, Parser)]
pub struct TransportArgs {
    /// Use stdio transport (default when --http is not passed)
    #[arg(long)]
    pub stdio: bool,

    /// Serve JSON-RPC over HTTP POST at /mcp. Optional bind address.
    #[arg(long, num_args = 0..=1, value_name = "ADDR")]
    pub http: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http(String),
}

impl TransportArgs {
    /// `--stdio` wins when both flags are given.
    pub fn transport(&self, config: &ServerConfig) -> Transport {
        match &self.http {
            Some(addr) if !self.stdio => {
                Transport::Http(addr.clone().unwrap_or_else(|| config.http_addr.clone()))
            }
            _ => Transport::Stdio,
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

pub async fn serve(registry: ToolRegistry, transport: Transport) -> anyhow::Result<()> {
    let server_name = registry.identity().name.clone();
    let service = McpService::new(registry);
    log::info!(
        "{} ready with tools: {}",
        server_name,
        service.registry().tool_names().join(", ")
    );

    match transport {
        Transport::Stdio => mcp::stdio::serve_stdio(service)
            .await
            .context("stdio transport failed"),
        Transport::Http(addr) => serve_http(service, &server_name, &addr).await,
    }
}

pub async fn serve_http(service: McpService, server_name: &str, addr: &str) -> anyhow::Result<()> {
    let namespace = server_name.to_lowercase();
    let prometheus = PrometheusMetricsBuilder::new(&namespace)
        .endpoint("/metrics")
        .build()
        .map_err(|err| anyhow::anyhow!("failed to create Prometheus metrics middleware: {err}"))?;

    let state = web::Data::new(McpState::new(service));

    log::info!("Starting MCP HTTP server at http://{}/mcp", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(mcp::config)
    })
    .bind(addr)
    .with_context(|| format!("failed to bind {addr}"))?
    .run()
    .await
    .context("HTTP server failed")
}
