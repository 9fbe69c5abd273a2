//! BIN lookup MCP server.
//!
//! Exposes `lookup_card` and `validate_bin` over stdio (default) or HTTP.
//! The provider base URL comes from `BIN_PROVIDER_URL`.

use clap::Parser;

use mcp_tool_adapters::bin_lookup::{self, BinListClient};
use mcp_tool_adapters::config::ServerConfig;
use mcp_tool_adapters::server::{self, TransportArgs};

#[derive(Parser)]
#[command(name = "bin-lookup-server")]
#[command(about = "MCP server for card BIN metadata lookups")]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    server::init_logging();

    let config = ServerConfig::from_env();
    let client = match BinListClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("BIN provider: {}", client.base_url());

    let registry = bin_lookup::build_registry(client)?;
    server::serve(registry, args.transport.transport(&config)).await
}
