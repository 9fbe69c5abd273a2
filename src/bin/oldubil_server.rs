//! OlduBil document MCP server.
//!
//! Exposes `get_oldubil_info` over stdio (default) or HTTP. PDFs are read
//! from `OLDUBIL_DOCS_DIR`, or the executable's directory when unset.

use clap::Parser;

use mcp_tool_adapters::config::ServerConfig;
use mcp_tool_adapters::oldubil::{self, DocumentLibrary};
use mcp_tool_adapters::server::{self, TransportArgs};

#[derive(Parser)]
#[command(name = "oldubil-server")]
#[command(about = "MCP server returning text from local OlduBil PDF files")]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    server::init_logging();

    let config = ServerConfig::from_env();
    let library = match config.documents_dir() {
        Ok(dir) => DocumentLibrary::new(dir),
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("OlduBil documents directory: {}", library.dir().display());

    let registry = oldubil::build_registry(library)?;
    server::serve(registry, args.transport.transport(&config)).await
}
