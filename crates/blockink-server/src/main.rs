//! blockink - serves Notion code blocks as rendered diagram images.
//!
//! A stateless proxy: given a Notion block id and an output format, it reads
//! the block's diagram source, encodes it for a Kroki or PlantUML server,
//! fetches the rendered image, and returns it with caching disabled so the
//! embed always reflects the current block content.

mod app;
mod config;
mod proxy;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockink_kroki::KrokiClient;
use blockink_notion::NotionClient;

use crate::config::Config;
use crate::proxy::Pipeline;

/// Outbound HTTP timeout for both upstream services.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Diagram rendering proxy for Notion embeds.
#[derive(Parser)]
#[command(name = "blockink", version, about)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Enable info-level logging.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let pipeline = Arc::new(Pipeline::new(
        NotionClient::new(
            &config.notion_api_url,
            &config.notion_token,
            UPSTREAM_TIMEOUT,
        ),
        KrokiClient::new(&config.render_url, config.encoding, UPSTREAM_TIMEOUT),
    ));
    let router = app::create_router(pipeline);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("listening on {addr}");
        axum::serve(listener, router).await
    })?;
    Ok(())
}
