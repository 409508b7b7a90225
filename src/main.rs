//! routewire demo server.
//!
//! Serves the sample application under `src/demo/`: two free endpoints and
//! one auto-wired controller, registered by scanning the demo code tree.
//!
//! ```text
//! config (TOML or defaults)
//!     → Server::from_config
//!     → auto_import over the demo tree
//!     → axum::serve
//! ```

mod demo;

use std::path::PathBuf;

use clap::Parser;
use routewire::config::{load_config, ListenerConfig, ScanConfig, ServerConfig};
use routewire::Server;

#[derive(Parser)]
#[command(name = "routewire")]
#[command(about = "Demo server for the routewire registration layer", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => demo_config(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    let roots: Vec<&str> = config.scan.roots.iter().map(String::as_str).collect();
    let server = Server::from_config(&config)
        .with_loader(demo::loader())
        .auto_import(&roots)?;

    tracing::info!(
        name = config.name.as_deref().unwrap_or("routewire"),
        routes = server.routes().len(),
        "startup registration finished"
    );

    let app = server.instance();
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "serving");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Defaults for running straight from the repository root.
fn demo_config() -> ServerConfig {
    ServerConfig {
        name: Some("routewire-demo".to_string()),
        debug: false,
        scan: ScanConfig {
            roots: vec!["demo".to_string()],
            search_root: Some("src".to_string()),
        },
        listener: ListenerConfig {
            bind_address: "127.0.0.1:8080".to_string(),
        },
    }
}
