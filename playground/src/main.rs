//! UV Playground - serves the tutorial page and runs allow-listed commands
//!
//! ```text
//! uv-playground          # starts on port 8000
//! uv-playground 3000     # starts on port 3000
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use uv_playground::init::init_tracing;
use uv_playground::server::{self, ServerConfig};
use uv_playground::Config;

#[derive(Parser)]
#[command(name = "uv-playground")]
#[command(about = "Serve the UV Playground page with an allow-listed /exec endpoint")]
struct Cli {
    /// TCP port to listen on
    #[arg(default_value_t = 8000)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Directory served for static files (defaults to the bundled page)
    #[arg(long)]
    root: Option<PathBuf>,

    /// TOML file overriding the allow-list, shell, or timeout
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let exec = match &cli.config {
        Some(path) => server::load_config(path)?,
        None => Config::default(),
    };

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        static_root: cli.root.unwrap_or_else(server::default_static_root),
        exec,
    };

    server::serve(config).await
}
