use std::path::PathBuf;

use clap::Parser;

/// Courier assistant gateway
#[derive(Debug, Parser)]
#[command(name = "courier", about = "HTTP gateway relaying prompts to a remote assistant API")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "courier.toml", env = "COURIER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "COURIER_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
