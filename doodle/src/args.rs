use std::path::PathBuf;

use clap::Parser;

/// Doodle-to-image API
#[derive(Debug, Parser)]
#[command(name = "doodle", about = "Turns hand-drawn doodles into generated images")]
pub struct Args {
    /// Path to configuration file; defaults are used when omitted
    #[arg(short, long, env = "DOODLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "DOODLE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
