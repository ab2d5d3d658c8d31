use std::{net::SocketAddr, path::PathBuf};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// The address to bind the gateway to.
    #[clap(long, env, default_value = "0.0.0.0:15888")]
    pub addr: SocketAddr,

    /// Path to the gateway configuration file. This file should be in TOML
    /// format.
    #[clap(long, env)]
    pub config: PathBuf,

    /// Tracing filter directives, env_logger syntax.
    #[clap(long, env, default_value = "info,gateway=debug")]
    pub log_filter: String,
}
