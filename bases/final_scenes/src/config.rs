// bases/final_scenes/src/config.rs
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Catalog file loaded at startup
    pub catalog_path: PathBuf,

    /// Directory served under /static
    pub static_dir: PathBuf,
}

/// final-scenes - guess the film from its final scene
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Port to listen on
    #[arg(short, long, env = "FINAL_SCENES_PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "FINAL_SCENES_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Film catalog (JSON)
    #[arg(long, env = "FINAL_SCENES_CATALOG", default_value = "films.json")]
    pub catalog: PathBuf,

    /// Directory with the audio clips, stills and page assets
    #[arg(long, env = "FINAL_SCENES_STATIC_DIR", default_value = "www")]
    pub static_dir: PathBuf,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Self {
        Self {
            addr: SocketAddr::new(args.bind, args.port),
            catalog_path: args.catalog,
            static_dir: args.static_dir,
        }
    }
}
