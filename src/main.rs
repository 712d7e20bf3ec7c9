use clap::Parser;
use std::path::PathBuf;

use pool_replay::config::Config;
use pool_replay::serve;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Demo server for pool-table live streams with instant replay"
)]
struct Args {
    /// Path to config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    config.validate()?;

    serve::run(config)
}
