use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pydock::config::Config;
use pydock::driver;
use pydock::engine::DockerEngine;

#[derive(Parser)]
#[command(name = "pydock")]
#[command(about = "Run user-supplied Python code in Docker, retrying across interpreter versions")]
#[command(version)]
struct Cli {
    /// Path to a pydock.toml config file (defaults to ./pydock.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::discover()?,
    };

    let engine = DockerEngine::connect(config.container.stop_timeout_secs).await?;
    driver::run(&engine, &config).await
}
