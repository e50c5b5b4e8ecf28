mod cli;
mod execute;
mod prompt;

use clap::Parser;
use regmirror::config::{Config, LOG_ENV};
use tracing_subscriber::EnvFilter;
use crate::cli::CLI;
use anyhow::Result;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()>{
    let cli = CLI::parse();
    init_tracing();
    let config = Config::from_env()?;
    execute::execute(cli, &config)
}
