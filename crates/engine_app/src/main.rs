//! # engine: object and texture file tool
//!
//! Builds demo objects, inspects and re-saves object files, and converts
//! common image files into engine textures. Everything runs headless: no
//! render device, physics or script engine is attached.
//!
//! Logging is controlled through `RUST_LOG` (default `engine_app=info`).

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let cli = Cli::parse();
    commands::run(cli.command)
}
