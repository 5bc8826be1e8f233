//! rfirelog library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (fetch → reconcile → store → export).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod fetch;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Init { .. }) => cli::commands::init::handle(cli, cfg),
        Some(Commands::Config { .. }) => cli::commands::config::handle(cli, cfg),
        Some(cmd @ Commands::Render { .. }) => cli::commands::render::handle(cmd, cfg),
        Some(cmd @ Commands::Sync { .. }) => cli::commands::sync::handle(Some(cmd), cfg),
        None => cli::commands::sync::handle(None, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ config: file < environment, caricata UNA sola volta
    let mut cfg = Config::load(cli.config_file.as_deref())?;

    // 3️⃣ override da riga di comando
    if let Some(dir) = &cli.output_dir {
        cfg.output_dir = dir.clone();
    }

    dispatch(&cli, &cfg)
}
