//! jcrtracker library root.
//! Exposes the CLI parser, the workflow engine, the record store and the
//! high-level run() function used by the `jcr` binary.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;
pub mod workflow;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Create { action } => cli::commands::create::handle(cli, action, cfg),
        Commands::Update { action } => cli::commands::update::handle(cli, action, cfg),
        Commands::Session { action } => cli::commands::session::handle(cli, action, cfg),
        Commands::View { .. } => cli::commands::view::handle(&cli.command, cfg),
        Commands::Insights => cli::commands::insights::handle(cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr, filtered by RUST_LOG (default: warnings only).
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the configuration, so it must not require a valid one
    let mut cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load()?,
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
