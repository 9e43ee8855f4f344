//! officedesk library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod i18n;
pub mod import;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Customer { action } => cli::commands::customer::handle(action, cfg),
        Commands::Service { action } => cli::commands::service::handle(action, cfg),
        Commands::Tx { action } => cli::commands::tx::handle(action, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Template { .. } => cli::commands::template::handle(&cli.command, cfg),
        Commands::Receipt { .. } => cli::commands::receipt::handle(&cli.command, cfg),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta; `config` resta usabile anche con un file rotto
    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) if matches!(cli.command, Commands::Config { .. }) => {
            ui::messages::warning(format!("{}; showing defaults", e));
            Config::default()
        }
        Err(e) => return Err(e),
    };

    // 3️⃣ applica eventuale override del DB da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ storage pronto prima dei comandi che lo usano (init lo fa da sé)
    if !matches!(cli.command, Commands::Init | Commands::Config { .. }) {
        db::initialize::init_storage(&cfg)?;
    }

    // 5️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}
