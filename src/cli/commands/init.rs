use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_storage;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command: write the config file, then prepare the store.
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIG + DB FILE
    //
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing officedesk…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);
    println!("📎 Attachments: {}", cfg.attachments_path().display());

    //
    // 2️⃣ SCHEMA + DIRECTORIES
    //
    init_storage(&cfg)?;

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
