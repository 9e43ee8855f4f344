use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::receipt::{ReceiptLogic, ReceiptRequest};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Receipt {
        id,
        kind,
        notes,
        file,
        company,
        save_settings,
        force,
    } = cmd
    {
        let req = ReceiptRequest {
            tx_id: *id,
            kind: *kind,
            notes: notes.clone(),
            file: file.clone(),
            company: company.overrides(),
            save_settings: *save_settings,
            force: *force,
        };

        let pool = DbPool::new(cfg.database_path())?;
        let path = ReceiptLogic::generate(&pool.conn, cfg, &req)?;
        success(format!("Receipt created: {}", path.display()));
    }

    Ok(())
}
