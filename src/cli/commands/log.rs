use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditAction;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        limit,
        action,
        table,
    } = cmd
    {
        let action = match action {
            Some(a) => Some(AuditAction::from_input(a).ok_or_else(|| AppError::InvalidAction(a.clone()))?),
            None => None,
        };

        let pool = DbPool::new(cfg.database_path())?;
        LogLogic::print_log(&pool.conn, *limit, action, table.as_deref())?;
    }

    Ok(())
}
