use crate::cli::commands::parse_status_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic, ExportRequest, FontSet};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        status,
        customer,
        force,
    } = cmd
    {
        let req = ExportRequest {
            format: *format,
            file,
            range: range.as_deref(),
            status: parse_status_filter(status)?,
            customer: customer.as_deref(),
            force: *force,
        };

        // PDF tables use the receipt fonts so Greek text survives
        let fonts = if *format == ExportFormat::Pdf {
            FontSet::resolve(
                cfg.receipt_font.as_deref().map(expand_tilde).as_deref(),
                cfg.receipt_font_bold.as_deref().map(expand_tilde).as_deref(),
            )
        } else {
            FontSet::builtin()
        };

        let pool = DbPool::new(cfg.database_path())?;
        ExportLogic::export(&pool.conn, &req, cfg.locale, fonts)?;
    }
    Ok(())
}
