use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportReport};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::import::read_rows;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, yes } = cmd {
        //
        // 1️⃣ Read the whole file first: file-level errors abort here
        //
        let path = expand_tilde(file);
        let rows = read_rows(&path)?;

        if rows.is_empty() {
            warning("The file contains no data rows.");
            return Ok(());
        }

        if !*yes && !confirm(format!("Import {} row(s) from {}?", rows.len(), path.display()))? {
            info("Import cancelled.");
            return Ok(());
        }

        //
        // 2️⃣ Row-by-row import
        //
        let pool = DbPool::new(cfg.database_path())?;
        let report = ImportLogic::apply(&pool.conn, &rows)?;

        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ImportReport) {
    let lines = [
        format!("Imported: {}", report.success),
        format!("Failed:   {}", report.failed()),
    ];
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    println!("┌{}┐", "─".repeat(width));
    for l in &lines {
        println!("│ {:<w$} │", l, w = width - 2);
    }
    println!("└{}┘", "─".repeat(width));

    for line in &report.log {
        println!("{}", line);
    }

    if report.failed() == 0 {
        success("Import completed.");
    } else {
        warning(format!(
            "Import completed with {} failed row(s).",
            report.failed()
        ));
    }
}
