use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use crate::models::company::CompanySettings;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, RESET, colorize_optional};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings { show, company } = cmd {
        let pool = DbPool::new(cfg.database_path())?;
        let conn = &pool.conn;

        let overrides = company.overrides();

        if !overrides.is_empty() {
            let merged = overrides.merge_into(settings::get(conn)?.unwrap_or_default());
            if merged.company_name.trim().is_empty() {
                return Err(AppError::MissingField("company name"));
            }
            settings::upsert(conn, &merged)?;
            success("Company settings saved.");
        }

        if *show || overrides.is_empty() {
            match settings::get(conn)? {
                Some(s) => print_settings(&s),
                None => info("No company settings stored yet."),
            }
        }
    }

    Ok(())
}

fn print_settings(s: &CompanySettings) {
    header("Company settings");
    let fields = [
        ("Company", &s.company_name),
        ("Logo", &s.logo_path),
        ("Signature", &s.signature_path),
        ("Address", &s.address),
        ("Phone", &s.phone),
        ("Email", &s.email),
        ("Tax ID", &s.tax_id),
        ("Updated", &s.updated_at),
    ];
    for (label, value) in fields {
        println!("{CYAN}{:<10}{RESET} {}", label, colorize_optional(value));
    }
}
