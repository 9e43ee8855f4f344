use crate::cli::commands::customer::transactions_table;
use crate::cli::commands::{parse_status, parse_status_filter};
use crate::cli::parser::TxCmd;
use crate::config::Config;
use crate::core::add::{AddLogic, DirectEntry};
use crate::core::attach::open_with_system;
use crate::core::vat::parse_cost;
use crate::db::pool::DbPool;
use crate::db::transactions;
use crate::errors::{AppError, AppResult};
use crate::models::transaction::SearchFilter;
use crate::ui::messages::{confirm, header, info, success};
use crate::utils::colors::{CYAN, RESET, colorize_optional};
use crate::utils::date::{parse_date, to_iso, today};
use crate::utils::path::expand_tilde;
use std::path::Path;

pub fn handle(action: &TxCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(cfg.database_path())?;
    let conn = &pool.conn;

    match action {
        TxCmd::Add {
            customer,
            service,
            final_cost,
            status,
            notes,
            date,
            attach,
        } => {
            //
            // 1️⃣ Parse user input
            //
            let entry = DirectEntry {
                customer: customer.clone(),
                service: service.clone(),
                final_cost: parse_cost(final_cost)?,
                status: parse_status(status)?,
                notes: notes.clone(),
                date: match date {
                    Some(d) => parse_date(d)?,
                    None => today(),
                },
                attachment: attach.as_deref().map(expand_tilde),
            };

            //
            // 2️⃣ Store
            //
            let id = AddLogic::apply(conn, &entry, &cfg.attachments_path())?;
            success(format!("Transaction #{} recorded.", id));
        }

        TxCmd::List { status } => {
            let rows = transactions::list_all(conn, parse_status_filter(status)?)?;
            if rows.is_empty() {
                info("No transactions.");
            } else {
                println!("{}", transactions_table(&rows, cfg.locale));
            }
        }

        TxCmd::Show { id } => {
            let row = transactions::get_row(conn, *id)?.ok_or(AppError::TransactionNotFound(*id))?;
            let labels = cfg.locale.labels();
            let attachment = transactions::get_attachment(conn, *id)?.unwrap_or_default();

            header(format!("Transaction #{}", row.id));
            let fields = [
                ("Date", to_iso(row.date)),
                ("Customer", row.customer.clone()),
                ("Service", row.service_label(labels).to_string()),
                ("Pre-VAT", format!("{:.2} €", row.cost_pre_vat)),
                ("Final", format!("{:.2} €", row.cost_final)),
                ("Status", row.status.display(cfg.locale).to_string()),
                ("Notes", row.notes.clone()),
                ("Attachment", attachment),
            ];
            for (label, value) in fields {
                println!("{CYAN}{:<11}{RESET} {}", label, colorize_optional(&value));
            }
        }

        TxCmd::Edit { id, status, notes } => {
            let current =
                transactions::get_details(conn, *id)?.ok_or(AppError::TransactionNotFound(*id))?;

            let new_status = match status {
                Some(s) => parse_status(s)?,
                None => current.status,
            };
            let new_notes = notes.as_deref().unwrap_or(&current.notes);

            if transactions::update(conn, *id, new_status, new_notes)? {
                success(format!("Transaction #{} updated.", id));
            } else {
                return Err(AppError::TransactionNotFound(*id));
            }
        }

        TxCmd::Del { id, yes } => {
            let summary =
                transactions::get_summary(conn, *id)?.ok_or(AppError::TransactionNotFound(*id))?;
            let labels = cfg.locale.labels();

            if !*yes
                && !confirm(format!(
                    "Delete transaction #{} ({})?",
                    id,
                    summary.describe(labels)
                ))?
            {
                info("Nothing deleted.");
                return Ok(());
            }

            if transactions::delete(conn, *id, labels)? {
                success(format!("Transaction #{} deleted.", id));
            } else {
                return Err(AppError::TransactionNotFound(*id));
            }
        }

        TxCmd::Search {
            customer,
            from,
            to,
            min,
            max,
            status,
        } => {
            let filter = SearchFilter {
                customer: customer.clone(),
                date_from: from.as_deref().map(parse_date).transpose()?,
                date_to: to.as_deref().map(parse_date).transpose()?,
                min_amount: *min,
                max_amount: *max,
                status: parse_status_filter(status)?,
            };

            let rows = transactions::advanced_search(conn, &filter)?;
            if rows.is_empty() {
                info("No transactions match the filters.");
            } else {
                println!("{}", transactions_table(&rows, cfg.locale));
                info(format!("{} transaction(s) found.", rows.len()));
            }
        }

        TxCmd::Attachment { id, open } => {
            if transactions::get_row(conn, *id)?.is_none() {
                return Err(AppError::TransactionNotFound(*id));
            }
            let stored = transactions::get_attachment(conn, *id)?.ok_or(AppError::NoAttachment(*id))?;

            println!("{}", stored);
            if *open {
                open_with_system(Path::new(&stored))?;
            }
        }
    }

    Ok(())
}
