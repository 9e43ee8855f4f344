use crate::cli::parser::CustomerCmd;
use crate::config::Config;
use crate::core::customer::CustomerLogic;
use crate::db::customers;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::i18n::Locale;
use crate::models::customer::CustomerDetails;
use crate::models::transaction::TransactionRow;
use crate::utils::date::to_iso;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{CYAN, RESET, color_for_status, colorize_optional};
use crate::utils::table::{Column, Table};

pub fn handle(action: &CustomerCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(cfg.database_path())?;
    let conn = &pool.conn;

    match action {
        CustomerCmd::Add { name } => match customers::add_customer(conn, name)? {
            Some(id) => success(format!("Customer '{}' created (#{}).", name.trim(), id)),
            None => warning(format!("Customer '{}' already exists.", name.trim())),
        },

        CustomerCmd::Show { name } => {
            let p = CustomerLogic::profile(conn, name)?;
            let c = &p.customer;

            header(format!("Customer #{}: {}", c.id, c.name));
            let fields = [
                ("Email", &c.email),
                ("Phone", &c.phone),
                ("Tax ID", &c.tax_id),
                ("Address", &c.address),
                ("Work info", &c.work_info),
                ("Portal user", &c.portal_username),
                ("Notes", &c.notes),
                ("Created", &c.created_date),
            ];
            for (label, value) in fields {
                println!("{CYAN}{:<12}{RESET} {}", label, colorize_optional(value));
            }

            println!();
            println!("💶 Paid:        {:>10.2} €", p.balance.paid);
            println!("⏳ Outstanding: {:>10.2} €", p.balance.outstanding);
            println!();

            if p.history.is_empty() {
                info("No transactions for this customer.");
            } else {
                println!("{}", transactions_table(&p.history, cfg.locale));
            }
        }

        CustomerCmd::Edit {
            name,
            new_name,
            email,
            phone,
            tax_id,
            address,
            work_info,
            portal_user,
            portal_secret,
            notes,
        } => {
            let id = customers::get_id_by_name(conn, name.trim())?
                .ok_or_else(|| AppError::CustomerNotFound(name.clone()))?;
            let current = customers::get_details(conn, id)?
                .ok_or_else(|| AppError::CustomerNotFound(name.clone()))?;

            // merge flags over the stored record, then overwrite all of it
            let mut d = CustomerDetails::from(&current);
            let merges = [
                (new_name, &mut d.name),
                (email, &mut d.email),
                (phone, &mut d.phone),
                (tax_id, &mut d.tax_id),
                (address, &mut d.address),
                (work_info, &mut d.work_info),
                (portal_user, &mut d.portal_username),
                (portal_secret, &mut d.portal_secret),
                (notes, &mut d.notes),
            ];
            for (flag, field) in merges {
                if let Some(v) = flag {
                    *field = v.clone();
                }
            }

            if customers::update_details(conn, id, &d)? {
                success(format!("Customer #{} updated.", id));
            } else {
                return Err(AppError::CustomerNotFound(name.clone()));
            }
        }

        CustomerCmd::Search { prefix, limit } => {
            let names = customers::search_by_prefix(conn, prefix, *limit)?;
            if names.is_empty() {
                info(format!("No customer name starts with '{}'.", prefix));
            }
            for n in names {
                println!("{}", n);
            }
        }

        CustomerCmd::Find { terms, limit } => {
            let found = customers::fuzzy_search(conn, &terms.join(" "), *limit)?;
            if found.is_empty() {
                info("No matching customers.");
            }
            for (id, n) in found {
                println!("{:>5}  {}", id, n);
            }
        }
    }

    Ok(())
}

/// Shared transaction listing used by `customer show` and `tx list/search`.
pub(crate) fn transactions_table(rows: &[TransactionRow], locale: Locale) -> String {
    let labels = locale.labels();
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Date", 10),
        Column::new("Customer", 12),
        Column::new("Service", 12),
        Column::new("Pre-VAT", 8),
        Column::new("Final", 8),
        Column::new("Notes", 10),
        // last: its colour codes only skew trailing padding
        Column::new("Status", 8),
    ]);

    for r in rows {
        table.add_row(vec![
            r.id.to_string(),
            to_iso(r.date),
            r.customer.clone(),
            r.service_label(labels).to_string(),
            format!("{:.2}", r.cost_pre_vat),
            format!("{:.2}", r.cost_final),
            r.notes.clone(),
            format!(
                "{}{}{}",
                color_for_status(r.status),
                r.status.display(locale),
                RESET
            ),
        ]);
    }

    table.render()
}
