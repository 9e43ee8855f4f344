use crate::cli::parser::ServiceCmd;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::services;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(action: &ServiceCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(cfg.database_path())?;
    let conn = &pool.conn;

    match action {
        ServiceCmd::Add { name } => match services::add(conn, name)? {
            Some(id) => success(format!("Service '{}' added (#{}).", name.trim(), id)),
            None => warning(format!("Service '{}' already exists.", name.trim())),
        },

        ServiceCmd::List => {
            let list = services::list(conn)?;
            if list.is_empty() {
                info("The service catalog is empty.");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::new("ID", 4), Column::new("Service", 20)]);
            for s in list {
                table.add_row(vec![s.id.to_string(), s.name]);
            }
            println!("{}", table.render());
        }

        ServiceCmd::Del { id, yes } => {
            let svc = services::get(conn, *id)?.ok_or(AppError::ServiceNotFound(*id))?;

            if !*yes && !confirm(format!("Delete service #{} '{}'?", svc.id, svc.name))? {
                info("Nothing deleted.");
                return Ok(());
            }

            if services::delete(conn, *id)? {
                success(format!("Service #{} deleted.", id));
            } else {
                return Err(AppError::ServiceNotFound(*id));
            }
        }
    }

    Ok(())
}
