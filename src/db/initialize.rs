use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fs;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))?;
    Ok(())
}

/// Prepare everything the store needs on disk: the database's parent
/// directory, the attachments directory and the schema.
pub fn init_storage(cfg: &Config) -> AppResult<()> {
    let db_path = cfg.database_path();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AppError::Storage(parent.to_path_buf(), e))?;
        }
    }

    let attachments = cfg.attachments_path();
    fs::create_dir_all(&attachments).map_err(|e| AppError::Storage(attachments.clone(), e))?;

    let pool = DbPool::new(&db_path).map_err(|e| AppError::DbOpen(db_path.clone(), e))?;
    init_db(&pool.conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_dir_names_the_path() {
        let cfg = Config {
            database: "/proc/no_such_share/company_data.db".into(),
            ..Config::default()
        };

        let err = init_storage(&cfg).unwrap_err();
        assert!(matches!(err, AppError::Storage(..)));
        assert!(err.to_string().contains("/proc/no_such_share"));
    }

    #[test]
    fn prepares_dirs_and_schema() {
        let dir = std::env::temp_dir().join(format!("officedesk_init_{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();

        let cfg = Config {
            database: dir.join("data/company_data.db").to_string_lossy().to_string(),
            ..Config::default()
        };
        init_storage(&cfg).unwrap();

        assert!(dir.join("data/attachments").is_dir());
        let pool = DbPool::new(cfg.database_path()).unwrap();
        let n: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='audit_log'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1);
        fs::remove_dir_all(&dir).ok();
    }
}
