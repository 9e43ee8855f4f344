use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

const CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        name            TEXT NOT NULL UNIQUE,
        email           TEXT DEFAULT '',
        phone           TEXT DEFAULT '',
        tax_id          TEXT DEFAULT '',
        address         TEXT DEFAULT '',
        work_info       TEXT DEFAULT '',
        taxis_username  TEXT DEFAULT '',
        taxis_password  TEXT DEFAULT '',
        notes           TEXT DEFAULT '',
        created_date    TEXT DEFAULT (datetime('now', 'localtime'))
    );
"#;

const SERVICES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS services (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT NOT NULL UNIQUE
    );
"#;

const TRANSACTIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id       INTEGER NOT NULL,
        service_id        INTEGER,
        notes             TEXT DEFAULT '',
        transaction_date  TEXT NOT NULL,
        cost_pre_vat      REAL,
        cost_final        REAL,
        status            TEXT NOT NULL,
        attachment_path   TEXT DEFAULT '',
        created_at        TEXT DEFAULT (datetime('now', 'localtime')),
        FOREIGN KEY (customer_id) REFERENCES customers(id),
        FOREIGN KEY (service_id) REFERENCES services(id) ON DELETE SET NULL
    );
"#;

const AUDIT_LOG_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS audit_log (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        action_type  TEXT NOT NULL,
        table_name   TEXT NOT NULL,
        record_id    INTEGER DEFAULT 0,
        description  TEXT DEFAULT '',
        old_value    TEXT DEFAULT '',
        new_value    TEXT DEFAULT '',
        timestamp    TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
    );
"#;

const COMPANY_SETTINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS company_settings (
        id              INTEGER PRIMARY KEY CHECK (id = 1),
        company_name    TEXT DEFAULT '',
        logo_path       TEXT DEFAULT '',
        signature_path  TEXT DEFAULT '',
        address         TEXT DEFAULT '',
        phone           TEXT DEFAULT '',
        email           TEXT DEFAULT '',
        tax_id          TEXT DEFAULT '',
        updated_at      TEXT
    );
"#;

const INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date, id);
    CREATE INDEX IF NOT EXISTS idx_transactions_customer ON transactions(customer_id);
    CREATE INDEX IF NOT EXISTS idx_audit_log_timestamp ON audit_log(timestamp, id);
"#;

/// Columns the extended schema added to `customers`.
/// `ALTER TABLE ... ADD COLUMN` only accepts constant defaults, so
/// `created_date` is added bare and filled in by the insert statements.
const CUSTOMER_COLUMNS: &[(&str, &str)] = &[
    ("email", "TEXT DEFAULT ''"),
    ("phone", "TEXT DEFAULT ''"),
    ("tax_id", "TEXT DEFAULT ''"),
    ("address", "TEXT DEFAULT ''"),
    ("work_info", "TEXT DEFAULT ''"),
    ("taxis_username", "TEXT DEFAULT ''"),
    ("taxis_password", "TEXT DEFAULT ''"),
    ("notes", "TEXT DEFAULT ''"),
    ("created_date", "TEXT"),
];

const TRANSACTION_COLUMNS: &[(&str, &str)] = &[
    ("attachment_path", "TEXT DEFAULT ''"),
    ("created_at", "TEXT"),
];

/// Check if a table exists.
fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of `table` (internal table names only, never user input).
fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    cols.collect()
}

/// Add every column of `wanted` that `table` lacks. Returns how many were added.
fn add_missing_columns(conn: &Connection, table: &str, wanted: &[(&str, &str)]) -> Result<usize> {
    let existing = table_columns(conn, table)?;
    let mut added = 0;

    for (name, decl) in wanted {
        if existing.iter().any(|c| c == name) {
            continue;
        }

        warning(format!("Adding '{}' column to {} table...", name, table));
        conn.execute_batch(&format!("ALTER TABLE {} ADD COLUMN {} {};", table, name, decl))?;
        added += 1;
    }

    Ok(added)
}

/// Create the tables that only exist in the extended schema.
fn create_missing_table(conn: &Connection, table: &str, ddl: &str) -> Result<bool> {
    if table_exists(conn, table)? {
        return Ok(false);
    }
    conn.execute_batch(ddl)?;
    Ok(true)
}

/// Bring the schema to the current version.
///
/// Idempotent: a second call on an up-to-date store changes nothing and
/// prints nothing. Migrations are additive only.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let fresh = !table_exists(conn, "customers")?;

    conn.execute_batch(CUSTOMERS_TABLE)?;
    conn.execute_batch(SERVICES_TABLE)?;
    conn.execute_batch(TRANSACTIONS_TABLE)?;

    let added_customer = add_missing_columns(conn, "customers", CUSTOMER_COLUMNS)?;
    let added_tx = add_missing_columns(conn, "transactions", TRANSACTION_COLUMNS)?;
    if added_customer + added_tx > 0 {
        success(format!(
            "Schema upgraded ({} customer, {} transaction column(s) added).",
            added_customer, added_tx
        ));
    }

    let audit_created = create_missing_table(conn, "audit_log", AUDIT_LOG_TABLE)?;
    let settings_created = create_missing_table(conn, "company_settings", COMPANY_SETTINGS_TABLE)?;
    if !fresh && (audit_created || settings_created) {
        success("Created audit_log / company_settings tables.");
    }

    conn.execute_batch(INDEXES)?;
    Ok(())
}
