//! SQLite connection wrapper (one handle per logical operation).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file with foreign-key enforcement enabled.
    ///
    /// The pragma is per-connection, so every handle must go through here
    /// for `ON DELETE SET NULL` on `transactions.service_id` to apply.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::configure(conn)
    }

    /// Private in-memory database (tests, dry runs).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}
