pub mod audit;
pub mod customers;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod services;
pub mod settings;
pub mod stats;
pub mod transactions;

use rusqlite::Row;

/// Read a nullable TEXT column, mapping NULL (legacy rows) to "".
pub(crate) fn text(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}
