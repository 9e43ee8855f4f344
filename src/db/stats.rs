use crate::db::{audit, customers, services, transactions};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub fn print_db_info(conn: &Connection, db_path: &Path) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!(
        "{}• File:{} {}{}{}",
        CYAN,
        RESET,
        YELLOW,
        db_path.display(),
        RESET
    );
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let counts = [
        ("customers", customers::count(conn)?),
        ("services", services::count(conn)?),
        ("transactions", transactions::count(conn)?),
        ("audit entries", audit::count(conn)?),
    ];
    for (label, n) in counts {
        println!("{}• Total {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let (first, last) = match transactions::date_range(conn)? {
        Some((a, b)) => (a, b),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Transaction dates:{}", CYAN, RESET);
    println!("    from: {}", first);
    println!("    to:   {}", last);

    println!();
    Ok(())
}
