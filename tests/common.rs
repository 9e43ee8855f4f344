#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn desk() -> Command {
    cargo_bin_cmd!("officedesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_officedesk", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).ok();
    path.push("company_data.db");
    path.to_string_lossy().to_string()
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `--test init` on a fresh database.
pub fn init_db(db_path: &str) {
    desk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Init plus two services and three transactions:
/// #1 Anna / Tax return / 124 paid 2024-01-10
/// #2 Babis / Payroll / 62 pending 2024-02-05
/// #3 Anna / Payroll / 31 pending 2024-03-01
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    for svc in ["Tax return", "Payroll"] {
        desk()
            .args(["--db", db_path, "service", "add", svc])
            .assert()
            .success();
    }

    for (customer, service, cost, status, date) in [
        ("Anna", "Tax return", "124", "paid", "2024-01-10"),
        ("Babis", "Payroll", "62", "pending", "2024-02-05"),
        ("Anna", "Payroll", "31", "pending", "2024-03-01"),
    ] {
        desk()
            .args([
                "--db", db_path, "tx", "add", customer, service, cost, "--status", status,
                "--date", date,
            ])
            .assert()
            .success();
    }
}

/// Direct connection for assertions on stored state.
pub fn open(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}

pub fn count(db_path: &str, sql: &str) -> i64 {
    open(db_path)
        .query_row(sql, [], |r| r.get(0))
        .expect("count query")
}

/// A throwaway HOME whose `.officedesk/officedesk.conf` holds `conf`.
pub fn fake_home(name: &str, conf: &str) -> String {
    let mut home: PathBuf = env::temp_dir();
    home.push(format!("{}_home", name));
    fs::remove_dir_all(&home).ok();
    let dir = home.join(".officedesk");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("officedesk.conf"), conf).unwrap();
    home.to_string_lossy().to_string()
}
