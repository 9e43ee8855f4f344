use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{count, desk, fake_home, init_db, init_db_with_data, open, setup_test_db};

#[test]
fn test_init_creates_schema_and_attachments_dir() {
    let db_path = setup_test_db("cli_init");
    init_db(&db_path);

    let tables = count(
        &db_path,
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
         ('customers','services','transactions','audit_log','company_settings')",
    );
    assert_eq!(tables, 5);

    let attachments = std::path::Path::new(&db_path)
        .parent()
        .unwrap()
        .join("attachments");
    assert!(attachments.is_dir());

    // second init is a silent no-op on the schema
    desk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("column to").not());
}

#[test]
fn test_customer_add_is_idempotent() {
    let db_path = setup_test_db("cli_customer_add");
    init_db(&db_path);

    desk()
        .args(["--db", &db_path, "customer", "add", "Maria Papadaki"])
        .assert()
        .success()
        .stdout(contains("created"));

    desk()
        .args(["--db", &db_path, "customer", "add", "Maria Papadaki"])
        .assert()
        .success()
        .stdout(contains("already exists"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM customers"), 1);
}

#[test]
fn test_customer_search_is_case_sensitive_prefix() {
    let db_path = setup_test_db("cli_customer_search");
    init_db(&db_path);

    for name in ["Maria", "Marios", "maria lower", "Anna"] {
        desk()
            .args(["--db", &db_path, "customer", "add", name])
            .assert()
            .success();
    }

    desk()
        .args(["--db", &db_path, "customer", "search", "Mar"])
        .assert()
        .success()
        .stdout(contains("Maria").and(contains("Marios")).and(contains("maria lower").not()));

    desk()
        .args(["--db", &db_path, "customer", "find", "ari", "os"])
        .assert()
        .success()
        .stdout(contains("Marios").and(contains("Maria\n").not()));
}

#[test]
fn test_customer_edit_merges_flags_and_audits() {
    let db_path = setup_test_db("cli_customer_edit");
    init_db(&db_path);

    desk()
        .args(["--db", &db_path, "customer", "add", "Nikos"])
        .assert()
        .success();

    desk()
        .args([
            "--db", &db_path, "customer", "edit", "Nikos", "--email", "n@example.gr", "--phone",
            "2100000000",
        ])
        .assert()
        .success()
        .stdout(contains("updated"));

    desk()
        .args(["--db", &db_path, "customer", "edit", "Nikos", "--name", "Nikos P."])
        .assert()
        .success();

    let (name, email, phone): (String, String, String) = open(&db_path)
        .query_row("SELECT name, email, phone FROM customers", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .unwrap();
    assert_eq!(name, "Nikos P.");
    assert_eq!(email, "n@example.gr");
    assert_eq!(phone, "2100000000");

    assert_eq!(
        count(
            &db_path,
            "SELECT COUNT(*) FROM audit_log WHERE action_type='UPDATE' AND table_name='customers'"
        ),
        2
    );

    desk()
        .args(["--db", &db_path, "customer", "edit", "Ghost", "--email", "x"])
        .assert()
        .failure()
        .stderr(contains("Customer not found"));
}

#[test]
fn test_customer_rename_onto_existing_name_fails() {
    let db_path = setup_test_db("cli_customer_rename_dup");
    init_db(&db_path);

    for name in ["Anna", "Babis"] {
        desk()
            .args(["--db", &db_path, "customer", "add", name])
            .assert()
            .success();
    }

    desk()
        .args(["--db", &db_path, "customer", "edit", "Babis", "--name", "Anna"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_customer_show_balance_and_history() {
    let db_path = setup_test_db("cli_customer_show");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "customer", "show", "Anna"])
        .assert()
        .success()
        .stdout(
            contains("124.00")
                .and(contains("31.00"))
                .and(contains("Tax return"))
                .and(contains("Babis").not()),
        );

    // unique fuzzy match
    desk()
        .args(["--db", &db_path, "customer", "show", "Bab"])
        .assert()
        .success()
        .stdout(contains("Customer #2: Babis"));
}

#[test]
fn test_tx_add_computes_pre_vat_and_audits() {
    let db_path = setup_test_db("cli_tx_add");
    init_db_with_data(&db_path);

    let pre: f64 = open(&db_path)
        .query_row("SELECT cost_pre_vat FROM transactions WHERE id = 1", [], |r| r.get(0))
        .unwrap();
    assert!((pre - 100.0).abs() < 1e-9);

    assert_eq!(
        count(
            &db_path,
            "SELECT COUNT(*) FROM audit_log WHERE action_type='INSERT' AND table_name='transactions'"
        ),
        3
    );
    // implicit customer creation is not audited
    assert_eq!(
        count(&db_path, "SELECT COUNT(*) FROM audit_log WHERE table_name='customers'"),
        0
    );
}

#[test]
fn test_tx_add_validation_errors() {
    let db_path = setup_test_db("cli_tx_add_invalid");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "tx", "add", "Anna", "Unknown", "10"])
        .assert()
        .failure()
        .stderr(contains("Unknown service"));

    desk()
        .args(["--db", &db_path, "tx", "add", "Anna", "Payroll", "abc"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    desk()
        .args(["--db", &db_path, "tx", "add", "Anna", "Payroll", "10", "--status", "overdue"])
        .assert()
        .failure()
        .stderr(contains("Invalid payment status"));

    desk()
        .args(["--db", &db_path, "tx", "add", "Anna", "Payroll", "10", "--date", "2024-13-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM transactions"), 3);
}

#[test]
fn test_tx_list_newest_first_with_status_filter() {
    let db_path = setup_test_db("cli_tx_list");
    init_db_with_data(&db_path);

    let out = desk()
        .args(["--db", &db_path, "tx", "list", "--status", "pending"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);

    assert!(!text.contains("2024-01-10"));
    let march = text.find("2024-03-01").unwrap();
    let feb = text.find("2024-02-05").unwrap();
    assert!(march < feb);
}

#[test]
fn test_tx_edit_and_delete() {
    let db_path = setup_test_db("cli_tx_edit_del");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "tx", "edit", "2", "--status", "paid", "--notes", "bank"])
        .assert()
        .success();

    let (status, notes): (String, String) = open(&db_path)
        .query_row("SELECT status, notes FROM transactions WHERE id = 2", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(status, "Πληρώθηκε");
    assert_eq!(notes, "bank");

    desk()
        .args(["--db", &db_path, "tx", "del", "2", "--yes"])
        .assert()
        .success();
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM transactions"), 2);

    let old: String = open(&db_path)
        .query_row(
            "SELECT old_value FROM audit_log WHERE action_type='DELETE' AND record_id = 2",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(old.contains("Babis"));
    assert!(old.contains("62.00€"));
    assert!(old.contains("2024-02-05"));

    desk()
        .args(["--db", &db_path, "tx", "del", "2", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Transaction not found"));
}

#[test]
fn test_tx_delete_declined_on_stdin() {
    let db_path = setup_test_db("cli_tx_del_declined");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "tx", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Nothing deleted"));
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM transactions"), 3);
}

#[test]
fn test_service_delete_keeps_transactions() {
    let db_path = setup_test_db("cli_service_del");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "service", "del", "2", "--yes"])
        .assert()
        .success();

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM transactions"), 3);
    assert_eq!(
        count(&db_path, "SELECT COUNT(*) FROM transactions WHERE service_id IS NULL"),
        2
    );

    desk()
        .args(["--db", &db_path, "tx", "show", "2"])
        .assert()
        .success()
        .stdout(contains("Διαγραμμένη Υπηρεσία"));
}

#[test]
fn test_tx_search_combines_filters() {
    let db_path = setup_test_db("cli_tx_search");
    init_db_with_data(&db_path);

    desk()
        .args([
            "--db", &db_path, "tx", "search", "--customer", "Ann", "--min", "50", "--from",
            "2024-01-01", "--to", "2024-12-31",
        ])
        .assert()
        .success()
        .stdout(contains("1 transaction(s) found").and(contains("2024-01-10")));

    desk()
        .args(["--db", &db_path, "tx", "search", "--customer", "anna"])
        .assert()
        .success()
        .stdout(contains("No transactions match"));
}

#[test]
fn test_tx_attachment_is_copied() {
    let db_path = setup_test_db("cli_tx_attach");
    init_db_with_data(&db_path);

    let src = std::env::temp_dir().join("officedesk_invoice_scan.txt");
    std::fs::write(&src, "scan").unwrap();

    desk()
        .args([
            "--db",
            &db_path,
            "tx",
            "add",
            "Anna",
            "Payroll",
            "10",
            "--attach",
            &src.to_string_lossy(),
        ])
        .assert()
        .success();

    let out = desk()
        .args(["--db", &db_path, "tx", "attachment", "4"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stored = String::from_utf8_lossy(&out.stdout).trim().to_string();
    assert!(stored.ends_with("_officedesk_invoice_scan.txt"));
    assert!(stored.contains("attachments"));
    assert_eq!(std::fs::read_to_string(&stored).unwrap(), "scan");

    desk()
        .args(["--db", &db_path, "tx", "attachment", "1"])
        .assert()
        .failure()
        .stderr(contains("No attachment"));
}

#[test]
fn test_log_filters_by_action() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "log", "--action", "insert", "--table", "services"])
        .assert()
        .success()
        .stdout(contains("services#1").and(contains("transactions#").not()));

    desk()
        .args(["--db", &db_path, "log", "--action", "rename"])
        .assert()
        .failure()
        .stderr(contains("Invalid audit action"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "db", "--info", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("Vacuum completed")));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);

    let dest = common::temp_out("cli_backup", "db");
    let zip = dest.replace(".db", ".zip");
    std::fs::remove_file(&zip).ok();

    desk()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .success();
    assert_eq!(count(&dest, "SELECT COUNT(*) FROM transactions"), 3);

    desk()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress"])
        .assert()
        .success();
    assert!(std::path::Path::new(&zip).is_file());
}

#[test]
fn test_config_print_survives_unreachable_database() {
    let home = fake_home("cfg_unreachable", "database: /proc/no_such_share/company_data.db\n");

    desk()
        .env("HOME", &home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("/proc/no_such_share/company_data.db"));

    desk()
        .env("HOME", &home)
        .args(["service", "list"])
        .assert()
        .failure()
        .stderr(contains("/proc/no_such_share"));
}

#[test]
fn test_config_print_survives_malformed_file() {
    let home = fake_home("cfg_malformed", "database: [unclosed\n");

    desk()
        .env("HOME", &home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("officedesk.conf").and(contains("showing defaults")));
}
