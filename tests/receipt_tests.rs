use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{count, desk, init_db_with_data, open, setup_test_db, temp_out};

#[test]
fn test_receipt_requires_company_name() {
    let db_path = setup_test_db("receipt_no_company");
    init_db_with_data(&db_path);

    let out = temp_out("receipt_no_company", "pdf");
    desk()
        .args(["--db", &db_path, "receipt", "1", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("company name"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_receipt_with_saved_settings() {
    let db_path = setup_test_db("receipt_saved");
    init_db_with_data(&db_path);

    let out = temp_out("receipt_saved", "pdf");
    desk()
        .args([
            "--db",
            &db_path,
            "receipt",
            "1",
            "--kind",
            "collection",
            "--file",
            &out,
            "--company-name",
            "Γραφείο Λογιστών",
            "--tax-id",
            "099999999",
            "--logo",
            "/nonexistent/logo.png",
            "--save-settings",
        ])
        .assert()
        .success()
        .stdout(contains("Receipt created").and(contains("Skipping logo image")));

    assert!(fs::read(&out).unwrap().starts_with(b"%PDF"));

    let (name, tax): (String, String) = open(&db_path)
        .query_row(
            "SELECT company_name, tax_id FROM company_settings WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Γραφείο Λογιστών");
    assert_eq!(tax, "099999999");
    assert_eq!(
        count(
            &db_path,
            "SELECT COUNT(*) FROM audit_log WHERE table_name = 'company_settings'"
        ),
        1
    );

    // stored settings are enough for the next receipt
    let out2 = temp_out("receipt_saved_2", "pdf");
    desk()
        .args(["--db", &db_path, "receipt", "2", "--file", &out2])
        .assert()
        .success();
}

#[test]
fn test_receipt_unknown_transaction() {
    let db_path = setup_test_db("receipt_unknown_tx");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "receipt", "99", "--company-name", "Acme"])
        .assert()
        .failure()
        .stderr(contains("Transaction not found"));
}

#[test]
fn test_settings_update_and_show() {
    let db_path = setup_test_db("settings_cmd");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "settings"])
        .assert()
        .success()
        .stdout(contains("No company settings"));

    desk()
        .args(["--db", &db_path, "settings", "--company-name", "Acme", "--phone", "210"])
        .assert()
        .success()
        .stdout(contains("saved"));

    desk()
        .args(["--db", &db_path, "settings", "--show"])
        .assert()
        .success()
        .stdout(contains("Acme").and(contains("210")));
}
