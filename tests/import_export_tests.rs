use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{count, desk, init_db, init_db_with_data, open, setup_test_db, temp_out};

#[test]
fn test_import_csv_reports_row_failures() {
    let db_path = setup_test_db("import_csv");
    init_db(&db_path);

    desk()
        .args(["--db", &db_path, "service", "add", "Λογιστική"])
        .assert()
        .success();

    let file = temp_out("import_csv", "csv");
    fs::write(
        &file,
        "Customer,Service,Date,Cost,Status,Notes\n\
         Anna,λογιστική,2024-05-01,124,Πληρώθηκε,\n\
         Babis,Λογιστική,2024-05-02,,Εκκρεμεί,\n\
         Anna,Ανύπαρκτη,2024-05-03,10,paid,\n\
         Chris,Λογιστική,2024-05-04,\"12,40\",pending,first\n",
    )
    .unwrap();

    desk()
        .args(["--db", &db_path, "import", "--file", &file, "--yes"])
        .assert()
        .success()
        .stdout(
            contains("Imported: 2")
                .and(contains("Failed:   2"))
                .and(contains("Row 3: Error"))
                .and(contains("Row 4: Error"))
                .and(contains("Row 5: OK - Chris")),
        );

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM transactions"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM services"), 1);

    let pre: f64 = open(&db_path)
        .query_row(
            "SELECT t.cost_pre_vat FROM transactions t JOIN customers c ON c.id = t.customer_id
             WHERE c.name = 'Chris'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!((pre - 10.0).abs() < 1e-9);

    assert_eq!(
        count(&db_path, "SELECT COUNT(*) FROM audit_log WHERE action_type = 'IMPORT'"),
        1
    );
}

#[test]
fn test_import_missing_file_is_file_level_error() {
    let db_path = setup_test_db("import_missing");
    init_db(&db_path);

    desk()
        .args(["--db", &db_path, "import", "--file", "/nonexistent/batch.xlsx", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Import failed"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM audit_log"), 0);
}

#[test]
fn test_template_then_import_xlsx() {
    let db_path = setup_test_db("template_xlsx");
    init_db(&db_path);

    let file = temp_out("template_xlsx", "xlsx");
    desk()
        .args(["--db", &db_path, "template", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Import template written"));

    // header-only template: nothing to import
    desk()
        .args(["--db", &db_path, "import", "--file", &file, "--yes"])
        .assert()
        .success()
        .stdout(contains("no data rows"));
}

#[test]
fn test_export_csv_with_filters() {
    let db_path = setup_test_db("export_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv", "csv");
    desk()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024-01:2024-02",
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "id,date,customer,service,notes,cost_pre_vat,cost_final,status"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,2024-01-10,Anna,Tax return"));
    assert!(lines[2].starts_with("2,2024-02-05,Babis,Payroll"));
}

#[test]
fn test_export_json_by_customer_and_status() {
    let db_path = setup_test_db("export_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_json", "json");
    desk()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--customer", "Anna",
            "--status", "pending",
        ])
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 3);
    assert_eq!(items[0]["cost_final"], 31.0);
}

#[test]
fn test_export_xlsx_and_pdf() {
    let db_path = setup_test_db("export_xlsx_pdf");
    init_db_with_data(&db_path);

    let xlsx = temp_out("export_xlsx", "xlsx");
    desk()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx).unwrap().len() > 0);

    let pdf = temp_out("export_pdf", "pdf");
    desk()
        .args(["--db", &db_path, "export", "--format", "pdf", "--file", &pdf, "--range", "2024"])
        .assert()
        .success();
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_export_refuses_relative_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    desk()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
