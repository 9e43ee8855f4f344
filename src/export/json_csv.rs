// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{TransactionExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(items: &[TransactionExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(items)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV (header from the serde field names).
pub(crate) fn export_csv(items: &[TransactionExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    for item in items {
        wtr.serialize(item)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Vec<TransactionExport> {
        vec![TransactionExport {
            id: 1,
            date: "2024-05-02".into(),
            customer: "Nikos, Ltd".into(),
            service: "Audit".into(),
            notes: String::new(),
            cost_pre_vat: 100.0,
            cost_final: 124.0,
            status: "Paid".into(),
        }]
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let path = std::env::temp_dir().join("officedesk_export_unit.csv");
        export_csv(&sample(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,date,customer,service,notes,cost_pre_vat,cost_final,status")
        );
        assert_eq!(
            lines.next(),
            Some("1,2024-05-02,\"Nikos, Ltd\",Audit,,100.0,124.0,Paid")
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn json_is_an_array_of_records() {
        let path = std::env::temp_dir().join("officedesk_export_unit.json");
        export_json(&sample(), &path).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v[0]["customer"], "Nikos, Ltd");
        assert_eq!(v[0]["cost_final"], 124.0);
        fs::remove_file(&path).ok();
    }
}
