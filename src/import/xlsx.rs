use super::{COLUMNS, Cell, ImportRow};
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::excel_serial_to_date;
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

fn to_cell(data: Option<&Data>) -> Cell {
    match data {
        None | Some(Data::Empty) | Some(Data::Error(_)) => Cell::Empty,
        Some(Data::String(s)) => Cell::text(s),
        Some(Data::Float(f)) => Cell::Number(*f),
        Some(Data::Int(i)) => Cell::Number(*i as f64),
        Some(Data::Bool(b)) => Cell::Text(b.to_string()),
        Some(Data::DateTime(dt)) => match excel_serial_to_date(dt.as_f64()) {
            Some(d) => Cell::Date(d),
            None => Cell::Number(dt.as_f64()),
        },
        Some(Data::DateTimeIso(s)) => match s.get(..10) {
            Some(day) => Cell::text(day),
            None => Cell::text(s),
        },
        Some(Data::DurationIso(s)) => Cell::text(s),
    }
}

/// First worksheet, data from the second sheet row on.
pub(super) fn read(path: &Path) -> AppResult<Vec<ImportRow>> {
    let mut wb = open_workbook::<Xlsx<_>, _>(path).map_err(|e| AppError::Import(format!("{e}")))?;
    let range = wb
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Import("workbook has no worksheets".into()))?
        .map_err(|e| AppError::Import(format!("{e}")))?;

    let Some((last_row, _)) = range.end() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for r in 1..=last_row {
        let cells = (0..COLUMNS as u32)
            .map(|c| to_cell(range.get_value((r, c))))
            .collect();
        out.push(ImportRow::new(r as usize + 1, cells));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_xlsxwriter::{Format, Workbook};

    #[test]
    fn reads_typed_cells_from_first_sheet() {
        let p = std::env::temp_dir().join(format!("officedesk_xlsx_{}.xlsx", std::process::id()));

        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Customer").unwrap();
        ws.write_string(1, 0, "Acme").unwrap();
        ws.write_string(1, 1, "Ε1").unwrap();
        let date_fmt = Format::new().set_num_format("yyyy-mm-dd");
        ws.write_number_with_format(1, 2, 45296.0, &date_fmt).unwrap();
        ws.write_number(1, 3, 62.0).unwrap();
        ws.write_string(1, 4, "Πληρώθηκε").unwrap();
        ws.write_string(3, 0, "Second").unwrap();
        wb.save(&p).unwrap();

        let rows = read(&p).unwrap();
        std::fs::remove_file(&p).ok();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[0].cell(0), &Cell::Text("Acme".into()));
        assert_eq!(
            rows[0].cell(2),
            &Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(rows[0].cell(3), &Cell::Number(62.0));
        assert_eq!(rows[0].cell(5), &Cell::Empty);
        assert!(rows[1].is_blank());
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[2].row, 4);
    }
}
