// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{get_headers, transaction_to_row};
use crate::export::{TransactionExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Money columns keep two decimals even when they parse as numbers.
const MONEY_COLUMNS: [usize; 2] = [5, 6];

/// Export XLSX con styling e auto-larghezza colonne.
pub(crate) fn export_xlsx(items: &[TransactionExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // ---------------------------
    // Empty dataset
    // ---------------------------
    if items.is_empty() {
        worksheet.write(0, 0, "No data available")?;
        workbook.save(path_str(path)?)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, item) in items.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        let values = transaction_to_row(item);

        for (col, value) in values.iter().enumerate() {
            let v = value.as_str();

            // id and free text stay text; only dates and money are typed
            let kind = match col {
                1 => CellKind::Date,
                c if MONEY_COLUMNS.contains(&c) => CellKind::Money,
                _ => CellKind::Text,
            };
            write_xlsx_cell(worksheet, row, col as u16, v, band_color, kind)?;

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path_str(path)?)?;

    notify_export_success("XLSX", path);
    Ok(())
}

#[derive(Clone, Copy)]
enum CellKind {
    Date,
    Money,
    Text,
}

fn band_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Write one cell, typed as an Excel date or number when the column allows it.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    kind: CellKind,
) -> AppResult<()> {
    match kind {
        CellKind::Date => {
            if let Some((num_format, serial)) = parse_to_excel_date(s) {
                let fmt = band_format(bg).set_num_format(num_format);
                worksheet.write_with_format(row, col, serial, &fmt)?;
                return Ok(());
            }
        }
        CellKind::Money => {
            if let Ok(num) = s.parse::<f64>() {
                let fmt = band_format(bg)
                    .set_num_format("0.00")
                    .set_align(FormatAlign::Right);
                worksheet.write_with_format(row, col, num, &fmt)?;
                return Ok(());
            }
        }
        CellKind::Text => {}
    }

    worksheet.write_with_format(row, col, s, &band_format(bg))?;
    Ok(())
}

pub(crate) fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};

    #[test]
    fn writes_header_and_typed_cells() {
        let path = std::env::temp_dir().join("officedesk_export_unit.xlsx");
        let items = vec![TransactionExport {
            id: 3,
            date: "2024-01-05".into(),
            customer: "Maria".into(),
            service: "Consulting".into(),
            notes: "n".into(),
            cost_pre_vat: 50.0,
            cost_final: 62.0,
            status: "Pending".into(),
        }];
        export_xlsx(&items, &path).unwrap();

        let mut wb: Xlsx<_> = open_workbook(&path).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.get_value((0, 2)), Some(&Data::String("customer".into())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("3".into())));
        assert_eq!(range.get_value((1, 6)), Some(&Data::Float(62.0)));
        assert!(matches!(range.get_value((1, 1)), Some(Data::DateTime(_)) | Some(Data::Float(_))));
        std::fs::remove_file(&path).ok();
    }
}
