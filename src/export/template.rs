// src/export/template.rs

use crate::errors::AppResult;
use crate::export::xlsx::path_str;
use crate::i18n::Labels;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Write the empty import template: one bold header row in import column order.
pub fn write_import_template(path: &Path, labels: &Labels) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(labels.template_sheet)?;

    let bold = Format::new().set_bold();

    for (col, header) in labels.template_headers.iter().enumerate() {
        let col = col as u16;
        worksheet.write_with_format(0, col, *header, &bold)?;
        worksheet.set_column_width(col, (UnicodeWidthStr::width(*header) + 5) as f64)?;
    }

    workbook.save(path_str(path)?)?;
    Ok(())
}
