//! xlsx serialization of built sheets.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::ReportError;
use crate::sheet::{Cell, Sheet};

/// Write `sheets` to a new workbook at `path`, in order. Header rows are bold.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;
        for (row, col, cell) in sheet.cells() {
            let format = (sheet.has_header() && row == 0).then_some(&bold);
            write_cell(worksheet, row, col, cell, format)?;
        }
        tracing::debug!(sheet = sheet.name(), rows = sheet.row_count(), "sheet written");
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (cell, format) {
        (Cell::Text(s), None) => worksheet.write_string(row, col, s).map(drop),
        (Cell::Text(s), Some(f)) => worksheet.write_string_with_format(row, col, s, f).map(drop),
        (Cell::Number(n), None) => worksheet.write_number(row, col, *n).map(drop),
        (Cell::Number(n), Some(f)) => worksheet.write_number_with_format(row, col, *n, f).map(drop),
        (Cell::Bool(b), None) => worksheet.write_boolean(row, col, *b).map(drop),
        (Cell::Bool(b), Some(f)) => worksheet.write_boolean_with_format(row, col, *b, f).map(drop),
        (Cell::Blank, _) => Ok(()),
    }
}
