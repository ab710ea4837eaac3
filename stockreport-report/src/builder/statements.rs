//! Financial statement sheets: line items down, periods across.

use stockreport_core::domain::Statement;

use super::DATE_FORMAT;
use crate::sheet::{Cell, Sheet};

/// `None` when the statement is unavailable or has no line items.
pub fn build_statement(name: &str, statement: &Statement) -> Option<Sheet> {
    let table = statement.table()?;

    let header = std::iter::once(Cell::Blank).chain(
        table
            .periods()
            .iter()
            .map(|p| Cell::from(p.format(DATE_FORMAT).to_string())),
    );
    let mut sheet = Sheet::with_header(name, header);

    for item in table.items() {
        let row = std::iter::once(Cell::from(item.name.as_str()))
            .chain(item.values.iter().map(|v| Cell::from(*v)));
        sheet.push_row(row);
    }
    Some(sheet)
}
