//! Company Info sheet: every metadata key in provider order.

use stockreport_core::domain::InfoMap;

use super::main_sheet::info_value_cell;
use super::COMPANY_INFO;
use crate::sheet::{Cell, Sheet};

/// `None` when the provider reported no metadata.
pub fn build_company_info(info: &InfoMap) -> Option<Sheet> {
    if info.is_empty() {
        return None;
    }
    let mut sheet = Sheet::with_header(COMPANY_INFO, ["Metric", "Value"]);
    for (key, value) in info.iter() {
        sheet.push_row([Cell::from(key), info_value_cell(value)]);
    }
    Some(sheet)
}
