//! Financial statement tables.
//!
//! A statement is a grid of line items (rows) by reporting periods (columns).
//! Providers may legitimately have nothing for a statement, and a fetch may
//! fail outright; [`Statement`] keeps those two cases apart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the three statements a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Income => "income statement",
            StatementKind::BalanceSheet => "balance sheet",
            StatementKind::CashFlow => "cash flow",
        };
        f.write_str(name)
    }
}

/// Reporting periodicity of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    Annual,
    Quarterly,
}

impl Periodicity {
    /// Prefix the provider uses on its timeseries keys.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Periodicity::Annual => "annual",
            Periodicity::Quarterly => "quarterly",
        }
    }
}

/// One line item of a statement: a name plus one value per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Line items × periods. Periods are ordered newest first.
///
/// Every line item has exactly `periods.len()` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    periods: Vec<NaiveDate>,
    items: Vec<LineItem>,
}

impl StatementTable {
    pub fn new(periods: Vec<NaiveDate>) -> Self {
        Self {
            periods,
            items: Vec::new(),
        }
    }

    /// Append a line item. Values are padded or truncated to the period count.
    pub fn push_item(&mut self, name: impl Into<String>, mut values: Vec<Option<f64>>) {
        values.resize(self.periods.len(), None);
        self.items.push(LineItem {
            name: name.into(),
            values,
        });
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by its display name.
    pub fn row(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() || self.periods.is_empty()
    }
}

/// A fetched statement: either the provider's table (possibly empty) or
/// the reason it could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Available(StatementTable),
    Unavailable { reason: String },
}

impl Statement {
    pub fn empty() -> Self {
        Statement::Available(StatementTable::default())
    }

    /// The table, if the fetch succeeded and produced data.
    pub fn table(&self) -> Option<&StatementTable> {
        match self {
            Statement::Available(table) if !table.is_empty() => Some(table),
            _ => None,
        }
    }

    /// Empty for report purposes: unavailable statements count as empty.
    pub fn is_empty(&self) -> bool {
        self.table().is_none()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Statement::Unavailable { .. })
    }
}

impl Default for Statement {
    fn default() -> Self {
        Self::empty()
    }
}

/// Turn a provider key like `TotalRevenue` into `Total Revenue`.
///
/// Runs of capitals stay together (`EBITDA`, `NetPPE` → `Net PPE`).
pub fn line_item_display_name(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn push_item_pads_to_period_count() {
        let mut table = StatementTable::new(vec![d(2024, 6, 30), d(2024, 3, 31)]);
        table.push_item("Total Revenue", vec![Some(1.0)]);
        assert_eq!(table.row("Total Revenue").unwrap().values, vec![Some(1.0), None]);
    }

    #[test]
    fn unavailable_counts_as_empty() {
        let stmt = Statement::Unavailable {
            reason: "HTTP 500".into(),
        };
        assert!(stmt.is_empty());
        assert!(stmt.is_unavailable());
        assert!(stmt.table().is_none());
    }

    #[test]
    fn available_without_items_is_empty_but_not_unavailable() {
        let stmt = Statement::Available(StatementTable::new(vec![d(2024, 3, 31)]));
        assert!(stmt.is_empty());
        assert!(!stmt.is_unavailable());
    }

    #[test]
    fn display_names() {
        assert_eq!(line_item_display_name("TotalRevenue"), "Total Revenue");
        assert_eq!(line_item_display_name("NetIncome"), "Net Income");
        assert_eq!(line_item_display_name("EBITDA"), "EBITDA");
        assert_eq!(line_item_display_name("NetPPE"), "Net PPE");
        assert_eq!(line_item_display_name("BasicEPS"), "Basic EPS");
    }
}
