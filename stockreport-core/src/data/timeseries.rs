//! Financial statements from Yahoo's fundamentals-timeseries endpoint.
//!
//! The endpoint takes a list of `{annual|quarterly}{LineItem}` keys and
//! returns one result object per key. Keys with no data points come back
//! empty and are dropped from the table.

use super::provider::DataError;
use crate::domain::{line_item_display_name, Periodicity, StatementKind, StatementTable};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Earliest period requested from the timeseries endpoint (1985-08-22 UTC).
pub const TIMESERIES_PERIOD_START: i64 = 493_590_046;

const INCOME_KEYS: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "SellingGeneralAndAdministration",
    "ResearchAndDevelopment",
    "OperatingIncome",
    "InterestExpense",
    "PretaxIncome",
    "TaxProvision",
    "NetIncome",
    "NetIncomeCommonStockholders",
    "BasicEPS",
    "DilutedEPS",
    "BasicAverageShares",
    "DilutedAverageShares",
    "TotalExpenses",
    "NormalizedIncome",
    "EBIT",
    "EBITDA",
];

const BALANCE_SHEET_KEYS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
    "Receivables",
    "Inventory",
    "NetPPE",
    "Goodwill",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "AccountsPayable",
    "CurrentDebt",
    "LongTermDebt",
    "TotalDebt",
    "NetDebt",
    "StockholdersEquity",
    "RetainedEarnings",
    "WorkingCapital",
    "TangibleBookValue",
    "ShareIssued",
    "OrdinarySharesNumber",
];

const CASH_FLOW_KEYS: &[&str] = &[
    "OperatingCashFlow",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "FreeCashFlow",
    "CapitalExpenditure",
    "DepreciationAndAmortization",
    "StockBasedCompensation",
    "ChangeInWorkingCapital",
    "CashDividendsPaid",
    "RepurchaseOfCapitalStock",
    "IssuanceOfDebt",
    "RepaymentOfDebt",
    "BeginningCashPosition",
    "EndCashPosition",
    "ChangesInCash",
];

/// Line-item keys requested for a statement, in display order.
pub fn statement_keys(kind: StatementKind) -> &'static [&'static str] {
    match kind {
        StatementKind::Income => INCOME_KEYS,
        StatementKind::BalanceSheet => BALANCE_SHEET_KEYS,
        StatementKind::CashFlow => CASH_FLOW_KEYS,
    }
}

/// The `type` query parameter: comma-separated prefixed keys.
pub fn timeseries_types(kind: StatementKind, periodicity: Periodicity) -> String {
    let prefix = periodicity.key_prefix();
    statement_keys(kind)
        .iter()
        .map(|k| format!("{prefix}{k}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build a statement table from a timeseries response body.
///
/// Periods are the union of every item's `asOfDate`, newest first. A
/// response with an empty result list is an empty table.
pub fn parse_timeseries(
    body: &Value,
    kind: StatementKind,
    periodicity: Periodicity,
) -> Result<StatementTable, DataError> {
    let results: &[Value] = match body.pointer("/timeseries/result") {
        Some(Value::Array(results)) => results.as_slice(),
        Some(Value::Null) | None => {
            if let Some(err) = body.pointer("/timeseries/error").filter(|e| !e.is_null()) {
                return Err(DataError::ResponseFormatChanged(format!(
                    "timeseries error: {err}"
                )));
            }
            &[]
        }
        Some(other) => {
            return Err(DataError::ResponseFormatChanged(format!(
                "timeseries result is not an array: {other}"
            )))
        }
    };

    let prefix = periodicity.key_prefix();
    let mut rows: HashMap<&str, BTreeMap<NaiveDate, f64>> = HashMap::new();

    for entry in results {
        let Some(ty) = entry.pointer("/meta/type/0").and_then(Value::as_str) else {
            continue;
        };
        let Some(points) = entry.get(ty).and_then(Value::as_array) else {
            continue;
        };

        let mut series = BTreeMap::new();
        for point in points.iter().filter(|p| !p.is_null()) {
            let date = point
                .get("asOfDate")
                .and_then(Value::as_str)
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
            let value = point.pointer("/reportedValue/raw").and_then(Value::as_f64);
            if let (Some(date), Some(value)) = (date, value) {
                series.insert(date, value);
            }
        }

        if !series.is_empty() {
            rows.insert(ty.strip_prefix(prefix).unwrap_or(ty), series);
        }
    }

    let periods: BTreeSet<NaiveDate> = rows.values().flat_map(|s| s.keys().copied()).collect();
    let periods: Vec<NaiveDate> = periods.into_iter().rev().collect();

    let mut table = StatementTable::new(periods);
    for key in statement_keys(kind) {
        if let Some(series) = rows.get(key) {
            let values = table
                .periods()
                .iter()
                .map(|p| series.get(p).copied())
                .collect();
            table.push_item(line_item_display_name(key), values);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(date: &str, raw: f64) -> Value {
        json!({
            "asOfDate": date,
            "periodType": "3M",
            "currencyCode": "USD",
            "reportedValue": { "raw": raw, "fmt": "x" }
        })
    }

    #[test]
    fn period_start_date() {
        let start = chrono::DateTime::<chrono::Utc>::from_timestamp(TIMESERIES_PERIOD_START, 0).unwrap();
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(1985, 8, 22).unwrap());
    }

    #[test]
    fn types_are_prefixed() {
        let types = timeseries_types(StatementKind::Income, Periodicity::Quarterly);
        assert!(types.starts_with("quarterlyTotalRevenue,quarterlyOperatingRevenue"));
    }

    #[test]
    fn parses_and_aligns_periods() {
        let body = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["quarterlyNetIncome"] },
                        "timestamp": [1, 2],
                        "quarterlyNetIncome": [point("2024-03-31", 5.0), null]
                    },
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["quarterlyTotalRevenue"] },
                        "timestamp": [1, 2],
                        "quarterlyTotalRevenue": [point("2023-12-31", 10.0), point("2024-03-31", 12.0)]
                    },
                    {
                        "meta": { "symbol": ["AAPL"], "type": ["quarterlyEBITDA"] }
                    }
                ],
                "error": null
            }
        });

        let table = parse_timeseries(&body, StatementKind::Income, Periodicity::Quarterly).unwrap();
        assert_eq!(
            table.periods(),
            &[
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
            ]
        );
        let names: Vec<&str> = table.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Total Revenue", "Net Income"]);
        assert_eq!(table.row("Net Income").unwrap().values, vec![Some(5.0), None]);
        assert_eq!(
            table.row("Total Revenue").unwrap().values,
            vec![Some(12.0), Some(10.0)]
        );
    }

    #[test]
    fn empty_result_is_empty_table() {
        let body = json!({ "timeseries": { "result": [], "error": null } });
        let table = parse_timeseries(&body, StatementKind::CashFlow, Periodicity::Annual).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn error_body_is_format_error() {
        let body = json!({ "timeseries": { "result": null, "error": { "code": "Bad Request" } } });
        let err = parse_timeseries(&body, StatementKind::CashFlow, Periodicity::Annual).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }
}
