//! Domain types for StockReport

pub mod bar;
pub mod info;
pub mod record;
pub mod statement;

pub use bar::Bar;
pub use info::{InfoMap, InfoValue};
pub use record::{CorporateActions, DatedValue, StatementSet, TickerRecord};
pub use statement::{
    line_item_display_name, LineItem, Periodicity, Statement, StatementKind, StatementTable,
};
