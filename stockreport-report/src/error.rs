//! Report errors.

use stockreport_core::data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sheet '{0}' not found")]
    MissingSheet(String),

    #[error("column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error(transparent)]
    Data(#[from] DataError),
}
