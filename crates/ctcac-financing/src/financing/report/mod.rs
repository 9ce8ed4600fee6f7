mod rows;
mod statistics;
mod writer;

pub use rows::{summary_row, SummaryCell, SUMMARY_COLUMNS};
pub use statistics::{MetricSpread, SummaryStatistics};
pub use writer::{column_width, write_summary, MAX_COLUMN_WIDTH, SUMMARY_SHEET};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unable to build summary workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
