use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use super::rows::{summary_row, SummaryCell, SUMMARY_COLUMNS};
use super::ReportError;
use crate::financing::domain::ApplicationData;

pub const SUMMARY_SHEET: &str = "Summary";
pub const MAX_COLUMN_WIDTH: usize = 50;
const COLUMN_PADDING: usize = 2;

/// Width for a column: its longest rendered value (header included) plus
/// padding, capped at [`MAX_COLUMN_WIDTH`].
pub fn column_width<'a, I>(header: &str, cells: I) -> usize
where
    I: IntoIterator<Item = &'a SummaryCell>,
{
    let longest = cells
        .into_iter()
        .map(SummaryCell::display_len)
        .fold(header.chars().count(), usize::max);
    (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH)
}

/// Writes the one-row-per-application summary workbook, replacing any
/// existing file at `path`.
pub fn write_summary(applications: &[ApplicationData], path: &Path) -> Result<(), ReportError> {
    let rows: Vec<Vec<SummaryCell>> = applications.iter().map(summary_row).collect();

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;

    for (col, header) in SUMMARY_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &header_format)?;

        let width = column_width(header, rows.iter().map(|row| &row[col as usize]));
        sheet.set_column_width(col, width as f64)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                SummaryCell::Text(text) if !text.is_empty() => {
                    sheet.write_string(excel_row, col, text)?;
                }
                SummaryCell::Number(value) => {
                    sheet.write_number(excel_row, col, *value)?;
                }
                SummaryCell::Text(_) | SummaryCell::Blank => {}
            }
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), rows = rows.len(), "summary report saved");
    Ok(())
}
