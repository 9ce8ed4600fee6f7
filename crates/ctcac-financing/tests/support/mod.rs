#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

pub const COL_A: u16 = 0;
pub const COL_B: u16 = 1;
pub const COL_D: u16 = 3;
pub const COL_G: u16 = 6;
pub const COL_L: u16 = 11;
pub const COL_AG: u16 = 32;

/// Row `n` in A1 terms.
pub fn row(n: u32) -> u32 {
    n - 1
}

/// Writes the Construction Interest & Fees block starting at `header_row`.
pub fn write_construction_section(
    sheet: &mut Worksheet,
    header_row: u32,
    amounts: [f64; 10],
    other_label: &str,
) -> Result<(), XlsxError> {
    let labels = [
        "Construction Loan Interest",
        "Origination Fee",
        "Credit Enhancement/Application Fee",
        "Bond Premium",
        "Cost of Issuance",
        "Title & Recording",
        "Taxes",
        "Insurance",
        other_label,
        "Total Construction Interest & Fees",
    ];
    sheet.write_string(row(header_row), COL_A, "CONSTRUCTION INTEREST & FEES")?;
    for (offset, (label, amount)) in labels.iter().zip(amounts).enumerate() {
        let r = row(header_row) + 1 + offset as u32;
        sheet.write_string(r, COL_A, *label)?;
        sheet.write_number(r, COL_B, amount)?;
    }
    Ok(())
}

/// Writes the Permanent Financing block starting at `header_row`.
pub fn write_permanent_section(
    sheet: &mut Worksheet,
    header_row: u32,
    amounts: [f64; 7],
    other_label: &str,
) -> Result<(), XlsxError> {
    let labels = [
        "Loan Origination Fee",
        "Credit Enhancement/Application Fee",
        "Title & Recording",
        "Taxes",
        "Insurance",
        other_label,
        "Total Permanent Financing Costs",
    ];
    sheet.write_string(row(header_row), COL_A, "PERMANENT FINANCING")?;
    for (offset, (label, amount)) in labels.iter().zip(amounts).enumerate() {
        let r = row(header_row) + 1 + offset as u32;
        sheet.write_string(r, COL_A, *label)?;
        sheet.write_number(r, COL_B, amount)?;
    }
    Ok(())
}

/// The minimal workbook: a budget sheet holding only the construction
/// section with loan interest and origination fee.
pub fn write_minimal_application(path: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Sources and Uses Budget")
        .expect("sheet name");
    write_construction_section(
        sheet,
        3,
        [
            100_000.0, 5_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 105_000.0,
        ],
        "Other",
    )
    .expect("construction section");
    workbook.save(path).expect("save workbook");
    path.to_path_buf()
}
