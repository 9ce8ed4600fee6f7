//! Fixed-order readers for the Sources & Uses cost sections.
//!
//! Source layouts are not self-describing. Each section is located by its
//! header label and its line items are then read from column B, one row per
//! item, in the order the application template prints them. Reads are
//! bounded to a window below the header so a short section cannot spill
//! into the next one; rows past the window read as zero.

use tracing::debug;

use super::grid::{Grid, MatchMode, COLUMN_A, COLUMN_B};
use crate::financing::domain::{ConstructionInterestFees, PermanentFinancing};

pub const CONSTRUCTION_HEADER: &str = "CONSTRUCTION INTEREST & FEES";
/// Rows below the construction header that may hold its line items.
pub const CONSTRUCTION_WINDOW: u32 = 20;

pub const PERMANENT_HEADER: &str = "PERMANENT FINANCING";
/// Rows below the permanent financing header that may hold its line items.
pub const PERMANENT_WINDOW: u32 = 15;

/// Walks the rows under a section header.
struct RowCursor<'a> {
    grid: &'a Grid,
    next_row: u32,
    last_row: u32,
}

impl<'a> RowCursor<'a> {
    fn below(grid: &'a Grid, header_row: u32, window: u32) -> Self {
        Self {
            grid,
            next_row: header_row + 1,
            last_row: header_row + window,
        }
    }

    fn take_row(&mut self) -> Option<u32> {
        if self.next_row > self.last_row {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(row)
    }

    fn amount(&mut self) -> f64 {
        self.take_row()
            .map(|row| self.grid.number_at(row, COLUMN_B))
            .unwrap_or(0.0)
    }

    /// The "other" row: its column A label is kept as the description,
    /// whatever it says.
    fn labelled_amount(&mut self) -> (String, f64) {
        match self.take_row() {
            Some(row) => (
                self.grid.text_at(row, COLUMN_A),
                self.grid.number_at(row, COLUMN_B),
            ),
            None => (String::new(), 0.0),
        }
    }
}

fn section_cursor<'a>(grid: &'a Grid, header: &str, window: u32) -> Option<RowCursor<'a>> {
    match grid.find_label(header, MatchMode::Contains) {
        Some((row, col)) => {
            debug!(header, row, col, "section header located");
            Some(RowCursor::below(grid, row, window))
        }
        None => {
            debug!(header, "section header not found");
            None
        }
    }
}

/// Row order: loan interest, origination fee, credit enhancement, bond
/// premium, cost of issuance, title & recording, taxes, insurance, other,
/// total.
pub fn construction_interest_fees(grid: &Grid) -> ConstructionInterestFees {
    let Some(mut rows) = section_cursor(grid, CONSTRUCTION_HEADER, CONSTRUCTION_WINDOW) else {
        return ConstructionInterestFees::default();
    };

    let construction_loan_interest = rows.amount();
    let origination_fee = rows.amount();
    let credit_enhancement_fee = rows.amount();
    let bond_premium = rows.amount();
    let cost_of_issuance = rows.amount();
    let title_recording = rows.amount();
    let taxes = rows.amount();
    let insurance = rows.amount();
    let (other_description, other_amount) = rows.labelled_amount();
    let total = rows.amount();

    ConstructionInterestFees {
        construction_loan_interest,
        origination_fee,
        credit_enhancement_fee,
        bond_premium,
        cost_of_issuance,
        title_recording,
        taxes,
        insurance,
        other_amount,
        other_description,
        total,
    }
}

/// Row order: loan origination fee, credit enhancement, title & recording,
/// taxes, insurance, other, total.
pub fn permanent_financing(grid: &Grid) -> PermanentFinancing {
    let Some(mut rows) = section_cursor(grid, PERMANENT_HEADER, PERMANENT_WINDOW) else {
        return PermanentFinancing::default();
    };

    let loan_origination_fee = rows.amount();
    let credit_enhancement_fee = rows.amount();
    let title_recording = rows.amount();
    let taxes = rows.amount();
    let insurance = rows.amount();
    let (other_description, other_amount) = rows.labelled_amount();
    let total = rows.amount();

    PermanentFinancing {
        loan_origination_fee,
        credit_enhancement_fee,
        title_recording,
        taxes,
        insurance,
        other_amount,
        other_description,
        total,
    }
}
