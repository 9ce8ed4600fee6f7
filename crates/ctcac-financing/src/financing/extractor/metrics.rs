use tracing::debug;

use super::grid::{Grid, MatchMode, COLUMN_A, COLUMN_AG, COLUMN_B, COLUMN_D, COLUMN_G, COLUMN_L};

const NEW_CONSTRUCTION_TOTAL_LABEL: &str = "total new construction costs";
/// Rows at the top of the budget scanned for the new construction total.
const NEW_CONSTRUCTION_SCAN_ROWS: u32 = 99;
const NEW_CONSTRUCTION_HEADER: &str = "NEW CONSTRUCTION";
/// Rows below the new construction heading searched for its total.
const NEW_CONSTRUCTION_FALLBACK_WINDOW: u32 = 19;

const UNITS_LABEL: &str = "total number of units";
const UNITS_EXCLUDED_VARIANT: &str = "excluding managers";
const SQUARE_FEET_LABEL: &str = "total square footage of all project structures";

const METRIC_LABEL_COLUMNS: [u32; 2] = [COLUMN_D, COLUMN_G];
/// Value columns in priority order.
const METRIC_VALUE_COLUMNS: [u32; 2] = [COLUMN_AG, COLUMN_L];

/// Unit count and square footage from the Application tab.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectMetrics {
    pub total_units: Option<u32>,
    pub total_square_feet: Option<f64>,
}

/// Reported new construction cost from the Sources & Uses budget.
pub fn new_construction_total(grid: &Grid) -> Option<f64> {
    let last_row = grid.max_row().min(NEW_CONSTRUCTION_SCAN_ROWS);
    for row in 1..=last_row {
        let label = grid.cell(row, COLUMN_A).text().to_lowercase();
        if label.contains(NEW_CONSTRUCTION_TOTAL_LABEL) {
            let value = grid.number_at(row, COLUMN_B);
            if value > 0.0 {
                return Some(value);
            }
        }
    }

    let (heading_row, _) = grid.find_label(NEW_CONSTRUCTION_HEADER, MatchMode::Contains)?;
    debug!(heading_row, "falling back to new construction heading");
    (1..=NEW_CONSTRUCTION_FALLBACK_WINDOW)
        .map(|offset| heading_row + offset)
        .filter(|row| {
            let label = grid.cell(*row, COLUMN_A).text().to_lowercase();
            label.contains("total") && label.contains("construction")
        })
        .map(|row| grid.number_at(row, COLUMN_B))
        .find(|value| *value > 0.0)
}

pub fn project_metrics(grid: &Grid) -> ProjectMetrics {
    let total_units = first_positive_metric(grid, |label| {
        label.contains(UNITS_LABEL) && !label.contains(UNITS_EXCLUDED_VARIANT)
    })
    .map(|units| units as u32);

    let total_square_feet = first_positive_metric(grid, |label| label.contains(SQUARE_FEET_LABEL));

    ProjectMetrics {
        total_units,
        total_square_feet,
    }
}

/// Returns the first positive value beside a matching label. A label whose
/// value columns are all blank or zero does not stop the search.
fn first_positive_metric<F>(grid: &Grid, matches: F) -> Option<f64>
where
    F: Fn(&str) -> bool,
{
    for row in 1..=grid.max_row() {
        for label_col in METRIC_LABEL_COLUMNS {
            let label = grid.cell(row, label_col).text().to_lowercase();
            if label.is_empty() || !matches(&label) {
                continue;
            }
            let value = METRIC_VALUE_COLUMNS
                .iter()
                .map(|col| grid.number_at(row, *col))
                .find(|value| *value > 0.0);
            if value.is_some() {
                return value;
            }
        }
    }
    None
}
