use crate::financing::domain::ApplicationData;

/// Summary sheet headers, in output order.
pub const SUMMARY_COLUMNS: [&str; 29] = [
    "Application Name",
    "Construction Loan Interest",
    "Origination Fee",
    "Credit Enhancement/Application Fee (Const)",
    "Bond Premium",
    "Cost of Issuance",
    "Title & Recording (Const)",
    "Taxes (Const)",
    "Insurance (Const)",
    "Other (Const)",
    "Other Description (Const)",
    "Total Construction Interest & Fees",
    "Loan Origination Fee",
    "Credit Enhancement/Application Fee (Perm)",
    "Title & Recording (Perm)",
    "Taxes (Perm)",
    "Insurance (Perm)",
    "Other (Perm)",
    "Other Description (Perm)",
    "Total Permanent Financing Costs",
    "Combined Financing Costs",
    "Total Units",
    "Total Square Feet",
    "New Construction Total",
    "Financing Costs per Unit",
    "Financing Costs per SF",
    "Financing Costs % of Hard Costs",
    "Validation Errors",
    "Validation Warnings",
];

const BLANK_TEXT: &str = "nan";

/// One value in the summary sheet. Undefined metrics are `Blank`.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryCell {
    Text(String),
    Number(f64),
    Blank,
}

impl SummaryCell {
    fn optional(value: Option<f64>) -> Self {
        value.map(SummaryCell::Number).unwrap_or(SummaryCell::Blank)
    }

    /// Length of the cell as displayed text, used for column sizing.
    /// Numbers always keep a fractional part (`105000.0`) and a blank
    /// counts as `nan`.
    pub fn display_len(&self) -> usize {
        match self {
            SummaryCell::Text(text) => text.chars().count(),
            SummaryCell::Number(value) => format!("{value:?}").len(),
            SummaryCell::Blank => BLANK_TEXT.len(),
        }
    }
}

/// Flattens an application into a row aligned with [`SUMMARY_COLUMNS`].
pub fn summary_row(app: &ApplicationData) -> Vec<SummaryCell> {
    use SummaryCell::{Number, Text};

    let construction = &app.construction_interest_fees;
    let permanent = &app.permanent_financing;

    vec![
        Text(app.application_name.clone()),
        Number(construction.construction_loan_interest),
        Number(construction.origination_fee),
        Number(construction.credit_enhancement_fee),
        Number(construction.bond_premium),
        Number(construction.cost_of_issuance),
        Number(construction.title_recording),
        Number(construction.taxes),
        Number(construction.insurance),
        Number(construction.other_amount),
        Text(construction.other_description.clone()),
        Number(construction.total),
        Number(permanent.loan_origination_fee),
        Number(permanent.credit_enhancement_fee),
        Number(permanent.title_recording),
        Number(permanent.taxes),
        Number(permanent.insurance),
        Number(permanent.other_amount),
        Text(permanent.other_description.clone()),
        Number(permanent.total),
        Number(app.combined_financing_costs()),
        SummaryCell::optional(app.total_units.map(f64::from)),
        SummaryCell::optional(app.total_square_feet),
        SummaryCell::optional(app.new_construction_total),
        SummaryCell::optional(app.financing_costs_per_unit()),
        SummaryCell::optional(app.financing_costs_per_sf()),
        SummaryCell::optional(app.financing_costs_pct_hard_costs()),
        Text(app.validation_errors.join("; ")),
        Text(app.validation_warnings.join("; ")),
    ]
}
