use std::path::PathBuf;

/// Allowed gap between a reported section total and its recomputed sum.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// A group of dollar line items that closes with a reported total.
pub trait CostSection {
    /// Heading used to prefix validation errors.
    const LABEL: &'static str;

    fn line_items_sum(&self) -> f64;

    fn reported_total(&self) -> f64;

    /// Compares the reported total to the recomputed sum of line items.
    fn is_valid(&self) -> Result<(), String> {
        let line_sum = self.line_items_sum();
        let total = self.reported_total();
        if (total - line_sum).abs() > TOTAL_TOLERANCE {
            return Err(format!(
                "Total ({}) does not match sum of line items ({})",
                format_amount(total),
                format_amount(line_sum)
            ));
        }
        Ok(())
    }
}

/// Construction Interest & Fees section of the Sources & Uses budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructionInterestFees {
    pub construction_loan_interest: f64,
    pub origination_fee: f64,
    pub credit_enhancement_fee: f64,
    pub bond_premium: f64,
    pub cost_of_issuance: f64,
    pub title_recording: f64,
    pub taxes: f64,
    pub insurance: f64,
    pub other_amount: f64,
    pub other_description: String,
    pub total: f64,
}

impl CostSection for ConstructionInterestFees {
    const LABEL: &'static str = "Construction Interest & Fees";

    fn line_items_sum(&self) -> f64 {
        self.construction_loan_interest
            + self.origination_fee
            + self.credit_enhancement_fee
            + self.bond_premium
            + self.cost_of_issuance
            + self.title_recording
            + self.taxes
            + self.insurance
            + self.other_amount
    }

    fn reported_total(&self) -> f64 {
        self.total
    }
}

/// Permanent Financing section of the Sources & Uses budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermanentFinancing {
    pub loan_origination_fee: f64,
    pub credit_enhancement_fee: f64,
    pub title_recording: f64,
    pub taxes: f64,
    pub insurance: f64,
    pub other_amount: f64,
    pub other_description: String,
    pub total: f64,
}

impl CostSection for PermanentFinancing {
    const LABEL: &'static str = "Permanent Financing";

    fn line_items_sum(&self) -> f64 {
        self.loan_origination_fee
            + self.credit_enhancement_fee
            + self.title_recording
            + self.taxes
            + self.insurance
            + self.other_amount
    }

    fn reported_total(&self) -> f64 {
        self.total
    }
}

/// Everything extracted from one application workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationData {
    pub application_name: String,
    pub file_path: PathBuf,
    pub construction_interest_fees: ConstructionInterestFees,
    pub permanent_financing: PermanentFinancing,
    pub total_units: Option<u32>,
    pub total_square_feet: Option<f64>,
    /// Reported new construction cost, used as the hard-cost denominator.
    pub new_construction_total: Option<f64>,
    pub validation_errors: Vec<String>,
    pub validation_warnings: Vec<String>,
}

impl ApplicationData {
    pub fn combined_financing_costs(&self) -> f64 {
        self.construction_interest_fees.total + self.permanent_financing.total
    }

    pub fn financing_costs_per_unit(&self) -> Option<f64> {
        self.total_units
            .filter(|units| *units > 0)
            .map(|units| self.combined_financing_costs() / f64::from(units))
    }

    pub fn financing_costs_per_sf(&self) -> Option<f64> {
        positive(self.total_square_feet).map(|sf| self.combined_financing_costs() / sf)
    }

    pub fn financing_costs_pct_hard_costs(&self) -> Option<f64> {
        positive(self.new_construction_total)
            .map(|total| self.combined_financing_costs() / total * 100.0)
    }

    pub fn has_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Formats a dollar amount with thousands separators and two decimals,
/// e.g. `-1234567.891` becomes `-1,234,567.89`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && whole.chars().chain(cents.chars()).any(|c| c != '0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construction(interest: f64, origination: f64, total: f64) -> ConstructionInterestFees {
        ConstructionInterestFees {
            construction_loan_interest: interest,
            origination_fee: origination,
            total,
            ..ConstructionInterestFees::default()
        }
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(1234.56), "1,234.56");
        assert_eq!(format_amount(105000.0), "105,000.00");
        assert_eq!(format_amount(-1234567.891), "-1,234,567.89");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn section_within_tolerance_is_valid() {
        assert!(construction(100_000.0, 5_000.0, 105_000.0).is_valid().is_ok());
        assert!(construction(100_000.0, 5_000.0, 105_000.005).is_valid().is_ok());
    }

    #[test]
    fn section_outside_tolerance_reports_both_values() {
        let err = construction(100_000.0, 5_000.0, 105_000.5)
            .is_valid()
            .expect_err("mismatch detected");
        assert_eq!(
            err,
            "Total (105,000.50) does not match sum of line items (105,000.00)"
        );
    }

    #[test]
    fn permanent_sum_covers_every_line_item() {
        let section = PermanentFinancing {
            loan_origination_fee: 1.0,
            credit_enhancement_fee: 2.0,
            title_recording: 3.0,
            taxes: 4.0,
            insurance: 5.0,
            other_amount: 6.0,
            other_description: "Legal".to_string(),
            total: 21.0,
        };
        assert_eq!(section.line_items_sum(), 21.0);
        assert!(section.is_valid().is_ok());
    }

    #[test]
    fn combined_costs_add_both_totals() {
        let app = ApplicationData {
            construction_interest_fees: construction(0.0, 0.0, 250.0),
            permanent_financing: PermanentFinancing {
                total: 125.5,
                ..PermanentFinancing::default()
            },
            ..ApplicationData::default()
        };
        assert_eq!(app.combined_financing_costs(), 375.5);
        assert_eq!(ApplicationData::default().combined_financing_costs(), 0.0);
    }

    #[test]
    fn derived_metrics_are_undefined_without_positive_denominators() {
        let mut app = ApplicationData {
            construction_interest_fees: construction(0.0, 0.0, 1_000.0),
            ..ApplicationData::default()
        };
        assert_eq!(app.financing_costs_per_unit(), None);
        assert_eq!(app.financing_costs_per_sf(), None);
        assert_eq!(app.financing_costs_pct_hard_costs(), None);

        app.total_units = Some(0);
        app.total_square_feet = Some(-10.0);
        app.new_construction_total = Some(0.0);
        assert_eq!(app.financing_costs_per_unit(), None);
        assert_eq!(app.financing_costs_per_sf(), None);
        assert_eq!(app.financing_costs_pct_hard_costs(), None);
    }

    #[test]
    fn derived_metrics_divide_combined_costs() {
        let app = ApplicationData {
            construction_interest_fees: construction(0.0, 0.0, 1_000.0),
            total_units: Some(4),
            total_square_feet: Some(500.0),
            new_construction_total: Some(20_000.0),
            ..ApplicationData::default()
        };
        assert_eq!(app.financing_costs_per_unit(), Some(250.0));
        assert_eq!(app.financing_costs_per_sf(), Some(2.0));
        assert_eq!(app.financing_costs_pct_hard_costs(), Some(5.0));
    }
}
