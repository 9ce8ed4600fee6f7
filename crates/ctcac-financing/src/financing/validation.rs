use super::domain::{ApplicationData, CostSection};

pub const MISSING_UNITS: &str = "Total units not found";
pub const MISSING_SQUARE_FEET: &str = "Total square footage not found";
pub const MISSING_NEW_CONSTRUCTION: &str = "New Construction total not found (using fallback)";

impl ApplicationData {
    /// Recomputes section sums and flags missing project metrics.
    ///
    /// Both lists are rebuilt from scratch; nothing here fails.
    pub fn validate(&mut self) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_section(&self.construction_interest_fees, &mut errors);
        check_section(&self.permanent_financing, &mut errors);

        if self.total_units.is_none() {
            warnings.push(MISSING_UNITS.to_string());
        }
        if self.total_square_feet.is_none() {
            warnings.push(MISSING_SQUARE_FEET.to_string());
        }
        if self.new_construction_total.is_none() {
            warnings.push(MISSING_NEW_CONSTRUCTION.to_string());
        }

        self.validation_errors = errors;
        self.validation_warnings = warnings;
    }
}

fn check_section<S: CostSection>(section: &S, errors: &mut Vec<String>) {
    if let Err(message) = section.is_valid() {
        errors.push(format!("{}: {}", S::LABEL, message));
    }
}
