use crate::financing::domain::ApplicationData;

/// Average, median and range of one metric across applications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpread {
    pub average: f64,
    /// Upper median: the element at index `n / 2` of the sorted values.
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSpread {
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let count = values.len();
        Some(Self {
            average: values.iter().sum::<f64>() / count as f64,
            median: values[count / 2],
            min: values[0],
            max: values[count - 1],
        })
    }
}

/// Console roll-up of a batch. Cost figures only cover applications without
/// validation errors.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub parsed: usize,
    pub valid: usize,
    pub with_errors: usize,
    pub combined: Option<MetricSpread>,
    pub per_unit: Option<MetricSpread>,
    pub per_sf: Option<MetricSpread>,
}

impl SummaryStatistics {
    pub fn from_applications(applications: &[ApplicationData]) -> Self {
        let valid: Vec<&ApplicationData> =
            applications.iter().filter(|app| !app.has_errors()).collect();

        let combined: Vec<f64> = valid.iter().map(|app| app.combined_financing_costs()).collect();
        let per_unit = defined_non_zero(valid.iter().map(|app| app.financing_costs_per_unit()));
        let per_sf = defined_non_zero(valid.iter().map(|app| app.financing_costs_per_sf()));

        Self {
            parsed: applications.len(),
            valid: valid.len(),
            with_errors: applications.len() - valid.len(),
            combined: MetricSpread::from_values(combined),
            per_unit: MetricSpread::from_values(per_unit),
            per_sf: MetricSpread::from_values(per_sf),
        }
    }
}

fn defined_non_zero<I>(values: I) -> Vec<f64>
where
    I: Iterator<Item = Option<f64>>,
{
    values.flatten().filter(|value| *value != 0.0).collect()
}
