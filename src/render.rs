use ctcac_financing::financing::report::MetricSpread;
use ctcac_financing::financing::{format_amount, SummaryStatistics};
use std::path::Path;

const RULE_WIDTH: usize = 80;

pub(crate) fn print_missing_files_help(input_dir: &Path) {
    println!("No Excel files found.");
    println!("Options:");
    println!("  1. Run without --skip-download to download from the listing page");
    println!(
        "  2. Manually place Excel files in the '{}' directory",
        input_dir.display()
    );
}

pub(crate) fn print_statistics(stats: &SummaryStatistics) {
    for line in statistics_lines(stats) {
        println!("{line}");
    }
}

fn statistics_lines(stats: &SummaryStatistics) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "SUMMARY STATISTICS".to_string(),
        rule,
        format!("Total applications parsed: {}", stats.parsed),
        format!("Valid applications (no errors): {}", stats.valid),
        format!("Applications with errors: {}", stats.with_errors),
    ];

    if let Some(combined) = &stats.combined {
        lines.push(String::new());
        lines.push("Combined Financing Costs:".to_string());
        push_centre(&mut lines, combined);
        lines.push(format!("  Min: {}", dollars(combined.min)));
        lines.push(format!("  Max: {}", dollars(combined.max)));
    }

    for (title, spread) in [
        ("Financing Costs per Unit:", &stats.per_unit),
        ("Financing Costs per SF:", &stats.per_sf),
    ] {
        if let Some(spread) = spread {
            lines.push(String::new());
            lines.push(title.to_string());
            push_centre(&mut lines, spread);
        }
    }

    lines
}

fn push_centre(lines: &mut Vec<String>, spread: &MetricSpread) {
    lines.push(format!("  Average: {}", dollars(spread.average)));
    lines.push(format!("  Median: {}", dollars(spread.median)));
}

fn dollars(value: f64) -> String {
    format!("${}", format_amount(value))
}
