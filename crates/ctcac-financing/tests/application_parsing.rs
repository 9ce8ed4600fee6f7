mod support;

use std::fs;

use calamine::{open_workbook_auto, Data, Reader};
use ctcac_financing::financing::report::{SUMMARY_COLUMNS, SUMMARY_SHEET};
use ctcac_financing::financing::{
    parse, parse_applications, write_summary, ConstructionInterestFees, ExtractError,
    MISSING_NEW_CONSTRUCTION, MISSING_SQUARE_FEET, MISSING_UNITS,
};
use rust_xlsxwriter::Workbook;
use support::*;

#[test]
fn minimal_budget_parses_without_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_minimal_application(&dir.path().join("CA-25-401.xlsx"));

    let app = parse(&path).expect("workbook parses");

    assert_eq!(app.application_name, "CA-25-401");
    assert_eq!(app.file_path, path);
    assert_eq!(app.construction_interest_fees.construction_loan_interest, 100_000.0);
    assert_eq!(app.construction_interest_fees.origination_fee, 5_000.0);
    assert_eq!(app.construction_interest_fees.other_description, "Other");
    assert_eq!(app.construction_interest_fees.total, 105_000.0);
    assert_eq!(app.permanent_financing.total, 0.0);
    assert!(app.validation_errors.is_empty());
    assert_eq!(app.combined_financing_costs(), 105_000.0);
    assert_eq!(
        app.validation_warnings,
        vec![MISSING_UNITS, MISSING_SQUARE_FEET, MISSING_NEW_CONSTRUCTION]
    );
}

#[test]
fn full_application_yields_metrics_and_flags_mismatches() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("CA-25-455.xlsx");

    let mut workbook = Workbook::new();
    {
        let checklist = workbook.add_worksheet();
        checklist.set_name("Checklist").expect("sheet name");
        checklist
            .write_string(0, 0, "Total number of units")
            .expect("write");
    }
    {
        let budget = workbook.add_worksheet();
        budget.set_name("Sources & Uses Budget").expect("sheet name");
        budget
            .write_string(row(2), COL_A, "NEW CONSTRUCTION")
            .expect("write");
        budget
            .write_string(row(8), COL_A, "Total New Construction Costs")
            .expect("write");
        budget
            .write_number(row(8), COL_B, 2_240_000.0)
            .expect("write");
        write_construction_section(
            budget,
            20,
            [
                400_000.0, 50_000.0, 10_000.0, 0.0, 25_000.0, 5_000.0, 2_000.0, 8_000.0, 0.0,
                500_000.0,
            ],
            "Other:",
        )
        .expect("construction");
        write_permanent_section(
            budget,
            40,
            [60_000.0, 0.0, 4_000.0, 0.0, 0.0, 1_500.0, 60_000.0],
            "Bond counsel",
        )
        .expect("permanent");
        budget
            .write_string(row(41), COL_B, "$60,000.00")
            .expect("write");
    }
    {
        let application = workbook.add_worksheet();
        application.set_name("Application").expect("sheet name");
        application
            .write_string(row(30), COL_D, "Total number of units excluding managers units")
            .expect("write");
        application.write_number(row(30), COL_AG, 99.0).expect("write");
        application
            .write_string(row(31), COL_D, "Total Number of Units:")
            .expect("write");
        application.write_number(row(31), COL_AG, 100.0).expect("write");
        application
            .write_string(row(45), COL_G, "Total square footage of all project structures")
            .expect("write");
        application.write_number(row(45), COL_L, 80_000.0).expect("write");
    }
    workbook.save(&path).expect("save workbook");

    let app = parse(&path).expect("workbook parses");

    assert_eq!(app.total_units, Some(100));
    assert_eq!(app.total_square_feet, Some(80_000.0));
    assert_eq!(app.new_construction_total, Some(2_240_000.0));
    assert!(app.validation_warnings.is_empty());

    assert_eq!(app.permanent_financing.loan_origination_fee, 60_000.0);
    assert_eq!(app.permanent_financing.other_description, "Bond counsel");
    assert_eq!(app.permanent_financing.other_amount, 1_500.0);
    assert_eq!(
        app.validation_errors,
        vec!["Permanent Financing: Total (60,000.00) does not match sum of line items (65,500.00)"]
    );

    assert_eq!(app.combined_financing_costs(), 560_000.0);
    assert_eq!(app.financing_costs_per_unit(), Some(5_600.0));
    assert_eq!(app.financing_costs_per_sf(), Some(7.0));
    assert_eq!(app.financing_costs_pct_hard_costs(), Some(25.0));
}

#[test]
fn budget_without_section_headers_reads_as_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("CA-25-470.xlsx");

    let mut workbook = Workbook::new();
    let budget = workbook.add_worksheet();
    budget.set_name("sources and uses").expect("sheet name");
    budget.write_string(0, 0, "Land Cost").expect("write");
    budget.write_number(0, 1, 1_000_000.0).expect("write");
    workbook.save(&path).expect("save workbook");

    let app = parse(&path).expect("workbook parses");
    assert_eq!(
        app.construction_interest_fees,
        ConstructionInterestFees::default()
    );
    assert_eq!(app.permanent_financing.total, 0.0);
    assert!(app.validation_errors.is_empty());
}

#[test]
fn workbook_without_budget_sheet_is_a_load_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("CA-25-480.xlsx");

    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .set_name("Application")
        .expect("sheet name");
    workbook.save(&path).expect("save workbook");

    match parse(&path).expect_err("missing sheet rejected") {
        ExtractError::MissingSourcesSheet { path: reported } => assert_eq!(reported, path),
        other => panic!("expected missing sheet error, got {other:?}"),
    }
}

#[test]
fn batch_skips_unreadable_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = write_minimal_application(&dir.path().join("CA-25-401.xlsx"));
    let corrupt = dir.path().join("CA-25-402.xlsx");
    fs::write(&corrupt, b"<html>not a workbook</html>").expect("write corrupt file");
    let missing = dir.path().join("CA-25-403.xlsx");

    let applications = parse_applications(&[corrupt, good, missing]);

    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].application_name, "CA-25-401");
}

#[test]
fn summary_workbook_has_one_row_per_application() {
    let dir = tempfile::tempdir().expect("temp dir");
    let first = write_minimal_application(&dir.path().join("CA-25-401.xlsx"));
    let second = write_minimal_application(&dir.path().join("CA-25-402.xlsx"));
    let applications = parse_applications(&[first, second]);

    let output = dir.path().join("financing_costs_summary.xlsx");
    fs::write(&output, b"stale").expect("seed stale output");
    write_summary(&applications, &output).expect("summary written");

    let mut workbook = open_workbook_auto(&output).expect("summary opens");
    assert_eq!(workbook.sheet_names(), vec![SUMMARY_SHEET.to_string()]);
    let range = workbook
        .worksheet_range(SUMMARY_SHEET)
        .expect("summary sheet");

    assert_eq!(range.get_size(), (3, SUMMARY_COLUMNS.len()));
    let headers: Vec<String> = (0..SUMMARY_COLUMNS.len())
        .map(|col| range.get((0, col)).expect("header").to_string())
        .collect();
    assert_eq!(headers, SUMMARY_COLUMNS);

    let combined = SUMMARY_COLUMNS
        .iter()
        .position(|header| *header == "Combined Financing Costs")
        .expect("combined column");
    assert_eq!(range.get((1, 0)), Some(&Data::String("CA-25-401".to_string())));
    assert_eq!(range.get((2, combined)), Some(&Data::Float(105_000.0)));

    let per_unit = SUMMARY_COLUMNS
        .iter()
        .position(|header| *header == "Financing Costs per Unit")
        .expect("per unit column");
    assert_eq!(range.get((1, per_unit)), Some(&Data::Empty));
}
