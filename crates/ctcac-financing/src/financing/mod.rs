pub mod batch;
pub mod domain;
pub mod extractor;
pub mod report;
mod validation;

pub use batch::parse_applications;
pub use domain::{
    format_amount, ApplicationData, ConstructionInterestFees, CostSection, PermanentFinancing,
};
pub use extractor::{parse, ApplicationWorkbook, ExtractError};
pub use report::{write_summary, ReportError, SummaryStatistics};
pub use validation::{MISSING_NEW_CONSTRUCTION, MISSING_SQUARE_FEET, MISSING_UNITS};
