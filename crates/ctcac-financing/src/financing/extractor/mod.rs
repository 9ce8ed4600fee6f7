mod grid;
mod metrics;
mod sections;

pub use grid::{CellValue, Grid, MatchMode};
pub use metrics::{new_construction_total, project_metrics, ProjectMetrics};
pub use sections::{
    construction_interest_fees, permanent_financing, CONSTRUCTION_HEADER, CONSTRUCTION_WINDOW,
    PERMANENT_HEADER, PERMANENT_WINDOW,
};

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};
use tracing::debug;

use super::domain::ApplicationData;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("error loading workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("could not find a 'Sources & Uses Budget' sheet in {path}")]
    MissingSourcesSheet { path: PathBuf },
    #[error("error reading sheet '{sheet}' in {path}: {source}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// The worksheets an application is read from.
#[derive(Debug, Clone, Default)]
pub struct ApplicationWorkbook {
    /// The Sources & Uses budget.
    pub sources_uses: Grid,
    /// The Application tab, when present.
    pub application: Option<Grid>,
}

impl ApplicationWorkbook {
    pub fn new(sources_uses: Grid, application: Option<Grid>) -> Self {
        Self {
            sources_uses,
            application,
        }
    }

    /// Opens an `.xlsx`/`.xls` file using the cached results of formula
    /// cells.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let mut workbook = open_workbook_auto(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let (sources_name, application_name) = select_sheets(&workbook.sheet_names());
        let sources_name = sources_name.ok_or_else(|| ExtractError::MissingSourcesSheet {
            path: path.to_path_buf(),
        })?;
        debug!(sheet = %sources_name, application = ?application_name, "sheets selected");

        let mut read = |sheet: String| {
            workbook
                .worksheet_range(&sheet)
                .map(|range| Grid::from_range(&range))
                .map_err(|source| ExtractError::Sheet {
                    path: path.to_path_buf(),
                    sheet,
                    source,
                })
        };

        let sources_uses = read(sources_name)?;
        let application = application_name.map(&mut read).transpose()?;

        Ok(Self::new(sources_uses, application))
    }

    /// Runs every extraction and validates the result.
    pub fn extract(&self, path: &Path) -> ApplicationData {
        let metrics = self
            .application
            .as_ref()
            .map(project_metrics)
            .unwrap_or_default();

        let mut data = ApplicationData {
            application_name: application_name(path),
            file_path: path.to_path_buf(),
            construction_interest_fees: construction_interest_fees(&self.sources_uses),
            permanent_financing: permanent_financing(&self.sources_uses),
            total_units: metrics.total_units,
            total_square_feet: metrics.total_square_feet,
            new_construction_total: new_construction_total(&self.sources_uses),
            ..ApplicationData::default()
        };
        data.validate();
        data
    }
}

/// Picks the Sources & Uses sheet (the last name containing both words) and
/// the first sheet named exactly "application".
fn select_sheets(names: &[String]) -> (Option<String>, Option<String>) {
    let mut sources_uses = None;
    let mut application = None;

    for name in names {
        let lower = name.to_lowercase();
        if lower.contains("sources") && lower.contains("uses") {
            sources_uses = Some(name.clone());
        } else if lower == "application" && application.is_none() {
            application = Some(name.clone());
        }
    }

    (sources_uses, application)
}

fn application_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Loads, extracts and validates one application workbook.
pub fn parse(path: impl AsRef<Path>) -> Result<ApplicationData, ExtractError> {
    let path = path.as_ref();
    let workbook = ApplicationWorkbook::open(path)?;
    Ok(workbook.extract(path))
}
