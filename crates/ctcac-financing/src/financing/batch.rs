use std::path::PathBuf;

use tracing::{error, info, warn};

use super::domain::ApplicationData;
use super::extractor;

/// Parses each workbook in turn. A file that cannot be loaded is logged and
/// left out; it never stops the rest of the batch.
pub fn parse_applications(paths: &[PathBuf]) -> Vec<ApplicationData> {
    let mut applications = Vec::with_capacity(paths.len());

    for path in paths {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(%file, "parsing application");

        match extractor::parse(path) {
            Ok(app) => {
                if !app.validation_errors.is_empty() {
                    warn!(%file, errors = %app.validation_errors.join(", "), "validation errors");
                }
                if !app.validation_warnings.is_empty() {
                    warn!(%file, warnings = %app.validation_warnings.join(", "), "validation warnings");
                }
                applications.push(app);
            }
            Err(err) => error!(%file, "skipping application: {err}"),
        }
    }

    applications
}
