//! CLI command implementations.

pub mod analyze;
pub mod insights;
pub mod summary;

use std::path::Path;

use assay::Report;

/// Load a saved report, pointing at `assay analyze` when it is missing.
pub(crate) fn load_report(path: &Path) -> Result<Report, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "Report not found: {}\nRun 'assay analyze <FILE>' first.",
            path.display()
        )
        .into());
    }
    Ok(Report::load(path)?)
}
