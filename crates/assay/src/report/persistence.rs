//! Save and load reports as JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{AssayError, Result};

use super::Report;

impl Report {
    /// Save the report as pretty-printed JSON.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use assay::Report;
    /// # fn example(report: &Report) -> assay::Result<()> {
    /// report.save("sensors.eda.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AssayError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            AssayError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            AssayError::Persistence(format!("Failed to serialize report: {}", e))
        })?;

        Ok(())
    }

    /// Load a report saved with [`Report::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            AssayError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            AssayError::Persistence(format!(
                "Failed to parse report '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Default report location next to the data file.
///
/// # Example
///
/// ```
/// use assay::report::report_path;
///
/// let path = report_path("data/sensors.csv");
/// assert_eq!(path.to_string_lossy(), "data/sensors.eda.json");
/// ```
pub fn report_path(data_path: impl AsRef<Path>) -> PathBuf {
    let data_path = data_path.as_ref();
    let stem = data_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = data_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.eda.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path("data/sensors.csv").to_string_lossy(),
            "data/sensors.eda.json"
        );
        assert_eq!(report_path("gas.tsv").to_string_lossy(), "gas.eda.json");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Report::load("/nonexistent/sensors.eda.json").unwrap_err();
        assert!(matches!(err, AssayError::Persistence(_)));
    }
}
