//! Storage layer for budget reports
//!
//! Report files live wherever the caller points, with bare names resolved
//! into the configured reports directory. Writes are atomic.

pub mod file_io;

pub use file_io::{read_report_file, report_exists, save_report};

use std::path::{Path, PathBuf};

use crate::config::BudgetPaths;
use crate::error::BudgetResult;
use crate::report::Report;

/// Resolves report names to files and loads/saves them
#[derive(Debug, Clone)]
pub struct ReportStore {
    paths: BudgetPaths,
}

impl ReportStore {
    /// Create a store resolving bare names into `paths`' reports directory
    pub fn new(paths: BudgetPaths) -> Self {
        Self { paths }
    }

    pub fn reports_dir(&self) -> &Path {
        self.paths.reports_dir()
    }

    /// Resolve a report argument to a file path
    ///
    /// Anything that exists, has an extension, or names a directory component
    /// is used as given. Otherwise it is a bare name: `january` becomes
    /// `<reports_dir>/january.csv`.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        let is_bare_name = path.extension().is_none() && path.components().count() == 1;

        if path.exists() || !is_bare_name {
            path.to_path_buf()
        } else {
            self.paths.report_file(reference)
        }
    }

    /// Load the report at `reference`, named `name` or else after its file
    pub fn load(&self, reference: &str, name: Option<&str>) -> BudgetResult<Report> {
        let path = self.resolve(reference);
        let name = match name {
            Some(name) => name.to_string(),
            None => report_name_for(&path),
        };
        read_report_file(&name, &path)
    }

    /// Save `report` to `reference`, returning the path written
    pub fn save(&self, report: &Report, reference: &str) -> BudgetResult<PathBuf> {
        let path = self.resolve(reference);
        save_report(report, &path)?;
        Ok(path)
    }

    /// Whether `reference` resolves to an existing report file
    pub fn exists(&self, reference: &str) -> bool {
        report_exists(self.resolve(reference))
    }
}

/// Default report name for a file: its stem
pub fn report_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
