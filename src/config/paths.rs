//! Where settings and named reports live
//!
//! The base directory is `BUDGET_REPORT_DATA_DIR` when set. Otherwise it is
//! `budget-report` under `$XDG_CONFIG_HOME` (falling back to `~/.config`), or
//! under `%APPDATA%` on Windows.

use std::path::{Path, PathBuf};

use crate::error::BudgetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_REPORT_DATA_DIR";

/// Extension given to report files saved under a bare name
pub const REPORT_EXTENSION: &str = "csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPaths {
    base_dir: PathBuf,
    reports_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => default_base_dir()?,
        };
        Ok(Self::with_base_dir(base_dir))
    }

    /// Paths rooted at `base_dir`, with reports in its `reports` subdirectory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        let reports_dir = base_dir.join("reports");
        Self {
            base_dir,
            reports_dir,
        }
    }

    /// Keep named reports in `reports_dir` instead
    pub fn with_reports_dir(self, reports_dir: PathBuf) -> Self {
        Self {
            reports_dir,
            ..self
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// File holding the report saved as `name`, e.g. `<reports>/january.csv`
    pub fn report_file(&self, name: &str) -> PathBuf {
        self.reports_dir.join(format!("{}.{}", name, REPORT_EXTENSION))
    }

    /// Create the base and reports directories
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        for dir in [&self.base_dir, &self.reports_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                BudgetError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Whether `budget init` has written a settings file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn default_base_dir() -> Result<PathBuf, BudgetError> {
    let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .ok_or_else(|| BudgetError::Config("Could not determine HOME directory".into()))?,
    };
    Ok(config_home.join("budget-report"))
}

#[cfg(windows)]
fn default_base_dir() -> Result<PathBuf, BudgetError> {
    std::env::var_os("APPDATA")
        .map(|appdata| PathBuf::from(appdata).join("budget-report"))
        .ok_or_else(|| BudgetError::Config("Could not determine APPDATA directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.reports_dir(), temp_dir.path().join("reports"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_report_file() {
        let paths = BudgetPaths::with_base_dir(PathBuf::from("/data"));
        assert_eq!(
            paths.report_file("january"),
            PathBuf::from("/data/reports/january.csv")
        );

        let moved = paths.with_reports_dir(PathBuf::from("/shared"));
        assert_eq!(moved.report_file("q1.2025"), PathBuf::from("/shared/q1.2025.csv"));
        assert_eq!(moved.settings_file(), PathBuf::from("/data/config.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = BudgetPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().join("nested"))
            .with_reports_dir(temp_dir.path().join("elsewhere"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(temp_dir.path().join("elsewhere").exists());
    }
}
