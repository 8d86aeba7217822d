//! File I/O for report files with atomic writes
//!
//! Saving never leaves a half-written report behind: rows go to a temp file
//! next to the target, which is then renamed over it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::report::{load_report, Report};

/// Read a report file, naming the resulting report `name`
pub fn read_report_file<P: AsRef<Path>>(name: &str, path: P) -> BudgetResult<Report> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    load_report(name, BufReader::new(file)).map_err(|e| match e {
        BudgetError::Io(msg) => {
            BudgetError::Storage(format!("Failed to read {}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Write a report's rows to a file atomically (write to temp, then rename)
pub fn save_report<P: AsRef<Path>>(report: &Report, path: P) -> BudgetResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    if path.exists() {
        warn!(path = %path.display(), "replacing existing report file");
    }

    // Same directory as the target, so the rename stays atomic
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = report.write_rows(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    debug!(
        path = %path.display(),
        transactions = report.len(),
        "saved report"
    );

    Ok(())
}

/// Check if a report file exists at `path`
pub fn report_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}
