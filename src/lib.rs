//! Budget Report - period summaries of incomes and expenses
//!
//! This library aggregates personal transactions into period reports. It
//! computes totals with exact fixed-point arithmetic, breaks expenses down by
//! category, and reads and writes reports as comma-separated row files that can
//! be merged into one report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Currency and transaction value types
//! - `report`: Basic and multi-payer reports, row parsing, combination
//! - `storage`: Report files on disk
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust
//! use budget::models::{BasicTransaction, Currency};
//! use budget::report::{combine_any, load_report, BasicReport, Report};
//!
//! let january = BasicReport::new(
//!     "January",
//!     vec![
//!         BasicTransaction::new("1", Currency::from_cents(10000), "Salary"),
//!         BasicTransaction::new("2", Currency::from_cents(-5000), "Groceries"),
//!     ],
//! )?;
//! assert_eq!(january.net(), Currency::from_cents(5000));
//!
//! let rows = "1,500.00,Income\n2,-25.00,Groceries";
//! let loaded = load_report("Saved", rows.as_bytes())?;
//! let both = combine_any("Both", &[Report::from(january), loaded])?;
//! assert_eq!(both.len(), 4);
//! # Ok::<(), budget::BudgetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
pub use report::{combine_any, load_report, Report, ReportKind};
