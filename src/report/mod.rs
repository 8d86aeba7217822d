//! Period reports
//!
//! A report aggregates one period's transactions: totals, expenses per
//! category, sorted views, and the row format used for report files. There are
//! two kinds, sharing one contract:
//!
//! - [`BasicReport`]: plain transactions
//! - [`MultiPayerReport`]: transactions attributed to a payer, with per-payer totals
//!
//! [`Report`] holds either kind. [`load_report`] picks the kind from raw rows
//! and [`combine_any`] merges reports of one kind.

pub mod basic;
pub mod ledger;
pub mod multi_payer;
pub mod rows;

pub use basic::BasicReport;
pub use ledger::Ledger;
pub use multi_payer::MultiPayerReport;
pub use rows::{parse_entries, parse_rows, ParsedRows};

use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Currency, DEFAULT_SYMBOL};

/// Which shape of report a [`Report`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Plain transactions
    Basic,
    /// Payer-attributed transactions
    MultiPayer,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::MultiPayer => write!(f, "multi-payer"),
        }
    }
}

/// A report of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Basic(BasicReport),
    MultiPayer(MultiPayerReport),
}

impl Report {
    /// The kind of report held
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Basic(_) => ReportKind::Basic,
            Self::MultiPayer(_) => ReportKind::MultiPayer,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Basic(r) => r.name(),
            Self::MultiPayer(r) => r.name(),
        }
    }

    pub fn net(&self) -> Currency {
        match self {
            Self::Basic(r) => r.net(),
            Self::MultiPayer(r) => r.net(),
        }
    }

    pub fn total_income(&self) -> Currency {
        match self {
            Self::Basic(r) => r.total_income(),
            Self::MultiPayer(r) => r.total_income(),
        }
    }

    pub fn total_expense(&self) -> Currency {
        match self {
            Self::Basic(r) => r.total_expense(),
            Self::MultiPayer(r) => r.total_expense(),
        }
    }

    /// Number of transactions in the report
    pub fn len(&self) -> usize {
        match self {
            Self::Basic(r) => r.transactions().len(),
            Self::MultiPayer(r) => r.transactions().len(),
        }
    }

    /// Whether the report has no transactions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expenses summed per description
    pub fn total_expense_by_category(&self) -> BTreeMap<String, Currency> {
        match self {
            Self::Basic(r) => r.total_expense_by_category(),
            Self::MultiPayer(r) => r.total_expense_by_category(),
        }
    }

    /// Write the transactions in the row format
    pub fn write_rows<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        match self {
            Self::Basic(r) => r.write_rows(writer),
            Self::MultiPayer(r) => r.write_rows(writer),
        }
    }

    /// Render the report for terminal display
    pub fn render(&self) -> String {
        self.render_with_symbol(DEFAULT_SYMBOL)
    }

    /// Render the report using a specific currency symbol
    pub fn render_with_symbol(&self, symbol: &str) -> String {
        match self {
            Self::Basic(r) => r.render_with_symbol(symbol),
            Self::MultiPayer(r) => r.render_with_symbol(symbol),
        }
    }

    /// Machine-readable totals, without the transactions themselves
    pub fn summary(&self) -> ReportSummary {
        let (net_per_payer, income_per_payer, expense_per_payer) = match self {
            Self::Basic(_) => (None, None, None),
            Self::MultiPayer(r) => (
                Some(r.net_per_payer().clone()),
                Some(r.income_per_payer().clone()),
                Some(r.expense_per_payer().clone()),
            ),
        };

        ReportSummary {
            name: self.name().to_string(),
            kind: self.kind(),
            total_income: self.total_income(),
            total_expense: self.total_expense(),
            net: self.net(),
            transaction_count: self.len(),
            expense_by_category: self.total_expense_by_category(),
            net_per_payer,
            income_per_payer,
            expense_per_payer,
        }
    }
}

impl From<BasicReport> for Report {
    fn from(report: BasicReport) -> Self {
        Self::Basic(report)
    }
}

impl From<MultiPayerReport> for Report {
    fn from(report: MultiPayerReport) -> Self {
        Self::MultiPayer(report)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Totals of a report, for JSON output
///
/// Amounts serialize as integer cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub name: String,
    pub kind: ReportKind,
    pub total_income: Currency,
    pub total_expense: Currency,
    pub net: Currency,
    pub transaction_count: usize,
    pub expense_by_category: BTreeMap<String, Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_per_payer: Option<BTreeMap<String, Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_per_payer: Option<BTreeMap<String, Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_per_payer: Option<BTreeMap<String, Currency>>,
}

/// Build a report from rows, picking the kind from the first row's width
pub fn load_report<R: Read>(name: impl Into<String>, reader: R) -> BudgetResult<Report> {
    let name = name.into();
    let report: Report = match parse_rows(reader)? {
        ParsedRows::Basic(txns) => BasicReport::new(name, txns)?.into(),
        ParsedRows::MultiPayer(txns) => MultiPayerReport::new(name, txns)?.into(),
    };

    debug!(
        name = report.name(),
        kind = %report.kind(),
        transactions = report.len(),
        "loaded report"
    );

    Ok(report)
}

/// Merge reports of one kind into a new report named `name`
///
/// Fails if `reports` is empty or mixes kinds. Transactions keep report order,
/// then each report's own order.
pub fn combine_any(name: impl Into<String>, reports: &[Report]) -> BudgetResult<Report> {
    let first = reports.first().ok_or(BudgetError::EmptyCombination)?;

    let combined: Report = match first.kind() {
        ReportKind::Basic => BasicReport::combine(name, reports)?.into(),
        ReportKind::MultiPayer => MultiPayerReport::combine(name, reports)?.into(),
    };

    debug!(
        name = combined.name(),
        sources = reports.len(),
        transactions = combined.len(),
        "combined reports"
    );

    Ok(combined)
}
