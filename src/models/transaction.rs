//! Transaction models
//!
//! A transaction is a single income or expense. The plain shape carries a
//! time label, an amount and a description; the payer-attributed shape also
//! records who earned or paid it.

use super::currency::Currency;

/// Capabilities shared by every transaction shape
///
/// Reports are generic over this trait, so totals, sorting, categorization and
/// row output are written once for both shapes.
pub trait Entry: Clone {
    /// Column names of the row format, in order
    const COLUMNS: &'static [&'static str];

    /// The time label, as entered
    fn time(&self) -> &str;

    /// The signed amount (negative for expenses)
    fn amount(&self) -> Currency;

    /// The description, which doubles as the expense category
    fn description(&self) -> &str;

    /// Values of the columns after `Description`
    fn extra_columns(&self) -> Vec<&str>;

    /// Build an entry from parsed row columns
    ///
    /// `extra` holds exactly `COLUMNS.len() - 3` values.
    fn from_columns(time: &str, amount: Currency, description: &str, extra: &[&str]) -> Self;

    /// Whether this entry counts as income (zero amounts do)
    fn is_income(&self) -> bool {
        self.amount().is_income()
    }
}

/// A single income or expense
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicTransaction {
    /// When it happened, free-form ("2025-01-15", "1", "week 3")
    pub time: String,

    /// Signed amount
    pub amount: Currency,

    /// What it was for
    pub description: String,
}

impl BasicTransaction {
    /// Create a new transaction
    pub fn new(time: impl Into<String>, amount: Currency, description: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            amount,
            description: description.into(),
        }
    }

    /// Attribute this transaction to a payer
    pub fn paid_by(self, payer: impl Into<String>) -> PayerTransaction {
        PayerTransaction {
            time: self.time,
            amount: self.amount,
            description: self.description,
            paid_by: payer.into(),
        }
    }
}

impl Entry for BasicTransaction {
    const COLUMNS: &'static [&'static str] = &["Time", "Amount", "Description"];

    fn time(&self) -> &str {
        &self.time
    }

    fn amount(&self) -> Currency {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn extra_columns(&self) -> Vec<&str> {
        Vec::new()
    }

    fn from_columns(time: &str, amount: Currency, description: &str, _extra: &[&str]) -> Self {
        Self::new(time, amount, description)
    }
}

/// An income or expense attributed to the person who earned or paid it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayerTransaction {
    /// When it happened
    pub time: String,

    /// Signed amount
    pub amount: Currency,

    /// What it was for
    pub description: String,

    /// Who earned or paid it
    pub paid_by: String,
}

impl PayerTransaction {
    /// Create a new payer-attributed transaction
    pub fn new(
        time: impl Into<String>,
        amount: Currency,
        description: impl Into<String>,
        paid_by: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            amount,
            description: description.into(),
            paid_by: paid_by.into(),
        }
    }
}

impl Entry for PayerTransaction {
    const COLUMNS: &'static [&'static str] = &["Time", "Amount", "Description", "Name"];

    fn time(&self) -> &str {
        &self.time
    }

    fn amount(&self) -> Currency {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn extra_columns(&self) -> Vec<&str> {
        vec![self.paid_by.as_str()]
    }

    fn from_columns(time: &str, amount: Currency, description: &str, extra: &[&str]) -> Self {
        let paid_by = extra.first().copied().unwrap_or_default();
        Self::new(time, amount, description, paid_by)
    }
}
