//! Shared report core
//!
//! Both report kinds keep their transactions in a [`Ledger`], which owns the
//! totals and everything that only depends on a transaction's time, amount and
//! description: categorization, sorting, and row output.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Currency, Entry};

use super::rows::escape_csv;

/// Totals over an ordered list of transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger<T> {
    /// Name of the report period (e.g. "January 2025")
    pub name: String,
    /// Income plus expense
    pub net: Currency,
    /// Sum of all non-negative amounts
    pub total_income: Currency,
    /// Sum of all negative amounts (zero or negative)
    pub total_expense: Currency,
    transactions: Vec<T>,
}

impl<T: Entry> Ledger<T> {
    /// Compute the totals for `transactions`, keeping their order
    ///
    /// Fails if total income or total expense leaves the cent range. Any sum
    /// of a subset of one sign is then in range too.
    pub fn new(name: impl Into<String>, transactions: Vec<T>) -> BudgetResult<Self> {
        let name = name.into();
        let mut total_income = Currency::zero();
        let mut total_expense = Currency::zero();

        for txn in &transactions {
            let total = if txn.is_income() {
                &mut total_income
            } else {
                &mut total_expense
            };
            *total = total
                .checked_add(txn.amount())
                .ok_or_else(|| BudgetError::AmountOverflow(name.clone()))?;
        }

        Ok(Self {
            name,
            net: total_income + total_expense,
            total_income,
            total_expense,
            transactions,
        })
    }

    /// Transactions in insertion order
    pub fn transactions(&self) -> &[T] {
        &self.transactions
    }

    /// Expenses summed per description
    ///
    /// Only descriptions with at least one expense appear; every value is
    /// negative.
    pub fn total_expense_by_category(&self) -> BTreeMap<String, Currency> {
        let mut by_category: BTreeMap<String, Currency> = BTreeMap::new();
        for txn in self.transactions.iter().filter(|t| !t.is_income()) {
            *by_category
                .entry(txn.description().to_string())
                .or_default() += txn.amount();
        }
        by_category
    }

    /// Incomes, largest first
    pub fn sorted_incomes(&self) -> Vec<T> {
        sort_by_magnitude(self.transactions.iter().filter(|t| t.is_income()))
    }

    /// Expenses, most expensive first
    pub fn sorted_expenses(&self) -> Vec<T> {
        sort_by_magnitude(self.transactions.iter().filter(|t| !t.is_income()))
    }

    /// Incomes then expenses, each sorted by magnitude
    fn presentation_order(&self) -> Vec<T> {
        let mut rows = self.sorted_incomes();
        rows.extend(self.sorted_expenses());
        rows
    }

    /// Write the row format: header, then one row per transaction
    ///
    /// Amounts are plain two-decimal numerals. There is no newline after the
    /// final row.
    pub fn write_rows<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        write!(writer, "{}", T::COLUMNS.join(","))
            .map_err(|e| BudgetError::Io(format!("Failed to write header row: {}", e)))?;

        for txn in self.presentation_order() {
            write!(writer, "\n{}", format_row(&txn, &txn.amount().to_plain_string()))
                .map_err(|e| BudgetError::Io(format!("Failed to write row: {}", e)))?;
        }

        Ok(())
    }

    /// Render the opening summary lines
    pub(crate) fn render_totals(&self, symbol: &str, out: &mut String) {
        out.push_str(&format!("Budget Report for the period {}\n", self.name));
        out.push_str(&format!(
            "Total Income: {}, Total Expense: {}, Net Income: {}\n",
            self.total_income.format_with_symbol(symbol),
            self.total_expense.format_with_symbol(symbol),
            self.net.format_with_symbol(symbol)
        ));
    }

    /// Render the per-category expense breakdown and the transaction table
    pub(crate) fn render_breakdown(&self, symbol: &str, out: &mut String) {
        out.push_str("Total Expense Per Category (% of total expenses)\n");
        for (category, amount) in self.total_expense_by_category() {
            out.push_str(&format_share(&category, amount, self.total_expense, symbol));
        }

        out.push_str(&T::COLUMNS.join(","));
        out.push('\n');
        for txn in self.presentation_order() {
            out.push_str(&format_row(&txn, &txn.amount().format_with_symbol(symbol)));
            out.push('\n');
        }
    }
}

/// `<label>: <amount> (<pct>%)` line
pub(crate) fn format_share(label: &str, amount: Currency, total: Currency, symbol: &str) -> String {
    format!(
        "{}: {} ({:.2}%)\n",
        label,
        amount.format_with_symbol(symbol),
        amount.percentage_of(total)
    )
}

fn format_row<T: Entry>(txn: &T, amount: &str) -> String {
    let mut fields = vec![
        escape_csv(txn.time()),
        amount.to_string(),
        escape_csv(txn.description()),
    ];
    fields.extend(txn.extra_columns().into_iter().map(escape_csv));
    fields.join(",")
}

/// Stable sort by descending absolute amount
///
/// Equal magnitudes keep their relative input order.
fn sort_by_magnitude<'a, T: Entry + 'a>(transactions: impl Iterator<Item = &'a T>) -> Vec<T> {
    let mut sorted: Vec<T> = transactions.cloned().collect();
    sorted.sort_by(|a, b| {
        b.amount()
            .cents()
            .unsigned_abs()
            .cmp(&a.amount().cents().unsigned_abs())
    });
    sorted
}
