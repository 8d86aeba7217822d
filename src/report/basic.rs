//! Basic report
//!
//! A period report over plain transactions.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BasicTransaction, Currency, DEFAULT_SYMBOL};

use super::ledger::Ledger;
use super::{Report, ReportKind};

/// Summary of a budget over plain transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicReport {
    ledger: Ledger<BasicTransaction>,
}

impl BasicReport {
    /// Build a report, computing total income, total expense and net income
    ///
    /// Fails if either total leaves the cent range.
    pub fn new(
        name: impl Into<String>,
        transactions: Vec<BasicTransaction>,
    ) -> BudgetResult<Self> {
        Ok(Self {
            ledger: Ledger::new(name, transactions)?,
        })
    }

    /// Merge basic reports into a new one
    ///
    /// Transactions are concatenated in argument order. Fails if any report is
    /// not a basic report.
    pub fn combine(name: impl Into<String>, reports: &[Report]) -> BudgetResult<Self> {
        let mut transactions = Vec::new();
        for report in reports {
            match report {
                Report::Basic(basic) => transactions.extend_from_slice(basic.transactions()),
                other => {
                    return Err(BudgetError::variant_mismatch(
                        ReportKind::Basic,
                        other.kind(),
                    ))
                }
            }
        }
        Self::new(name, transactions)
    }

    pub fn name(&self) -> &str {
        &self.ledger.name
    }

    pub fn net(&self) -> Currency {
        self.ledger.net
    }

    pub fn total_income(&self) -> Currency {
        self.ledger.total_income
    }

    pub fn total_expense(&self) -> Currency {
        self.ledger.total_expense
    }

    /// Transactions in insertion order
    pub fn transactions(&self) -> &[BasicTransaction] {
        self.ledger.transactions()
    }

    /// Expenses summed per description
    pub fn total_expense_by_category(&self) -> BTreeMap<String, Currency> {
        self.ledger.total_expense_by_category()
    }

    /// Incomes, largest first
    pub fn sorted_incomes(&self) -> Vec<BasicTransaction> {
        self.ledger.sorted_incomes()
    }

    /// Expenses, most expensive first
    pub fn sorted_expenses(&self) -> Vec<BasicTransaction> {
        self.ledger.sorted_expenses()
    }

    /// Write the transactions in the row format
    pub fn write_rows<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        self.ledger.write_rows(writer)
    }

    /// Render the report for terminal display
    pub fn render(&self) -> String {
        self.render_with_symbol(DEFAULT_SYMBOL)
    }

    /// Render the report using a specific currency symbol
    pub fn render_with_symbol(&self, symbol: &str) -> String {
        let mut output = String::new();
        self.ledger.render_totals(symbol, &mut output);
        self.ledger.render_breakdown(symbol, &mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MultiPayerReport;
    use rust_decimal_macros::dec;

    fn txn(time: &str, amount: rust_decimal::Decimal, description: &str) -> BasicTransaction {
        BasicTransaction::new(time, Currency::new(amount), description)
    }

    fn sample() -> Vec<BasicTransaction> {
        vec![
            txn("1", dec!(500.0), "Income"),
            txn("2", dec!(-25.0), "Groceries"),
            txn("3", dec!(-200.0), "Rent"),
            txn("4", dec!(-50.0), "Groceries"),
            txn("5", dec!(2000.0), "Income"),
        ]
    }

    #[test]
    fn test_budget_report() {
        let report = BasicReport::new(
            "Test",
            vec![
                txn("", dec!(100.0), "Salary"),
                txn("", dec!(-50.0), "Groceries"),
            ],
        )
        .unwrap();
        assert_eq!(report.net(), Currency::new(dec!(50.0)));
        assert_eq!(report.total_income(), Currency::new(dec!(100.0)));
        assert_eq!(report.total_expense(), Currency::new(dec!(-50.0)));
    }

    #[test]
    fn test_total_expense_by_category() {
        let report = BasicReport::new("Test", sample()).unwrap();
        let by_category = report.total_expense_by_category();

        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["Groceries"], Currency::new(dec!(-75.0)));
        assert_eq!(by_category["Rent"], Currency::new(dec!(-200.0)));

        let sum: Currency = by_category.values().copied().sum();
        assert_eq!(sum, report.total_expense());
    }

    #[test]
    fn test_sorted_views() {
        let report = BasicReport::new("Test", sample()).unwrap();

        let incomes: Vec<_> = report.sorted_incomes().into_iter().map(|t| t.time).collect();
        assert_eq!(incomes, vec!["5", "1"]);

        let expenses: Vec<_> = report.sorted_expenses().into_iter().map(|t| t.time).collect();
        assert_eq!(expenses, vec!["3", "4", "2"]);
    }

    #[test]
    fn test_zero_amount_sorted_with_incomes() {
        let report = BasicReport::new(
            "Test",
            vec![txn("1", dec!(0), "Nothing"), txn("2", dec!(-1), "Gum")],
        )
        .unwrap();
        assert_eq!(report.sorted_incomes().len(), 1);
        assert_eq!(report.sorted_expenses().len(), 1);
        assert!(report.total_expense_by_category().contains_key("Gum"));
        assert!(!report.total_expense_by_category().contains_key("Nothing"));
    }

    #[test]
    fn test_write_rows() {
        let report = BasicReport::new("Test", sample()).unwrap();
        let mut out = Vec::new();
        report.write_rows(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Time,Amount,Description\n\
             5,2000.00,Income\n\
             1,500.00,Income\n\
             3,-200.00,Rent\n\
             4,-50.00,Groceries\n\
             2,-25.00,Groceries"
        );
    }

    #[test]
    fn test_write_rows_empty_report() {
        let report = BasicReport::new("Empty", Vec::new()).unwrap();
        let mut out = Vec::new();
        report.write_rows(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Time,Amount,Description");
    }

    #[test]
    fn test_render() {
        let report = BasicReport::new(
            "January",
            vec![
                txn("1", dec!(500.0), "Income"),
                txn("2", dec!(-25.0), "Groceries"),
                txn("3", dec!(-75.0), "Rent"),
            ],
        )
        .unwrap();

        assert_eq!(
            report.render(),
            "Budget Report for the period January\n\
             Total Income: €500.00, Total Expense: -€100.00, Net Income: €400.00\n\
             Total Expense Per Category (% of total expenses)\n\
             Groceries: -€25.00 (25.00%)\n\
             Rent: -€75.00 (75.00%)\n\
             Time,Amount,Description\n\
             1,€500.00,Income\n\
             3,-€75.00,Rent\n\
             2,-€25.00,Groceries\n"
        );
    }

    #[test]
    fn test_render_without_expenses() {
        let report = BasicReport::new("Quiet", vec![txn("1", dec!(10), "Gift")]).unwrap();
        let rendered = report.render_with_symbol("$");
        assert!(rendered.contains("Total Expense: $0.00"));
        assert!(rendered.contains("1,$10.00,Gift"));
    }

    #[test]
    fn test_combine() {
        let first = Report::Basic(BasicReport::new("A", sample()).unwrap());
        let second = BasicReport::new("B", vec![txn("6", dec!(-1), "Gum")]).unwrap();
        let second = Report::Basic(second);

        let combined = BasicReport::combine("Both", &[first, second]).unwrap();
        assert_eq!(combined.name(), "Both");
        assert_eq!(combined.transactions().len(), 6);
        assert_eq!(combined.transactions()[5].time, "6");
        assert_eq!(combined.total_expense(), Currency::new(dec!(-276)));
    }

    #[test]
    fn test_combine_rejects_multi_payer() {
        let basic = Report::Basic(BasicReport::new("A", sample()).unwrap());
        let multi = Report::MultiPayer(MultiPayerReport::new("B", Vec::new()).unwrap());

        let err = BasicReport::combine("Both", &[basic, multi]).unwrap_err();
        assert!(matches!(
            err,
            BudgetError::VariantMismatch {
                expected: ReportKind::Basic,
                found: ReportKind::MultiPayer
            }
        ));
    }
}
