//! Multi-payer report
//!
//! A period report for a budget shared between several people. On top of the
//! report-wide totals it tracks net, income and expense per payer.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Currency, Entry, PayerTransaction, DEFAULT_SYMBOL};

use super::ledger::{format_share, Ledger};
use super::{Report, ReportKind};

/// Summary of a shared budget over payer-attributed transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPayerReport {
    ledger: Ledger<PayerTransaction>,
    net_per_payer: BTreeMap<String, Currency>,
    income_per_payer: BTreeMap<String, Currency>,
    expense_per_payer: BTreeMap<String, Currency>,
}

impl MultiPayerReport {
    /// Build a report, computing report-wide and per-payer totals
    ///
    /// Fails if the report-wide totals leave the cent range.
    pub fn new(
        name: impl Into<String>,
        transactions: Vec<PayerTransaction>,
    ) -> BudgetResult<Self> {
        let ledger = Ledger::new(name, transactions)?;
        let mut net_per_payer: BTreeMap<String, Currency> = BTreeMap::new();
        let mut income_per_payer: BTreeMap<String, Currency> = BTreeMap::new();
        let mut expense_per_payer: BTreeMap<String, Currency> = BTreeMap::new();

        // Per-payer sums are bounded by the report-wide ones
        for txn in ledger.transactions() {
            let bucket = if txn.is_income() {
                &mut income_per_payer
            } else {
                &mut expense_per_payer
            };
            *bucket.entry(txn.paid_by.clone()).or_default() += txn.amount;
            *net_per_payer.entry(txn.paid_by.clone()).or_default() += txn.amount;
        }

        Ok(Self {
            ledger,
            net_per_payer,
            income_per_payer,
            expense_per_payer,
        })
    }

    /// Merge multi-payer reports into a new one
    ///
    /// Transactions are concatenated in argument order. Fails if any report is
    /// not a multi-payer report.
    pub fn combine(name: impl Into<String>, reports: &[Report]) -> BudgetResult<Self> {
        let mut transactions = Vec::new();
        for report in reports {
            match report {
                Report::MultiPayer(multi) => transactions.extend_from_slice(multi.transactions()),
                other => {
                    return Err(BudgetError::variant_mismatch(
                        ReportKind::MultiPayer,
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

    /// Net income per payer, for every payer in the report
    pub fn net_per_payer(&self) -> &BTreeMap<String, Currency> {
        &self.net_per_payer
    }

    /// Income per payer; payers without income are absent
    pub fn income_per_payer(&self) -> &BTreeMap<String, Currency> {
        &self.income_per_payer
    }

    /// Expense per payer; payers without expenses are absent
    pub fn expense_per_payer(&self) -> &BTreeMap<String, Currency> {
        &self.expense_per_payer
    }

    /// Transactions in insertion order
    pub fn transactions(&self) -> &[PayerTransaction] {
        self.ledger.transactions()
    }

    /// Expenses summed per description
    pub fn total_expense_by_category(&self) -> BTreeMap<String, Currency> {
        self.ledger.total_expense_by_category()
    }

    /// Incomes, largest first
    pub fn sorted_incomes(&self) -> Vec<PayerTransaction> {
        self.ledger.sorted_incomes()
    }

    /// Expenses, most expensive first
    pub fn sorted_expenses(&self) -> Vec<PayerTransaction> {
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

        output.push_str("Total Income Per Person (% of total income)\n");
        for payer in self.net_per_payer.keys() {
            let income = self.income_per_payer.get(payer).copied().unwrap_or_default();
            output.push_str(&format_share(payer, income, self.total_income(), symbol));
        }

        output.push_str("Total Expense Per Person (% of total expenses)\n");
        for payer in self.net_per_payer.keys() {
            let expense = self.expense_per_payer.get(payer).copied().unwrap_or_default();
            output.push_str(&format_share(payer, expense, self.total_expense(), symbol));
        }

        self.ledger.render_breakdown(symbol, &mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::BasicReport;

    fn txn(time: &str, cents: i64, description: &str, payer: &str) -> PayerTransaction {
        PayerTransaction::new(time, Currency::from_cents(cents), description, payer)
    }

    fn sample() -> Vec<PayerTransaction> {
        vec![
            txn("1", 300000, "Salary", "Alice"),
            txn("2", 200000, "Salary", "Bob"),
            txn("3", -120000, "Rent", "Alice"),
            txn("4", -8000, "Groceries", "Bob"),
            txn("5", -2000, "Groceries", "Alice"),
        ]
    }

    #[test]
    fn test_per_payer_totals() {
        let report = MultiPayerReport::new("Shared", sample()).unwrap();

        assert_eq!(report.income_per_payer()["Alice"].cents(), 300000);
        assert_eq!(report.income_per_payer()["Bob"].cents(), 200000);
        assert_eq!(report.expense_per_payer()["Alice"].cents(), -122000);
        assert_eq!(report.expense_per_payer()["Bob"].cents(), -8000);
        assert_eq!(report.net_per_payer()["Alice"].cents(), 178000);
        assert_eq!(report.net_per_payer()["Bob"].cents(), 192000);
    }

    #[test]
    fn test_per_payer_totals_partition_report_totals() {
        let report = MultiPayerReport::new("Shared", sample()).unwrap();

        let income: Currency = report.income_per_payer().values().copied().sum();
        let expense: Currency = report.expense_per_payer().values().copied().sum();
        let net: Currency = report.net_per_payer().values().copied().sum();

        assert_eq!(income, report.total_income());
        assert_eq!(expense, report.total_expense());
        assert_eq!(net, report.net());
        assert_eq!(report.net(), report.total_income() + report.total_expense());
    }

    #[test]
    fn test_payer_with_only_expenses() {
        let report = MultiPayerReport::new(
            "Shared",
            vec![txn("1", 1000, "Gift", "Alice"), txn("2", -500, "Snacks", "Carol")],
        )
        .unwrap();
        assert!(!report.income_per_payer().contains_key("Carol"));
        assert_eq!(report.net_per_payer()["Carol"].cents(), -500);
    }

    #[test]
    fn test_write_rows() {
        let report = MultiPayerReport::new("Shared", sample()).unwrap();
        let mut out = Vec::new();
        report.write_rows(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Time,Amount,Description,Name\n\
             1,3000.00,Salary,Alice\n\
             2,2000.00,Salary,Bob\n\
             3,-1200.00,Rent,Alice\n\
             4,-80.00,Groceries,Bob\n\
             5,-20.00,Groceries,Alice"
        );
    }

    #[test]
    fn test_render() {
        let report = MultiPayerReport::new(
            "March",
            vec![
                txn("1", 30000, "Salary", "Alice"),
                txn("2", 10000, "Salary", "Bob"),
                txn("3", -5000, "Rent", "Alice"),
                txn("4", -5000, "Food", "Bob"),
            ],
        )
        .unwrap();

        assert_eq!(
            report.render(),
            "Budget Report for the period March\n\
             Total Income: €400.00, Total Expense: -€100.00, Net Income: €300.00\n\
             Total Income Per Person (% of total income)\n\
             Alice: €300.00 (75.00%)\n\
             Bob: €100.00 (25.00%)\n\
             Total Expense Per Person (% of total expenses)\n\
             Alice: -€50.00 (50.00%)\n\
             Bob: -€50.00 (50.00%)\n\
             Total Expense Per Category (% of total expenses)\n\
             Food: -€50.00 (50.00%)\n\
             Rent: -€50.00 (50.00%)\n\
             Time,Amount,Description,Name\n\
             1,€300.00,Salary,Alice\n\
             2,€100.00,Salary,Bob\n\
             3,-€50.00,Rent,Alice\n\
             4,-€50.00,Food,Bob\n"
        );
    }

    #[test]
    fn test_render_without_income() {
        let report = MultiPayerReport::new(
            "Costs",
            vec![txn("1", -1000, "Rent", "Alice"), txn("2", -3000, "Rent", "Bob")],
        )
        .unwrap();

        let rendered = report.render();
        assert!(rendered.starts_with(
            "Budget Report for the period Costs\n\
             Total Income: €0.00, Total Expense: -€40.00, Net Income: -€40.00\n\
             Total Income Per Person (% of total income)\n\
             Alice: €0.00 (0.00%)\n\
             Bob: €0.00 (0.00%)\n\
             Total Expense Per Person (% of total expenses)\n\
             Alice: -€10.00 (25.00%)\n\
             Bob: -€30.00 (75.00%)\n"
        ));
    }

    #[test]
    fn test_render_payer_without_expenses() {
        let report = MultiPayerReport::new(
            "Mixed",
            vec![txn("1", 5000, "Salary", "Alice"), txn("2", -2000, "Food", "Bob")],
        )
        .unwrap();

        let rendered = report.render();
        assert!(rendered.contains(
            "Total Expense Per Person (% of total expenses)\n\
             Alice: €0.00 (0.00%)\n\
             Bob: -€20.00 (100.00%)\n"
        ));
        assert!(!rendered.contains("-0.00%"));
    }

    #[test]
    fn test_combine_rejects_basic() {
        let multi = Report::MultiPayer(MultiPayerReport::new("A", sample()).unwrap());
        let basic = Report::Basic(BasicReport::new("B", Vec::new()).unwrap());

        let err = MultiPayerReport::combine("Both", &[multi, basic]).unwrap_err();
        assert!(err.is_variant_mismatch());
    }

    #[test]
    fn test_combine_preserves_order() {
        let first = Report::MultiPayer(MultiPayerReport::new("A", sample()).unwrap());
        let second = MultiPayerReport::new("B", vec![txn("6", -100, "Gum", "Bob")]).unwrap();
        let second = Report::MultiPayer(second);

        let combined = MultiPayerReport::combine("Both", &[second, first]).unwrap();
        let times: Vec<_> = combined.transactions().iter().map(|t| t.time.as_str()).collect();
        assert_eq!(times, vec!["6", "1", "2", "3", "4", "5"]);
        assert_eq!(combined.expense_per_payer()["Bob"].cents(), -8100);
    }
}
