//! CLI commands for reports
//!
//! Shows, combines and extends report files. Arguments are either paths or
//! bare report names resolved in the reports directory.

use clap::Subcommand;
use tracing::info;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BasicTransaction, Currency, PayerTransaction};
use crate::report::{combine_any, BasicReport, MultiPayerReport, Report};
use crate::storage::{report_name_for, ReportStore};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Print one report, or several combined into one
    Show {
        /// Report files or names
        #[arg(required = true)]
        reports: Vec<String>,

        /// Name of the printed report
        #[arg(short, long)]
        name: Option<String>,

        /// Print totals as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Combine reports of the same kind and save the result
    Combine {
        /// Report files or names
        #[arg(required = true)]
        reports: Vec<String>,

        /// Where to save the combined report
        #[arg(short, long)]
        output: String,

        /// Name of the combined report (defaults to the output file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Append a transaction to a report, creating it if needed
    Add {
        /// Report file or name
        report: String,

        /// Time label (e.g. "2025-01-15")
        #[arg(short, long)]
        time: String,

        /// Amount, negative for expenses (e.g. "-25.00")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Description, used as the expense category
        #[arg(short, long)]
        description: String,

        /// Who earned or paid it (multi-payer reports only)
        #[arg(short, long)]
        paid_by: Option<String>,

        /// Report name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    store: &ReportStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Show {
            reports,
            name,
            json,
        } => handle_show(store, settings, &reports, name, json),
        ReportCommands::Combine {
            reports,
            output,
            name,
        } => handle_combine(store, &reports, &output, name),
        ReportCommands::Add {
            report,
            time,
            amount,
            description,
            paid_by,
            name,
        } => handle_add(store, &report, time, &amount, description, paid_by, name),
    }
}

fn load_all(store: &ReportStore, references: &[String]) -> BudgetResult<Vec<Report>> {
    references
        .iter()
        .map(|reference| store.load(reference, None))
        .collect()
}

fn handle_show(
    store: &ReportStore,
    settings: &Settings,
    references: &[String],
    name: Option<String>,
    json: bool,
) -> BudgetResult<()> {
    let reports = load_all(store, references)?;
    let name = name.unwrap_or_else(|| {
        reports
            .iter()
            .map(|r| r.name().to_string())
            .collect::<Vec<_>>()
            .join(" + ")
    });
    let report = combine_any(name, &reports)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        print!("{}", report.render_with_symbol(&settings.currency_symbol));
    }

    Ok(())
}

fn handle_combine(
    store: &ReportStore,
    references: &[String],
    output: &str,
    name: Option<String>,
) -> BudgetResult<()> {
    let reports = load_all(store, references)?;
    let name = name.unwrap_or_else(|| report_name_for(&store.resolve(output)));
    let combined = combine_any(name, &reports)?;

    let path = store.save(&combined, output)?;
    info!(path = %path.display(), sources = reports.len(), "combined report saved");
    println!(
        "Combined {} reports ({} transactions) into: {}",
        reports.len(),
        combined.len(),
        path.display()
    );

    Ok(())
}

fn handle_add(
    store: &ReportStore,
    reference: &str,
    time: String,
    amount: &str,
    description: String,
    paid_by: Option<String>,
    name: Option<String>,
) -> BudgetResult<()> {
    let amount = Currency::parse(amount)
        .map_err(|e| BudgetError::Validation(format!("{}. Use a number like -25.00", e)))?;

    if time.is_empty() || description.is_empty() {
        return Err(BudgetError::Validation(
            "Time and description must not be empty".into(),
        ));
    }

    let name = name.unwrap_or_else(|| report_name_for(&store.resolve(reference)));

    let addition: Report = match paid_by {
        Some(payer) => {
            let txn = PayerTransaction::new(time, amount, description, payer);
            MultiPayerReport::new(&name, vec![txn])?.into()
        }
        None => {
            let txn = BasicTransaction::new(time, amount, description);
            BasicReport::new(&name, vec![txn])?.into()
        }
    };

    let updated = if store.exists(reference) {
        let existing = store.load(reference, Some(name.as_str()))?;
        combine_any(name, &[existing, addition])?
    } else {
        addition
    };

    let path = store.save(&updated, reference)?;
    println!(
        "Added {} to {} ({} transactions, net {})",
        amount,
        path.display(),
        updated.len(),
        updated.net()
    );

    Ok(())
}
