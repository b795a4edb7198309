//! Flat CSV reports written after a run.
//!
//! processed_transactions.csv: Date,Description,Amount,Category,Method
//! budget_summary.csv:         Category,Limit,Spent,Remaining,PctUsed,Tier
//!
//! Unbounded limits (and their remaining amount) are written as `inf`.

use anyhow::{Context, Result};
use pennywise_core::time::format_timestamp;
use pennywise_core::{BudgetLimit, CategoryStatus, Session, Transaction};
use std::path::{Path, PathBuf};
use tracing::info;

pub const TRANSACTIONS_FILE: &str = "processed_transactions.csv";
pub const BUDGET_FILE: &str = "budget_summary.csv";

const UNBOUNDED: &str = "inf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub transactions: PathBuf,
    pub budget: PathBuf,
}

pub fn write_transactions_csv(transactions: &[Transaction], path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Date", "Description", "Amount", "Category", "Method"])?;
    for t in transactions {
        w.write_record([
            format_timestamp(t.timestamp),
            t.description.clone(),
            t.amount.to_string(),
            t.category.label().to_string(),
            t.method.clone(),
        ])?;
    }
    w.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn write_budget_csv(statuses: &[CategoryStatus], path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Category", "Limit", "Spent", "Remaining", "PctUsed", "Tier"])?;
    for s in statuses {
        let (limit, remaining) = match (s.limit, s.remaining) {
            (BudgetLimit::Bounded(limit), Some(remaining)) => (limit.to_string(), remaining.to_string()),
            _ => (UNBOUNDED.to_string(), UNBOUNDED.to_string()),
        };
        w.write_record([
            s.category.label().to_string(),
            limit,
            s.spent.to_string(),
            remaining,
            s.pct_used.round_dp(2).normalize().to_string(),
            s.tier.label().to_string(),
        ])?;
    }
    w.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write both reports into `dir`, creating it if needed.
pub fn write_reports(session: &Session, dir: &Path) -> Result<ReportPaths> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let paths = ReportPaths {
        transactions: dir.join(TRANSACTIONS_FILE),
        budget: dir.join(BUDGET_FILE),
    };
    write_transactions_csv(session.ledger().transactions(), &paths.transactions)?;
    write_budget_csv(&session.statuses(), &paths.budget)?;
    info!(
        transactions = %paths.transactions.display(),
        budget = %paths.budget.display(),
        "reports written"
    );
    Ok(paths)
}
