//! pennywise-finance: financial summary and CSV reports over a session

pub mod report;
pub mod summary;

pub use report::{write_budget_csv, write_reports, write_transactions_csv, ReportPaths};
pub use summary::{CategoryShare, FinancialSummary};
