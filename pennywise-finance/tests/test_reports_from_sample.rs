//! Sample month -> summary and report files.

use chrono::NaiveDate;
use pennywise_core::{Category, Session};
use pennywise_finance::{write_reports, FinancialSummary};
use pennywise_ingest::{ingest_at, sample_transactions};
use rust_decimal_macros::dec;

fn sample_session() -> Session {
    let now = NaiveDate::from_ymd_opt(2025, 11, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut session = Session::default();
    ingest_at(&mut session, sample_transactions(), now);
    session
}

#[test]
fn test_sample_summary() {
    let s = FinancialSummary::from_session(&sample_session());
    assert_eq!(s.total_income, dec!(30500));
    assert_eq!(s.total_expenses, dec!(13899));
    assert_eq!(s.net_savings, dec!(16601));

    let top: Vec<Category> = s.top_categories.iter().map(|c| c.category).collect();
    assert_eq!(
        top,
        vec![
            Category::Groceries,
            Category::Shopping,
            Category::Bills,
            Category::Transport,
            Category::Dining,
        ]
    );
    assert_eq!(s.top_categories[0].spent, dec!(3500));
}

#[test]
fn test_sample_reports() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_reports(&sample_session(), dir.path()).unwrap();

    let mut rdr = csv::Reader::from_path(&paths.transactions).unwrap();
    assert_eq!(rdr.records().count(), 15);

    let mut rdr = csv::Reader::from_path(&paths.budget).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), Category::ALL.len());
    let groceries = rows.iter().find(|r| &r[0] == "Groceries").unwrap();
    assert_eq!(&groceries[2], "3500");
    assert_eq!(&groceries[5], "CAUTION");
}
