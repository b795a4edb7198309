//! pennywise-ingest: raw transaction sources and loading them into a session.
//!
//! Pipeline: source rows -> `clean` (trim, coerce, dedupe) -> `ingest`
//! (date parsing, classification, ledger append).

pub mod parsers;
pub mod types;

use chrono::NaiveDateTime;
use pennywise_core::time::{now_in, parse_transaction_date};
use pennywise_core::Session;
use std::collections::HashSet;
use tracing::{info, warn};

pub use parsers::{load_csv, sample_transactions};
pub use types::{coerce_amount, RawTransaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub loaded: usize,
    pub duplicates_removed: usize,
}

/// Normalize rows and drop exact duplicates, keeping the first occurrence.
///
/// Descriptions, dates and methods are trimmed and amounts are rewritten in
/// canonical decimal form before comparison, so "-1,200" and "-1200" on
/// otherwise identical rows count as duplicates.
pub fn clean(rows: Vec<RawTransaction>) -> Vec<RawTransaction> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .map(|r| RawTransaction {
            date: r.date.trim().to_string(),
            description: r.description.trim().to_string(),
            amount: coerce_amount(&r.amount).normalize().to_string(),
            method: r
                .method
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
        })
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

/// Parse a row date, falling back to `now` when no known format matches.
pub fn parse_date(text: &str, now: NaiveDateTime) -> NaiveDateTime {
    parse_transaction_date(text).unwrap_or_else(|| {
        warn!(date = %text, "unparseable date, using current time");
        now
    })
}

/// Clean `rows` and append them to the session ledger in order.
pub fn ingest(session: &mut Session, rows: Vec<RawTransaction>) -> IngestReport {
    let now = now_in(session.settings().timezone);
    ingest_at(session, rows, now)
}

/// Like `ingest`, with an explicit fallback time for undated rows.
pub fn ingest_at(session: &mut Session, rows: Vec<RawTransaction>, now: NaiveDateTime) -> IngestReport {
    let total = rows.len();
    let cleaned = clean(rows);
    let report = IngestReport {
        loaded: cleaned.len(),
        duplicates_removed: total - cleaned.len(),
    };

    for row in cleaned {
        let ts = parse_date(&row.date, now);
        let amount = coerce_amount(&row.amount);
        session.record(ts, &row.description, amount, row.method.as_deref());
    }

    info!(
        loaded = report.loaded,
        duplicates = report.duplicates_removed,
        "ingested transactions"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pennywise_core::Category;
    use rust_decimal_macros::dec;

    fn fallback() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_clean_trims_and_dedupes_keeping_first() {
        let rows = vec![
            RawTransaction::new("2025-11-05", "  Swiggy Order ", "-450", Some("UPI")),
            RawTransaction::new("2025-11-05", "Swiggy Order", "-450.00", Some("UPI ")),
            RawTransaction::new("2025-11-26", "Swiggy Order", "-700", Some("UPI")),
            RawTransaction::new("2025-11-05", "Swiggy Order", "-450", Some("Card")),
        ];
        let cleaned = clean(rows);
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[0].description, "Swiggy Order");
        assert_eq!(cleaned[0].amount, "-450");
        assert_eq!(cleaned[1].amount, "-700");
        assert_eq!(cleaned[2].method.as_deref(), Some("Card"));
    }

    #[test]
    fn test_ingest_sample() {
        let mut session = Session::default();
        let report = ingest_at(&mut session, sample_transactions(), fallback());
        assert_eq!(report.loaded, 15);
        assert_eq!(report.duplicates_removed, 0);

        let ledger = session.ledger();
        assert_eq!(ledger.len(), 15);
        assert_eq!(ledger.spent(Category::Groceries), dec!(3500));
        assert_eq!(ledger.spent(Category::FoodDelivery), dec!(1150));
        assert_eq!(ledger.total_income(), dec!(30500));
    }

    #[test]
    fn test_bad_date_and_amount_are_coerced() {
        let mut session = Session::default();
        let rows = vec![RawTransaction::new("someday", "Mystery charge", "n/a", None)];
        ingest_at(&mut session, rows, fallback());

        let t = &session.ledger().transactions()[0];
        assert_eq!(t.timestamp, fallback());
        assert_eq!(t.amount, dec!(0));
        assert_eq!(t.category, Category::Others);
        assert_eq!(t.method, "Card");
    }
}
