//! End-to-end: raw rows -> session -> budget status and chat replies.

use chrono::NaiveDate;
use pennywise_core::{Category, Session, Tier};
use pennywise_ingest::{ingest_at, sample_transactions, RawTransaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 30)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

#[test]
fn test_three_row_month() {
    let rows = vec![
        RawTransaction::new("2025-11-01", "Grocery Store", "-1200", Some("Card")),
        RawTransaction::new("2025-11-02", "Swiggy Order", "-450", Some("UPI")),
        RawTransaction::new("2025-11-03", "Salary", "30000", Some("Bank Transfer")),
    ];
    let mut session = Session::default();
    ingest_at(&mut session, rows, now());

    let status = session.status();
    let groceries = &status[&Category::Groceries];
    assert_eq!(groceries.spent, dec!(1200));
    assert_eq!(groceries.remaining, Some(dec!(3800)));
    assert_eq!(groceries.tier, Tier::Ok);

    assert_eq!(session.ledger().total_income(), dec!(30000));
    assert_eq!(session.ledger().total_spent(), dec!(1650));
    assert_eq!(status[&Category::Income].pct_used, Decimal::ZERO);
}

#[test]
fn test_sample_month_through_chat() {
    let mut session = Session::default();
    ingest_at(&mut session, sample_transactions(), now());

    // Bills 2200/5000, Entertainment 600/1000, Dining 1450/2000:
    // nothing at WARNING or worse yet.
    let reply = session.respond_at("any tips?", now());
    assert!(reply.starts_with("✨ Great Job!"), "{}", reply);

    let reply = session.respond_at("top expenses", now());
    assert!(reply.contains("1. ₹2500 - Amazon Purchase - Shoes (Shopping)"), "{}", reply);

    session.respond_at("spent 400 at the cinema", now());
    assert_eq!(session.ledger().spent(Category::Entertainment), dec!(1000));
    let reply = session.respond_at("insight", now());
    assert!(reply.contains("exceeded budget in Entertainment"), "{}", reply);
}
