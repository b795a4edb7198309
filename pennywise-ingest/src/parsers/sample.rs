//! Built-in demo month, used when no CSV is given.

use crate::types::RawTransaction;

const SAMPLE: &[(&str, &str, &str, &str)] = &[
    ("2025-11-01", "Grocery Store - BigMart", "-1200", "Card"),
    ("2025-11-02", "Lunch - Cafe Corner", "-250", "UPI"),
    ("2025-11-03", "Salary", "30000", "Bank Transfer"),
    ("2025-11-05", "Swiggy Order", "-450", "UPI"),
    ("2025-11-06", "Electricity Bill", "-2200", "UPI"),
    ("2025-11-07", "Netflix Subscription", "-399", "Card"),
    ("2025-11-10", "Movie Tickets", "-600", "UPI"),
    ("2025-11-12", "Fuel - Shell", "-1800", "Card"),
    ("2025-11-15", "Dinner - Restaurant", "-1200", "Card"),
    ("2025-11-18", "Amazon Purchase - Shoes", "-2500", "Card"),
    ("2025-11-20", "Friend repaid", "500", "Cash"),
    ("2025-11-22", "Uber Ride", "-300", "UPI"),
    ("2025-11-24", "Grocery Store - LocalMart", "-800", "Cash"),
    ("2025-11-25", "Groceries - Weekly", "-1500", "UPI"),
    ("2025-11-26", "Swiggy Order", "-700", "UPI"),
];

pub fn sample_transactions() -> Vec<RawTransaction> {
    SAMPLE
        .iter()
        .map(|(date, desc, amount, method)| RawTransaction::new(*date, *desc, *amount, Some(method)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let rows = sample_transactions();
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].description, "Grocery Store - BigMart");
        assert_eq!(rows[2].amount, "30000");
        assert!(rows.iter().all(|r| r.method.is_some()));
    }
}
