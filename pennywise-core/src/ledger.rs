//! Ledger: append-only transaction store with per-category spend.
//!
//! The sequence and the `category -> spent` aggregate are updated together in
//! `append`, which is the only mutating operation, so they cannot diverge.
//!
//! Amounts follow the crate-wide sign convention (negative = outflow). Spend
//! accumulates the negated outflows; inflows only feed `total_income`.
//! Sums saturate at `Decimal::MAX` instead of overflowing.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::finance::{Category, Transaction};

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    entries: Vec<Transaction>,
    spent: HashMap<Category, Decimal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn append(&mut self, txn: Transaction) {
        let outflow = txn.outflow();
        if !outflow.is_zero() {
            let slot = self.spent.entry(txn.category).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(outflow);
        }
        debug!(
            category = %txn.category,
            amount = %txn.amount,
            count = self.entries.len() + 1,
            "ledger append"
        );
        self.entries.push(txn);
    }

    /// Cumulative outflow recorded under `category`.
    pub fn spent(&self, category: Category) -> Decimal {
        self.spent.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Last `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&Transaction> {
        self.entries.iter().rev().take(n).collect()
    }

    /// `n` entries with the largest |amount|, descending. Ties keep insertion order.
    pub fn top(&self, n: usize) -> Vec<&Transaction> {
        let mut ranked: Vec<&Transaction> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.magnitude().cmp(&a.magnitude()));
        ranked.truncate(n);
        ranked
    }

    /// Like `top`, restricted to outflows.
    pub fn top_expenses(&self, n: usize) -> Vec<&Transaction> {
        let mut ranked: Vec<&Transaction> = self.entries.iter().filter(|t| t.is_expense()).collect();
        ranked.sort_by(|a, b| b.magnitude().cmp(&a.magnitude()));
        ranked.truncate(n);
        ranked
    }

    pub fn total_spent(&self) -> Decimal {
        self.spent
            .values()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
    }

    pub fn total_income(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|t| t.is_income())
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    /// Non-zero spend per category, in category declaration order.
    pub fn spending_by_category(&self) -> Vec<(Category, Decimal)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.spent(c)))
            .filter(|(_, s)| !s.is_zero())
            .collect()
    }

    /// Categories ranked by spend, descending; ties keep declaration order.
    pub fn top_categories(&self, n: usize) -> Vec<(Category, Decimal)> {
        let mut ranked = self.spending_by_category();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
