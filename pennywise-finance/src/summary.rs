//! Financial summary: income, expenses, savings and the biggest spend categories.

use pennywise_core::{percent_of, Category, Ledger, Session};
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of categories kept in the summary.
pub const TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub spent: Decimal,
    /// Share of total expenses, in percent (0 when there are no expenses).
    pub share_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    /// Expenses as a percentage of income; `None` without income.
    pub expense_ratio: Option<Decimal>,
    pub top_categories: Vec<CategoryShare>,
}

impl FinancialSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let total_income = ledger.total_income();
        let total_expenses = ledger.total_spent();
        let pct = |part: Decimal, whole: Decimal| {
            (!whole.is_zero()).then(|| percent_of(part, whole))
        };

        let top_categories = ledger
            .top_categories(TOP_CATEGORIES)
            .into_iter()
            .map(|(category, spent)| CategoryShare {
                category,
                spent,
                share_pct: pct(spent, total_expenses).unwrap_or(Decimal::ZERO),
            })
            .collect();

        Self {
            total_income,
            total_expenses,
            net_savings: total_income.saturating_sub(total_expenses),
            expense_ratio: pct(total_expenses, total_income),
            top_categories,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self::from_ledger(session.ledger())
    }
}
