//! Budget evaluation: per-category limit, spend, remaining and health tier.
//!
//! Status is recomputed from the ledger on every call; nothing is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::finance::Category;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLimit {
    Bounded(Decimal),
    Unbounded,
}

impl BudgetLimit {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            BudgetLimit::Bounded(v) => Some(*v),
            BudgetLimit::Unbounded => None,
        }
    }
}

/// Budget health, ordered from healthiest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Ok,
    Caution,
    Warning,
    Exceeded,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Ok => "OK",
            Tier::Caution => "CAUTION",
            Tier::Warning => "WARNING",
            Tier::Exceeded => "EXCEEDED",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tier::Ok => "🟢",
            Tier::Caution => "🟡",
            Tier::Warning => "🟠",
            Tier::Exceeded => "🔴",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold scheme mapping percentage used to a tier.
///
/// - `Graduated`: >=100 EXCEEDED, >=90 WARNING, >=70 CAUTION, else OK
/// - `Coarse`: <=80 OK, <=100 WARNING, >100 EXCEEDED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierScheme {
    #[default]
    Graduated,
    Coarse,
}

impl TierScheme {
    pub fn tier(&self, pct_used: Decimal) -> Tier {
        let hundred = Decimal::ONE_HUNDRED;
        match self {
            TierScheme::Graduated => {
                if pct_used >= hundred {
                    Tier::Exceeded
                } else if pct_used >= Decimal::from(90) {
                    Tier::Warning
                } else if pct_used >= Decimal::from(70) {
                    Tier::Caution
                } else {
                    Tier::Ok
                }
            }
            TierScheme::Coarse => {
                if pct_used <= Decimal::from(80) {
                    Tier::Ok
                } else if pct_used <= hundred {
                    Tier::Warning
                } else {
                    Tier::Exceeded
                }
            }
        }
    }
}

impl FromStr for TierScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graduated" | "four-tier" => Ok(TierScheme::Graduated),
            "coarse" | "two-tier" => Ok(TierScheme::Coarse),
            other => Err(format!("unknown tier scheme: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: Category,
    pub limit: BudgetLimit,
}

/// Ordered budget limits, one per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetTable {
    budgets: Vec<CategoryBudget>,
}

impl BudgetTable {
    pub fn empty() -> Self {
        Self { budgets: Vec::new() }
    }

    /// Set a category's limit, replacing any existing entry in place.
    pub fn with_limit(mut self, category: Category, limit: BudgetLimit) -> Self {
        self.set(category, limit);
        self
    }

    pub fn set(&mut self, category: Category, limit: BudgetLimit) {
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => existing.limit = limit,
            None => self.budgets.push(CategoryBudget { category, limit }),
        }
    }

    pub fn limit(&self, category: Category) -> Option<BudgetLimit> {
        self.budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.limit)
    }

    pub fn budgets(&self) -> &[CategoryBudget] {
        &self.budgets
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        let bounded = |v: i64| BudgetLimit::Bounded(Decimal::from(v));
        Self::empty()
            .with_limit(Category::Groceries, bounded(5000))
            .with_limit(Category::FoodDelivery, bounded(2000))
            .with_limit(Category::Dining, bounded(2000))
            .with_limit(Category::Transport, bounded(3000))
            .with_limit(Category::Entertainment, bounded(1000))
            .with_limit(Category::Subscriptions, bounded(1000))
            .with_limit(Category::Shopping, bounded(4000))
            .with_limit(Category::Bills, bounded(5000))
            .with_limit(Category::Healthcare, bounded(1500))
            .with_limit(Category::Education, bounded(3000))
            .with_limit(Category::Income, BudgetLimit::Unbounded)
            .with_limit(Category::Others, bounded(2000))
    }
}

/// Derived status for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStatus {
    pub category: Category,
    pub limit: BudgetLimit,
    pub spent: Decimal,
    /// `limit - spent`; negative when over budget, `None` when unbounded.
    pub remaining: Option<Decimal>,
    pub pct_used: Decimal,
    pub tier: Tier,
}

impl CategoryStatus {
    pub fn evaluate(budget: CategoryBudget, spent: Decimal, scheme: TierScheme) -> Self {
        match budget.limit {
            BudgetLimit::Unbounded => Self {
                category: budget.category,
                limit: budget.limit,
                spent,
                remaining: None,
                pct_used: Decimal::ZERO,
                tier: Tier::Ok,
            },
            BudgetLimit::Bounded(limit) => {
                let pct_used = if limit > Decimal::ZERO {
                    percent_of(spent, limit)
                } else {
                    Decimal::ZERO
                };
                Self {
                    category: budget.category,
                    limit: budget.limit,
                    spent,
                    remaining: Some(limit.saturating_sub(spent)),
                    pct_used,
                    tier: scheme.tier(pct_used),
                }
            }
        }
    }
}

/// `part / whole * 100`, saturating at `Decimal::MAX` when the ratio
/// does not fit. `whole` must be positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetEvaluator {
    table: BudgetTable,
    scheme: TierScheme,
}

impl BudgetEvaluator {
    pub fn new(table: BudgetTable, scheme: TierScheme) -> Self {
        Self { table, scheme }
    }

    pub fn scheme(&self) -> TierScheme {
        self.scheme
    }

    pub fn table(&self) -> &BudgetTable {
        &self.table
    }

    /// Status per budgeted category, keyed by category.
    pub fn status(&self, ledger: &Ledger) -> BTreeMap<Category, CategoryStatus> {
        self.statuses(ledger)
            .into_iter()
            .map(|s| (s.category, s))
            .collect()
    }

    /// Status per budgeted category, in table order.
    pub fn statuses(&self, ledger: &Ledger) -> Vec<CategoryStatus> {
        self.table
            .budgets()
            .iter()
            .map(|b| CategoryStatus::evaluate(*b, ledger.spent(b.category), self.scheme))
            .collect()
    }

    /// Categories currently at `tier`, in table order.
    pub fn categories_at(&self, ledger: &Ledger, tier: Tier) -> Vec<Category> {
        self.statuses(ledger)
            .into_iter()
            .filter(|s| s.tier == tier)
            .map(|s| s.category)
            .collect()
    }
}
