//! Transaction and category types shared by the ledger, budgets and router.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Spending categories assigned by keyword matching.
///
/// Declaration order is significant: it is the display order for budget
/// tables and the tie-break order when ranking categories by spend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Food Delivery")]
    FoodDelivery,
    #[serde(rename = "Dining")]
    Dining,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills")]
    Bills,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Others")]
    Others,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Groceries,
        Category::FoodDelivery,
        Category::Dining,
        Category::Transport,
        Category::Entertainment,
        Category::Subscriptions,
        Category::Shopping,
        Category::Bills,
        Category::Healthcare,
        Category::Education,
        Category::Income,
        Category::Others,
    ];

    /// Assigned when no keyword matches.
    pub const FALLBACK: Category = Category::Others;

    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::FoodDelivery => "Food Delivery",
            Category::Dining => "Dining",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Subscriptions => "Subscriptions",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Income => "Income",
            Category::Others => "Others",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Category::Income)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("other") {
            return Ok(Category::Others);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(wanted.to_string()))
    }
}

/// A classified transaction as stored in the ledger.
///
/// Sign convention: negative amounts are outflows (expenses), positive
/// amounts are inflows (income). Only outflows count towards budget spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    /// Payment method (Card, UPI, Cash, ...)
    pub method: String,
}

impl Transaction {
    pub fn new(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        amount: Decimal,
        category: Category,
        method: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            description: description.into(),
            amount,
            category,
            method: method.into(),
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    /// Amount this transaction adds to its category's spend.
    pub fn outflow(&self) -> Decimal {
        if self.is_expense() {
            -self.amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Render an amount without a currency symbol: whole values print without
/// decimals, anything else with two.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.fract().is_zero() {
        rounded.trunc().normalize().to_string()
    } else {
        format!("{:.2}", rounded)
    }
}
