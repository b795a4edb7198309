//! pennywise-core: transaction classification, ledger, budgets and chat routing

pub mod budget;
pub mod categorizer;
pub mod finance;
pub mod ledger;
pub mod routing;
pub mod session;
pub mod time;

pub use budget::{
    percent_of, BudgetEvaluator, BudgetLimit, BudgetTable, CategoryBudget, CategoryStatus, Tier,
    TierScheme,
};
pub use categorizer::{categorize, Categorizer, KeywordRule, DEFAULT_KEYWORDS};
pub use finance::{format_amount, Category, ParseCategoryError, Transaction};
pub use ledger::Ledger;
pub use routing::{extract_amount, route, Intent, Reply};
pub use session::{Session, Settings};
