//! Keyword categorizer: maps a free-text description to one Category.
//!
//! Matching is case-insensitive substring containment over an ordered
//! keyword table. The first declared keyword found anywhere in the
//! description wins, regardless of where in the text it appears, so the
//! table order is the tie-break policy when a description mentions several
//! categories ("Swiggy order from a restaurant" is Food Delivery).
//!
//! Substring matching is the contract: "bill" also matches "billing".

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::trace;

use crate::finance::Category;

/// Built-in keyword table, in priority order.
pub const DEFAULT_KEYWORDS: &[(&str, Category)] = &[
    // Groceries
    ("grocery", Category::Groceries),
    ("grocer", Category::Groceries),
    ("bigmart", Category::Groceries),
    ("localmart", Category::Groceries),
    ("supermarket", Category::Groceries),
    ("vegetables", Category::Groceries),
    ("kirana", Category::Groceries),
    // Food delivery (before transport so "uber eats" is not a ride)
    ("swiggy", Category::FoodDelivery),
    ("zomato", Category::FoodDelivery),
    ("uber eats", Category::FoodDelivery),
    ("food delivery", Category::FoodDelivery),
    // Dining
    ("restaurant", Category::Dining),
    ("cafe", Category::Dining),
    ("lunch", Category::Dining),
    ("dinner", Category::Dining),
    ("dining", Category::Dining),
    ("breakfast", Category::Dining),
    ("pizza", Category::Dining),
    ("burger", Category::Dining),
    // Transport
    ("fuel", Category::Transport),
    ("petrol", Category::Transport),
    ("diesel", Category::Transport),
    ("uber", Category::Transport),
    ("taxi", Category::Transport),
    ("metro", Category::Transport),
    ("parking", Category::Transport),
    // Entertainment
    ("movie", Category::Entertainment),
    ("cinema", Category::Entertainment),
    ("ticket", Category::Entertainment),
    ("concert", Category::Entertainment),
    ("game", Category::Entertainment),
    // Subscriptions
    ("netflix", Category::Subscriptions),
    ("prime", Category::Subscriptions),
    ("spotify", Category::Subscriptions),
    ("subscription", Category::Subscriptions),
    // Shopping
    ("amazon", Category::Shopping),
    ("flipkart", Category::Shopping),
    ("myntra", Category::Shopping),
    ("shoe", Category::Shopping),
    ("clothes", Category::Shopping),
    ("apparel", Category::Shopping),
    ("mall", Category::Shopping),
    // Bills
    ("electricity", Category::Bills),
    ("water", Category::Bills),
    ("internet", Category::Bills),
    ("phone", Category::Bills),
    ("mobile", Category::Bills),
    ("bill", Category::Bills),
    // Healthcare
    ("doctor", Category::Healthcare),
    ("hospital", Category::Healthcare),
    ("pharmacy", Category::Healthcare),
    ("medicine", Category::Healthcare),
    ("clinic", Category::Healthcare),
    ("health", Category::Healthcare),
    // Education
    ("tuition", Category::Education),
    ("school", Category::Education),
    ("college", Category::Education),
    ("course", Category::Education),
    ("book", Category::Education),
    // Income
    ("salary", Category::Income),
    ("payroll", Category::Income),
    ("stipend", Category::Income),
    ("repaid", Category::Income),
    ("credited", Category::Income),
];

/// One `(keyword, category)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: Category,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, category: Category) -> Self {
        Self {
            keyword: keyword.into(),
            category,
        }
    }
}

/// Ordered keyword table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorizer {
    rules: Vec<KeywordRule>,
}

impl Categorizer {
    /// Build from rules in priority order. Keywords are lower-cased and
    /// trimmed; empty keywords are dropped since they would match everything.
    pub fn new(rules: impl IntoIterator<Item = KeywordRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|r| {
                let keyword = r.keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    None
                } else {
                    Some(KeywordRule::new(keyword, r.category))
                }
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Categorize a description. Never fails: no match yields `Others`.
    pub fn classify(&self, description: &str) -> Category {
        let desc = description.to_lowercase();
        match self.rules.iter().find(|r| desc.contains(&r.keyword)) {
            Some(rule) => {
                trace!(keyword = %rule.keyword, category = %rule.category, "keyword match");
                rule.category
            }
            None => Category::FALLBACK,
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEYWORDS
                .iter()
                .map(|(k, c)| KeywordRule::new(*k, *c)),
        )
    }
}

static DEFAULT_CATEGORIZER: LazyLock<Categorizer> = LazyLock::new(Categorizer::default);

/// Categorize with the built-in keyword table.
pub fn categorize(description: &str) -> Category {
    DEFAULT_CATEGORIZER.classify(description)
}
