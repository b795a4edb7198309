//! Session: the single owner of ledger, categorizer, budgets and settings.
//!
//! Every operation takes the session explicitly; there is no global state.
//! Transports that share a session across tasks wrap it in a mutex so the
//! ledger and its aggregate are only ever mutated under one lock.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::budget::{BudgetEvaluator, CategoryStatus};
use crate::categorizer::Categorizer;
use crate::finance::{format_amount, Category, Transaction};
use crate::ledger::Ledger;
use crate::routing::{route, Reply};
use crate::time::now_in;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub currency_symbol: String,
    /// Method recorded for transactions added through chat.
    pub default_method: String,
    pub timezone: Tz,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            default_method: "Card".to_string(),
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

impl Settings {
    /// Format an amount with the currency symbol, e.g. `₹1200`.
    pub fn money(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency_symbol, format_amount(amount))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    ledger: Ledger,
    categorizer: Categorizer,
    evaluator: BudgetEvaluator,
    settings: Settings,
}

impl Session {
    pub fn new(categorizer: Categorizer, evaluator: BudgetEvaluator, settings: Settings) -> Self {
        Self {
            ledger: Ledger::new(),
            categorizer,
            evaluator,
            settings,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn evaluator(&self) -> &BudgetEvaluator {
        &self.evaluator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Classify and append one transaction. `amount` is already signed
    /// (negative = outflow). Falls back to the default method when `method`
    /// is missing or blank.
    pub fn record(
        &mut self,
        timestamp: NaiveDateTime,
        description: &str,
        amount: Decimal,
        method: Option<&str>,
    ) -> Category {
        let category = self.categorizer.classify(description);
        let method = match method.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.settings.default_method.clone(),
        };
        self.ledger
            .append(Transaction::new(timestamp, description, amount, category, method));
        category
    }

    /// Answer a free-text message, timestamping any added transaction with
    /// the current time in the session timezone.
    pub fn respond(&mut self, text: &str) -> String {
        let now = now_in(self.settings.timezone);
        self.respond_at(text, now)
    }

    pub fn respond_at(&mut self, text: &str, now: NaiveDateTime) -> String {
        self.reply_at(text, now).text
    }

    /// Like `respond_at`, also reporting which intent handled the message.
    pub fn reply_at(&mut self, text: &str, now: NaiveDateTime) -> Reply {
        route(self, text, now)
    }

    pub fn status(&self) -> BTreeMap<Category, CategoryStatus> {
        self.evaluator.status(&self.ledger)
    }

    pub fn statuses(&self) -> Vec<CategoryStatus> {
        self.evaluator.statuses(&self.ledger)
    }
}
