//! Deterministic intent routing for free-text chat messages.
//!
//! No NLP: a message is lower-cased and checked against an ordered table of
//! trigger words. The first route whose trigger appears in the text and whose
//! handler accepts the message answers it. A handler may decline (return
//! `None`), in which case routing continues with the next entry; the
//! add-transaction route does this when the message carries no amount.
//!
//! Only the add-transaction handler mutates the session.

use chrono::NaiveDateTime;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

use crate::budget::{BudgetLimit, Tier};
use crate::finance::{format_amount, Category, Transaction};
use crate::session::Session;
use crate::time::format_timestamp;

/// Number of transactions listed by the top-expenses reply.
pub const TOP_EXPENSES: usize = 3;
/// Number of categories listed by the summary reply.
pub const SUMMARY_CATEGORIES: usize = 5;
/// Number of transactions listed by the recent-history reply.
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AddTransaction,
    BudgetStatus,
    Summary,
    TopExpenses,
    Insights,
    Recent,
    Help,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

type Handler = fn(&mut Session, &str, NaiveDateTime) -> Option<String>;

struct Route {
    intent: Intent,
    triggers: &'static [&'static str],
    handler: Handler,
}

impl Route {
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

const ROUTES: &[Route] = &[
    Route {
        intent: Intent::AddTransaction,
        triggers: &["add", "spent", "expense", "transaction"],
        handler: add_transaction,
    },
    Route {
        intent: Intent::BudgetStatus,
        triggers: &["budget", "spending"],
        handler: budget_status,
    },
    Route {
        intent: Intent::Summary,
        triggers: &["summary", "total", "how much"],
        handler: summary,
    },
    Route {
        intent: Intent::TopExpenses,
        triggers: &["top", "highest"],
        handler: top_expenses,
    },
    Route {
        intent: Intent::Insights,
        triggers: &["insight", "advice", "tip"],
        handler: insights,
    },
    Route {
        intent: Intent::Recent,
        triggers: &["recent", "history"],
        handler: recent,
    },
    Route {
        intent: Intent::Help,
        triggers: &["help", "command", "what"],
        handler: help,
    },
];

/// Route `text` to the first matching intent and produce its reply.
/// Every input gets an answer; unmatched messages get the greeting.
pub fn route(session: &mut Session, text: &str, now: NaiveDateTime) -> Reply {
    let lowered = text.to_lowercase();
    for r in ROUTES.iter().filter(|r| r.matches(&lowered)) {
        match (r.handler)(session, text, now) {
            Some(text) => {
                debug!(intent = ?r.intent, "routed message");
                return Reply {
                    intent: r.intent,
                    text,
                };
            }
            None => debug!(intent = ?r.intent, "handler declined, falling through"),
        }
    }
    Reply {
        intent: Intent::Default,
        text: greeting(session),
    }
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?").expect("invalid amount regex"))
}

/// First numeric token in `text`, with thousands separators removed.
/// "Add ₹1,250.50 for dinner" yields 1250.50.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    let m = amount_regex().find(text)?;
    Decimal::from_str(&m.as_str().replace(',', "")).ok()
}

fn add_transaction(session: &mut Session, text: &str, now: NaiveDateTime) -> Option<String> {
    let amount = extract_amount(text)?;
    let description = text.trim();
    let category = session.categorizer().classify(description);
    let signed = if category.is_income() { amount } else { -amount };
    session.record(now, description, signed, None);

    let money = session.settings().money(amount);
    Some(format!(
        "✅ Transaction added!\nAmount: {money}\nCategory: {category}\nDescription: {description}\n\nYour budget status updated."
    ))
}

fn budget_status(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let settings = session.settings();
    let mut out = String::from("💰 BUDGET STATUS\n\n");
    let _ = writeln!(
        out,
        "Total Spent: {}\n",
        settings.money(session.ledger().total_spent())
    );
    for s in session.statuses() {
        match s.limit {
            BudgetLimit::Bounded(limit) => {
                let _ = writeln!(
                    out,
                    "{} {}: {}/{} ({}%)",
                    s.tier.icon(),
                    s.category,
                    settings.money(s.spent),
                    settings.money(limit),
                    format_amount(s.pct_used)
                );
            }
            BudgetLimit::Unbounded => {
                let _ = writeln!(
                    out,
                    "{} {}: {} (no limit)",
                    s.tier.icon(),
                    s.category,
                    settings.money(s.spent)
                );
            }
        }
    }
    Some(out)
}

fn summary(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let ledger = session.ledger();
    if ledger.is_empty() {
        return Some("📊 No transactions yet. Add some expenses to see your summary!".to_string());
    }
    let settings = session.settings();
    let mut out = String::from("📊 SPENDING SUMMARY\n\n");
    let _ = writeln!(out, "Total Expenses: {}\n", settings.money(ledger.total_spent()));
    out.push_str("Top Categories:\n");
    for (i, (category, spent)) in ledger.top_categories(SUMMARY_CATEGORIES).iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {}", i + 1, category, settings.money(*spent));
    }
    Some(out)
}

fn top_expenses(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let top = session.ledger().top_expenses(TOP_EXPENSES);
    if top.is_empty() {
        return Some("No transactions recorded yet.".to_string());
    }
    let settings = session.settings();
    let mut out = String::from("🏆 TOP EXPENSES\n\n");
    for (i, t) in top.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} ({})",
            i + 1,
            settings.money(t.magnitude()),
            t.description,
            t.category
        );
    }
    Some(out)
}

fn insights(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let evaluator = session.evaluator();
    let ledger = session.ledger();

    let exceeded = evaluator.categories_at(ledger, Tier::Exceeded);
    if !exceeded.is_empty() {
        return Some(format!(
            "⚠️ ALERT: You've exceeded budget in {}. Cut back on these categories!\n\nTip: Try to reduce discretionary spending and focus on essentials.",
            join_labels(&exceeded)
        ));
    }
    let warning = evaluator.categories_at(ledger, Tier::Warning);
    if !warning.is_empty() {
        return Some(format!(
            "📢 WARNING: You're near budget limit in {}.\n\nTip: Be careful with upcoming expenses in these categories.",
            join_labels(&warning)
        ));
    }
    Some(
        "✨ Great Job! Your spending is under control.\n\nTip: Continue tracking and maintain your budget discipline!"
            .to_string(),
    )
}

fn recent(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let recent = session.ledger().recent(RECENT_TRANSACTIONS);
    if recent.is_empty() {
        return Some("📋 No transactions yet. Add some to see your history!".to_string());
    }
    let mut out = String::from("📋 RECENT TRANSACTIONS\n\n");
    for t in recent {
        let _ = write!(
            out,
            "{} - {}\nCategory: {}\nDate: {}\n\n",
            signed_money(session, t),
            t.description,
            t.category,
            format_timestamp(t.timestamp)
        );
    }
    Some(out)
}

fn help(session: &mut Session, _text: &str, _now: NaiveDateTime) -> Option<String> {
    let sym = &session.settings().currency_symbol;
    Some(format!(
        "🤖 BUDGET BOT COMMANDS\n\nYou can ask me:\n\
         • 'Add {sym}500 for groceries' - Add a transaction\n\
         • 'Show budget status' - View budget progress\n\
         • 'Spending summary' - Get expense overview\n\
         • 'Top expenses' - See highest spending\n\
         • 'Recent transactions' - View transaction history\n\
         • 'Give me insights' - Get financial advice\n\
         • 'Help' - Show this menu"
    ))
}

fn greeting(session: &Session) -> String {
    let sym = &session.settings().currency_symbol;
    format!(
        "👋 Hi! I'm your Budget Planner Bot. Type 'help' to see what I can do!\n\n\
         Or try:\n• 'Add {sym}1000 for dining'\n• 'Show budget status'\n• 'Spending summary'"
    )
}

fn signed_money(session: &Session, t: &Transaction) -> String {
    let money = session.settings().money(t.magnitude());
    if t.is_expense() {
        format!("-{money}")
    } else {
        money
    }
}

fn join_labels(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn ask(session: &mut Session, text: &str) -> Reply {
        route(session, text, now())
    }

    #[test]
    fn test_add_transaction_records_outflow() {
        let mut s = Session::default();
        let r = ask(&mut s, "Add 500 for dining");
        assert_eq!(r.intent, Intent::AddTransaction);
        assert!(r.text.contains("₹500"), "{}", r.text);
        assert!(r.text.contains("Category: Dining"));

        let txns = s.ledger().transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, dec!(-500));
        assert_eq!(txns[0].category, Category::Dining);
        assert_eq!(txns[0].method, "Card");
        assert_eq!(txns[0].timestamp, now());
        assert_eq!(s.ledger().spent(Category::Dining), dec!(500));
    }

    #[test]
    fn test_add_trigger_words() {
        let mut s = Session::default();
        assert_eq!(ask(&mut s, "new expense 120 coffee").intent, Intent::AddTransaction);
        assert_eq!(ask(&mut s, "log transaction 75 metro").intent, Intent::AddTransaction);
        let txns = s.ledger().transactions();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, dec!(-120));
        assert_eq!(txns[1].category, Category::Transport);
    }

    #[test]
    fn test_add_income_is_stored_positive() {
        let mut s = Session::default();
        ask(&mut s, "add salary 30,000");
        let t = &s.ledger().transactions()[0];
        assert_eq!(t.category, Category::Income);
        assert_eq!(t.amount, dec!(30000));
        assert_eq!(s.ledger().total_spent(), Decimal::ZERO);
    }

    #[test]
    fn test_extract_amount() {
        assert_eq!(extract_amount("Add ₹1,250.50 for dinner"), Some(dec!(1250.50)));
        assert_eq!(extract_amount("spent 40 on 2 pizzas"), Some(dec!(40)));
        assert_eq!(extract_amount("no digits here"), None);
    }

    #[test]
    fn test_add_without_amount_falls_through() {
        let mut s = Session::default();
        // "add" triggers the first route but there is no amount, and no
        // other trigger matches.
        let r = ask(&mut s, "add something");
        assert_eq!(r.intent, Intent::Default);
        assert!(s.ledger().is_empty());

        let r = ask(&mut s, "add to my budget");
        assert_eq!(r.intent, Intent::BudgetStatus);
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn test_budget_status_lists_every_category() {
        let mut s = Session::default();
        ask(&mut s, "spent 1900 on dinner");
        let r = ask(&mut s, "Show budget status");
        assert_eq!(r.intent, Intent::BudgetStatus);
        assert!(r.text.contains("Total Spent: ₹1900"));
        assert!(r.text.contains("🟠 Dining: ₹1900/₹2000 (95%)"), "{}", r.text);
        assert!(r.text.contains("🟢 Groceries: ₹0/₹5000 (0%)"));
        assert!(r.text.contains("Income: ₹0 (no limit)"));
    }

    #[test]
    fn test_summary_empty_and_filled() {
        let mut s = Session::default();
        let r = ask(&mut s, "Spending summary please");
        // "spending" is a budget trigger and wins by table order
        assert_eq!(r.intent, Intent::BudgetStatus);

        let r = ask(&mut s, "summary");
        assert_eq!(r.intent, Intent::Summary);
        assert_eq!(r.text, "📊 No transactions yet. Add some expenses to see your summary!");

        ask(&mut s, "add 300 uber");
        ask(&mut s, "add 1200 grocery");
        let r = ask(&mut s, "How much so far?");
        assert_eq!(r.intent, Intent::Summary);
        assert!(r.text.contains("Total Expenses: ₹1500"));
        assert!(r.text.contains("1. Groceries: ₹1200"));
        assert!(r.text.contains("2. Transport: ₹300"));
    }

    #[test]
    fn test_top_expenses() {
        let mut s = Session::default();
        let r = ask(&mut s, "top");
        assert_eq!(r.text, "No transactions recorded yet.");

        for msg in ["add 100 pizza", "add 900 amazon", "add 400 movie", "add 50 cafe"] {
            ask(&mut s, msg);
        }
        let r = ask(&mut s, "highest");
        assert_eq!(r.intent, Intent::TopExpenses);
        let lines: Vec<&str> = r.text.lines().filter(|l| l.starts_with(char::is_numeric)).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("1. ₹900 - add 900 amazon (Shopping)"));
        assert!(lines[1].contains("₹400"));
        assert!(lines[2].contains("₹100"));
    }

    #[test]
    fn test_insights_priority() {
        let mut s = Session::default();
        let r = ask(&mut s, "any advice?");
        assert_eq!(r.intent, Intent::Insights);
        assert!(r.text.starts_with("✨ Great Job!"));

        // 95% of the dining limit is WARNING, not CAUTION
        ask(&mut s, "spent 1900 on dinner");
        let r = ask(&mut s, "give me a tip");
        assert!(r.text.starts_with("📢 WARNING"), "{}", r.text);
        assert!(r.text.contains("Dining"));

        ask(&mut s, "spent 1200 movie tickets");
        let r = ask(&mut s, "insights");
        assert!(r.text.starts_with("⚠️ ALERT"));
        assert!(r.text.contains("Entertainment"));
        assert!(!r.text.contains("Dining"));
    }

    #[test]
    fn test_recent_is_most_recent_first() {
        let mut s = Session::default();
        let r = ask(&mut s, "history");
        assert_eq!(r.intent, Intent::Recent);
        assert!(r.text.starts_with("📋 No transactions yet"));

        ask(&mut s, "add 10 cafe");
        ask(&mut s, "add 20 metro");
        let r = ask(&mut s, "recent");
        let first = r.text.find("metro").unwrap();
        let second = r.text.find("cafe").unwrap();
        assert!(first < second);
        assert!(r.text.contains("-₹20 - add 20 metro"));
        assert!(r.text.contains("Date: 2025-11-10 12:30:00"));
    }

    #[test]
    fn test_help_and_default() {
        let mut s = Session::default();
        assert_eq!(ask(&mut s, "help").intent, Intent::Help);
        assert_eq!(ask(&mut s, "What can you do").intent, Intent::Help);
        assert_eq!(ask(&mut s, "list commands").intent, Intent::Help);

        let r = ask(&mut s, "hello there");
        assert_eq!(r.intent, Intent::Default);
        assert!(r.text.starts_with("👋 Hi!"));
        let r = ask(&mut s, "");
        assert_eq!(r.intent, Intent::Default);
    }

    #[test]
    fn test_huge_amounts_never_panic() {
        let mut s = Session::default();
        for _ in 0..2 {
            let r = ask(&mut s, "add 50000000000000000000000000000 dinner");
            assert_eq!(r.intent, Intent::AddTransaction);
        }
        assert_eq!(s.ledger().len(), 2);
        assert_eq!(s.ledger().spent(Category::Dining), Decimal::MAX);

        let r = ask(&mut s, "budget");
        assert!(r.text.contains("🔴 Dining"), "{}", r.text);
        assert_eq!(ask(&mut s, "summary").intent, Intent::Summary);
        assert_eq!(ask(&mut s, "top").intent, Intent::TopExpenses);
        assert!(ask(&mut s, "insights").text.starts_with("⚠️ ALERT"));
        assert_eq!(ask(&mut s, "recent").intent, Intent::Recent);

        // too large for a decimal: no amount, so the add route declines
        let r = ask(&mut s, "add 99999999999999999999999999999999 dinner");
        assert_eq!(r.intent, Intent::Default);
        assert_eq!(s.ledger().len(), 2);
    }

    #[test]
    fn test_only_add_mutates() {
        let mut s = Session::default();
        ask(&mut s, "add 250 dinner");
        for msg in ["budget", "summary", "top", "tips", "recent", "help", "hi"] {
            ask(&mut s, msg);
        }
        assert_eq!(s.ledger().len(), 1);
    }
}
