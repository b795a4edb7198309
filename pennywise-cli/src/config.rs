//! `~/.pennywise/config.toml`: budget limits, tier scheme, session settings
//! and an optional replacement keyword table.

use anyhow::{bail, Context, Result};
use pennywise_core::time::parse_timezone;
use pennywise_core::{
    BudgetEvaluator, BudgetLimit, BudgetTable, Categorizer, Category, KeywordRule, Session,
    Settings, TierScheme,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_pennywise_home;

/// Written by `pennywise config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# pennywise configuration

[budget]
# "graduated": >=100% EXCEEDED, >=90% WARNING, >=70% CAUTION
# "coarse":    <=80% OK, <=100% WARNING, >100% EXCEEDED
scheme = "graduated"

# Per-category monthly limits. Categories not listed keep their defaults.
[budget.limits]
Groceries = 5000
"Food Delivery" = 2000
Dining = 2000
Transport = 3000
Entertainment = 1000
Subscriptions = 1000
Shopping = 4000
Bills = 5000
Healthcare = 1500
Education = 3000
Income = "unbounded"
Others = 2000

[session]
currency_symbol = "₹"
default_method = "Card"
timezone = "Asia/Kolkata"

# Uncomment to replace the built-in keyword table. Order matters: the first
# keyword found in a description decides its category.
# [[keywords]]
# keyword = "swiggy"
# category = "Food Delivery"
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<KeywordRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetSection {
    #[serde(default)]
    pub scheme: TierScheme,
    /// Category label -> limit.
    #[serde(default)]
    pub limits: BTreeMap<String, LimitValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitValue {
    Amount(Decimal),
    /// Only "unbounded" (or "inf") is accepted.
    Keyword(String),
}

impl LimitValue {
    fn to_limit(&self) -> Result<BudgetLimit> {
        match self {
            LimitValue::Amount(v) if v.is_sign_negative() && !v.is_zero() => {
                bail!("budget limit must not be negative: {v}")
            }
            LimitValue::Amount(v) => Ok(BudgetLimit::Bounded(*v)),
            LimitValue::Keyword(k) if k.eq_ignore_ascii_case("unbounded") || k.eq_ignore_ascii_case("inf") => {
                Ok(BudgetLimit::Unbounded)
            }
            LimitValue::Keyword(k) => bail!("invalid budget limit '{k}' (expected a number or \"unbounded\")"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_method")]
    pub default_method: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_method() -> String {
    "Card".to_string()
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            default_method: default_method(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse config.toml")
    }

    pub fn budget_table(&self) -> Result<BudgetTable> {
        let mut table = BudgetTable::default();
        for (label, value) in &self.budget.limits {
            let category: Category = label
                .parse()
                .with_context(|| format!("[budget.limits] {label}"))?;
            let limit = value
                .to_limit()
                .with_context(|| format!("[budget.limits] {label}"))?;
            table.set(category, limit);
        }
        Ok(table)
    }

    pub fn categorizer(&self) -> Categorizer {
        if self.keywords.is_empty() {
            Categorizer::default()
        } else {
            Categorizer::new(self.keywords.iter().cloned())
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings {
            currency_symbol: self.session.currency_symbol.clone(),
            default_method: self.session.default_method.clone(),
            timezone: parse_timezone(&self.session.timezone).context("[session] timezone")?,
        })
    }

    /// Build an empty session from this configuration.
    pub fn build_session(&self) -> Result<Session> {
        let evaluator = BudgetEvaluator::new(self.budget_table()?, self.budget.scheme);
        Ok(Session::new(self.categorizer(), evaluator, self.settings()?))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pennywise_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    load_config_from(&p)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    Config::from_toml(&s).with_context(|| format!("in {}", p.display()))
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    fs::write(&p, DEFAULT_CONFIG_TOML).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config()?;
    if p.exists() {
        println!("# {}", p.display());
    } else {
        println!("# {} (not found, showing defaults)", p.display());
    }

    let session = cfg.build_session()?;
    let settings = session.settings();
    println!("scheme          = {:?}", session.evaluator().scheme());
    println!("currency_symbol = {}", settings.currency_symbol);
    println!("default_method  = {}", settings.default_method);
    println!("timezone        = {}", settings.timezone);
    println!("keywords        = {}", session.categorizer().rules().len());
    println!();
    for b in session.evaluator().table().budgets() {
        let limit = match b.limit {
            BudgetLimit::Bounded(v) => settings.money(v),
            BudgetLimit::Unbounded => "unbounded".to_string(),
        };
        println!("{:<16} {:>10}", b.category.label(), limit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let cfg = Config::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(cfg.budget.scheme, TierScheme::Graduated);
        assert_eq!(cfg.budget_table().unwrap(), BudgetTable::default());
        assert!(cfg.keywords.is_empty());
        assert_eq!(cfg.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        let session = cfg.build_session().unwrap();
        assert_eq!(session.settings().currency_symbol, "₹");
        assert_eq!(session.evaluator().table(), &BudgetTable::default());
    }

    #[test]
    fn test_partial_overrides() {
        let cfg = Config::from_toml(
            r#"
[budget]
scheme = "coarse"
[budget.limits]
Dining = 2500.50
"food delivery" = "unbounded"
[session]
currency_symbol = "$"
timezone = "America/Chicago"
"#,
        )
        .unwrap();
        let table = cfg.budget_table().unwrap();
        assert_eq!(table.limit(Category::Dining), Some(BudgetLimit::Bounded(dec("2500.50"))));
        assert_eq!(table.limit(Category::FoodDelivery), Some(BudgetLimit::Unbounded));
        assert_eq!(table.limit(Category::Groceries), Some(BudgetLimit::Bounded(dec("5000"))));

        let session = cfg.build_session().unwrap();
        assert_eq!(session.evaluator().scheme(), TierScheme::Coarse);
        assert_eq!(session.settings().currency_symbol, "$");
        assert_eq!(session.settings().default_method, "Card");
        assert_eq!(session.settings().timezone, chrono_tz::America::Chicago);
    }

    #[test]
    fn test_custom_keywords_replace_defaults() {
        let cfg = Config::from_toml(
            r#"
[[keywords]]
keyword = "Coffee"
category = "Dining"

[[keywords]]
keyword = "rent"
category = "Bills"
"#,
        )
        .unwrap();
        let c = cfg.categorizer();
        assert_eq!(c.rules().len(), 2);
        assert_eq!(c.classify("coffee beans"), Category::Dining);
        assert_eq!(c.classify("Grocery Store"), Category::Others);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let unknown = Config::from_toml("[budget.limits]\nRent = 100\n").unwrap();
        assert!(unknown.budget_table().is_err());

        let negative = Config::from_toml("[budget.limits]\nDining = -5\n").unwrap();
        assert!(negative.budget_table().is_err());

        let word = Config::from_toml("[budget.limits]\nDining = \"lots\"\n").unwrap();
        assert!(word.budget_table().is_err());

        let tz = Config::from_toml("[session]\ntimezone = \"Nowhere/Special\"\n").unwrap();
        assert!(tz.build_session().is_err());

        assert!(Config::from_toml("[budget]\nscheme = \"weekly\"\n").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ndefault_method = \"UPI\"\n").unwrap();
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.session.default_method, "UPI");
        assert!(load_config_from(&dir.path().join("missing.toml")).is_err());
    }
}
