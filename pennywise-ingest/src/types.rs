use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// One raw `(date, description, amount, method)` row, before cleaning and
/// classification. Fields are kept as text; coercion happens at ingest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    pub description: String,
    /// Signed amount text; negative means outflow.
    pub amount: String,
    pub method: Option<String>,
}

impl RawTransaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
        method: Option<&str>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: amount.into(),
            method: method.map(str::to_string),
        }
    }
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?P<pre>[+-])?\s*(?:₹|\$|€|£|rs\.?|inr|usd)?\s*(?P<post>[+-])?(?P<int>\d{1,3}(?:,\d{3})+|\d+)(?P<frac>\.\d+)?$",
        )
        .expect("invalid amount regex")
    })
}

/// Coerce amount text to a decimal.
///
/// Accepts an optional sign, one leading currency symbol or code (`₹`, `$`,
/// `€`, `£`, `Rs.`, `INR`, `USD`), thousands separators and surrounding
/// whitespace. Anything else, including exponents and stray letters, is not
/// an amount and becomes zero.
pub fn coerce_amount(text: &str) -> Decimal {
    match parse_amount(text) {
        Some(v) => v,
        None => {
            debug!(raw = %text, "non-numeric amount coerced to 0");
            Decimal::ZERO
        }
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    let caps = amount_regex().captures(text.trim())?;
    let negative = match (caps.name("pre"), caps.name("post")) {
        (Some(_), Some(_)) => return None,
        (Some(sign), None) | (None, Some(sign)) => sign.as_str() == "-",
        (None, None) => false,
    };
    let mut digits = caps["int"].replace(',', "");
    if let Some(frac) = caps.name("frac") {
        digits.push_str(frac.as_str());
    }
    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}
