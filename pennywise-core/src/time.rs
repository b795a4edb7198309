//! Time utilities: timezone-aware "now" and transaction date parsing.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timestamp format used in replies, reports and the HTTP API.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Current wall-clock time in `tz`, without the offset.
pub fn now_in(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Parse a transaction date. Accepts a full timestamp or a bare date
/// (midnight). Returns `None` when no known format matches.
pub fn parse_transaction_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
