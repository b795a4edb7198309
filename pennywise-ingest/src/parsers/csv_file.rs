//! Generic transaction CSV:
//!
//!   Date,Description,Amount,Method
//!   2025-11-01,Grocery Store - BigMart,-1200,Card
//!
//! Header names are matched case-insensitively and may appear in any order.
//! `Method` is optional. Rows may be ragged; missing cells read as empty.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use crate::types::RawTransaction;

struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    method: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let (Some(date), Some(description), Some(amount)) =
            (find("date"), find("description"), find("amount"))
        else {
            bail!("CSV header must contain Date, Description and Amount columns");
        };
        Ok(Self {
            date,
            description,
            amount,
            method: find("method"),
        })
    }
}

/// Parse transaction rows from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse transaction rows from any reader.
pub fn read_csv(reader: impl Read) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let cols = Columns::from_header(rdr.headers()?)?;
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let method = cols
            .method
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        rows.push(RawTransaction {
            date: cell(cols.date),
            description: cell(cols.description),
            amount: cell(cols.amount),
            method,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_basic() {
        let data = "Date,Description,Amount,Method\n\
                    2025-11-01,Grocery Store - BigMart,-1200,Card\n\
                    2025-11-03,Salary,30000,Bank Transfer\n";
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Grocery Store - BigMart");
        assert_eq!(rows[0].amount, "-1200");
        assert_eq!(rows[1].method.as_deref(), Some("Bank Transfer"));
    }

    #[test]
    fn test_header_order_and_optional_method() {
        let data = "amount,DATE,description\n-250,2025-11-02,Lunch\n\n";
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2025-11-02");
        assert_eq!(rows[0].amount, "-250");
        assert_eq!(rows[0].method, None);
    }

    #[test]
    fn test_ragged_rows() {
        let data = "Date,Description,Amount,Method\n2025-11-02,Lunch\n";
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows[0].amount, "");
        assert_eq!(rows[0].method, None);
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        let data = "When,What\n2025-11-02,Lunch\n";
        assert!(read_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Description,Amount").unwrap();
        writeln!(file, "2025-11-05,Swiggy Order,-450").unwrap();
        let rows = load_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 1);

        assert!(load_csv("/nonexistent/transactions.csv").is_err());
    }
}
