//! Transaction sources: CSV exports and the built-in demo set.

pub mod csv_file;
pub mod sample;

pub use csv_file::load_csv;
pub use sample::sample_transactions;
