mod loader;
mod sample_data;
mod types;
mod validation;

pub use loader::parse_source_records;
pub use sample_data::sample_records;
pub use types::{Customer, Movie, SourceRecords, Transaction, TransactionItem};
pub use validation::validate_source_records;
