use std::collections::HashSet;

use chrono::Datelike;
use rust_decimal::Decimal;

use super::types::SourceRecords;
use crate::transform::{TransformError, DATE_KEY_YEARS};

/// Checks the data contract of the source records before any row is built.
///
/// - ids are unique per entity
/// - transaction years fit a `YYYYMMDD` date key
/// - every item satisfies `0 <= discount <= price`
///
/// Dangling references are not checked here; the fact builder reports them
/// with the referencing record.
pub fn validate_source_records(records: &SourceRecords) -> Result<(), TransformError> {
    ensure_unique("Customer", records.customers.iter().map(|c| c.id))?;
    ensure_unique("Movie", records.movies.iter().map(|m| m.id))?;
    ensure_unique("Transaction", records.transactions.iter().map(|t| t.id))?;

    if let Some(transaction) = records
        .transactions
        .iter()
        .find(|t| !DATE_KEY_YEARS.contains(&t.timestamp.year()))
    {
        return Err(TransformError::Precondition {
            entity: "Transaction",
            key: transaction.id.to_string(),
            reason: format!(
                "year {} outside {}..={}",
                transaction.timestamp.year(),
                DATE_KEY_YEARS.start(),
                DATE_KEY_YEARS.end()
            ),
        });
    }

    for item in &records.transaction_items {
        if item.discount < Decimal::ZERO || item.discount > item.price {
            return Err(TransformError::Precondition {
                entity: "TransactionItem",
                key: format!(
                    "transaction {} / movie {}",
                    item.transaction_id, item.movie_id
                ),
                reason: format!(
                    "discount {} outside 0..={}",
                    item.discount, item.price
                ),
            });
        }
    }

    Ok(())
}

fn ensure_unique(
    entity: &'static str,
    ids: impl Iterator<Item = i64>,
) -> Result<(), TransformError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TransformError::Precondition {
                entity,
                key: id.to_string(),
                reason: "duplicate id".to_string(),
            });
        }
    }
    Ok(())
}
