use std::collections::HashMap;

use super::date::{calendar_date, date_key};
use super::error::TransformError;
use super::measures::compute_measures;
use super::types::{LocationKeys, SalesFact};
use crate::source::{Customer, Movie, Transaction, TransactionItem};

/// Read access to the records a fact row is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct FactInputs<'a> {
    pub transactions: &'a [Transaction],
    pub customers: &'a [Customer],
    pub movies: &'a [Movie],
    /// Key mapping produced by the location dimension.
    pub location_keys: &'a LocationKeys,
}

/// Builds one sales fact per transaction item, preserving input order.
///
/// Fails on the first item that cannot be fully resolved; no partial output
/// is returned.
pub fn build_sales_facts(
    items: &[TransactionItem],
    inputs: FactInputs<'_>,
) -> Result<Vec<SalesFact>, TransformError> {
    let transactions: HashMap<i64, &Transaction> =
        inputs.transactions.iter().map(|t| (t.id, t)).collect();
    let customers: HashMap<i64, &Customer> = inputs.customers.iter().map(|c| (c.id, c)).collect();
    let movies: HashMap<i64, &Movie> = inputs.movies.iter().map(|m| (m.id, m)).collect();

    items
        .iter()
        .map(|item| {
            let referenced_by = || {
                format!(
                    "item of transaction {} / movie {}",
                    item.transaction_id, item.movie_id
                )
            };

            let transaction = transactions.get(&item.transaction_id).ok_or_else(|| {
                TransformError::ReferentialIntegrity {
                    entity: "Transaction",
                    id: item.transaction_id.to_string(),
                    referenced_by: referenced_by(),
                }
            })?;

            let customer = customers.get(&transaction.customer_id).ok_or_else(|| {
                TransformError::ReferentialIntegrity {
                    entity: "Customer",
                    id: transaction.customer_id.to_string(),
                    referenced_by: format!("transaction {}", transaction.id),
                }
            })?;

            let movie =
                movies
                    .get(&item.movie_id)
                    .ok_or_else(|| TransformError::ReferentialIntegrity {
                        entity: "Movie",
                        id: item.movie_id.to_string(),
                        referenced_by: referenced_by(),
                    })?;

            let location_key = inputs
                .location_keys
                .get(&transaction.location)
                .ok_or_else(|| TransformError::ReferentialIntegrity {
                    entity: "Location",
                    id: transaction.location.clone(),
                    referenced_by: format!("transaction {}", transaction.id),
                })?;

            let measures = compute_measures(item.price, item.discount).ok_or(
                TransformError::DivisionByZero {
                    transaction_id: item.transaction_id,
                    movie_id: item.movie_id,
                },
            )?;

            Ok(SalesFact {
                date_key: date_key(calendar_date(&transaction.timestamp)),
                customer_key: customer.id,
                movie_key: movie.id,
                location_key,
                transaction_id: transaction.id,
                quantity: 1,
                base_price: item.price,
                discount_amount: item.discount,
                final_price: measures.final_price,
                discount_percentage: measures.discount_percentage,
                profit_margin: measures.profit_margin,
            })
        })
        .collect()
}
