use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_timestamp, serialize_timestamp};
use crate::transform::TransformRules;

/// A customer as recorded by the box office system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Raw gender code as entered at the counter ("F", "M", "P", "L", ...).
    #[serde(rename = "gender")]
    pub gender_code: String,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>, gender_code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gender_code: gender_code.into(),
        }
    }
}

/// A movie in the catalogue with its list price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
}

impl Movie {
    pub fn new(id: i64, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            price,
        }
    }
}

/// A purchase made by one customer at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(
        rename = "date",
        deserialize_with = "deserialize_timestamp",
        serialize_with = "serialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    pub location: String,
    pub customer_id: i64,
}

impl Transaction {
    pub fn new(
        id: i64,
        timestamp: NaiveDateTime,
        location: impl Into<String>,
        customer_id: i64,
    ) -> Self {
        Self {
            id,
            timestamp,
            location: location.into(),
            customer_id,
        }
    }
}

/// One ticket sold within a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub movie_id: i64,
    pub transaction_id: i64,
    pub price: Decimal,
    pub discount: Decimal,
}

impl TransactionItem {
    pub fn new(movie_id: i64, transaction_id: i64, price: Decimal, discount: Decimal) -> Self {
        Self {
            movie_id,
            transaction_id,
            price,
            discount,
        }
    }
}

/// The complete, fully materialized input of one ETL run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecords {
    pub customers: Vec<Customer>,
    pub movies: Vec<Movie>,
    pub transactions: Vec<Transaction>,
    pub transaction_items: Vec<TransactionItem>,
    /// Optional override of the alias and region tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<TransformRules>,
}

impl SourceRecords {
    /// Rules to apply to these records, falling back to the defaults.
    pub fn rules(&self) -> TransformRules {
        self.rules.clone().unwrap_or_default()
    }

    /// Total number of records across all four collections.
    pub fn len(&self) -> usize {
        self.customers.len()
            + self.movies.len()
            + self.transactions.len()
            + self.transaction_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
