//! Loading source records from JSON.
//!
//! Each record is decoded individually so that a malformed record is
//! reported with its entity type and identifying key rather than as a bare
//! serde position.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::SourceRecords;
use crate::transform::{TransformError, TransformRules};

/// Parses a JSON document holding the four source collections.
///
/// Expected shape:
/// `{"customers": [...], "movies": [...], "transactions": [...], "transaction_items": [...]}`
/// with an optional `"rules"` object overriding the transform rules.
pub fn parse_source_records(json: &str) -> Result<SourceRecords, TransformError> {
    let document: Value = serde_json::from_str(json).map_err(|e| TransformError::Precondition {
        entity: "SourceRecords",
        key: "document".to_string(),
        reason: e.to_string(),
    })?;

    let Value::Object(mut root) = document else {
        return Err(TransformError::Precondition {
            entity: "SourceRecords",
            key: "document".to_string(),
            reason: "expected a JSON object".to_string(),
        });
    };

    let rules = match root.remove("rules") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<TransformRules>(value).map_err(|e| {
                TransformError::Precondition {
                    entity: "TransformRules",
                    key: "rules".to_string(),
                    reason: e.to_string(),
                }
            })?,
        ),
    };

    Ok(SourceRecords {
        customers: decode_collection(&mut root, "customers", "Customer", record_key_by_id)?,
        movies: decode_collection(&mut root, "movies", "Movie", record_key_by_id)?,
        transactions: decode_collection(
            &mut root,
            "transactions",
            "Transaction",
            record_key_by_id,
        )?,
        transaction_items: decode_collection(
            &mut root,
            "transaction_items",
            "TransactionItem",
            item_key,
        )?,
        rules,
    })
}

fn decode_collection<T: DeserializeOwned>(
    root: &mut serde_json::Map<String, Value>,
    field: &'static str,
    entity: &'static str,
    key_of: fn(&Value, usize) -> String,
) -> Result<Vec<T>, TransformError> {
    let values = match root.remove(field) {
        Some(Value::Array(values)) => values,
        Some(_) => {
            return Err(TransformError::Precondition {
                entity: "SourceRecords",
                key: field.to_string(),
                reason: "expected an array".to_string(),
            })
        }
        None => {
            return Err(TransformError::Precondition {
                entity: "SourceRecords",
                key: field.to_string(),
                reason: "missing required collection".to_string(),
            })
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let key = key_of(&value, index);
            serde_json::from_value(value).map_err(|e| TransformError::Precondition {
                entity,
                key,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn record_key_by_id(value: &Value, index: usize) -> String {
    match value.get("id") {
        Some(id) if !id.is_null() => id.to_string(),
        _ => format!("#{index}"),
    }
}

fn item_key(value: &Value, index: usize) -> String {
    match (value.get("transaction_id"), value.get("movie_id")) {
        (Some(tx), Some(movie)) => format!("transaction {tx} / movie {movie}"),
        _ => format!("#{index}"),
    }
}
