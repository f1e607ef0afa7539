use thiserror::Error;

/// Errors that abort a star schema build.
///
/// Every variant is fatal: a build that returns an error produces no rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A record references an id with no matching record.
    #[error("{entity} {id} not found (referenced by {referenced_by})")]
    ReferentialIntegrity {
        entity: &'static str,
        id: String,
        referenced_by: String,
    },
    /// A percentage measure would divide by a zero price.
    #[error("Division by zero price for movie {movie_id} in transaction {transaction_id}")]
    DivisionByZero { transaction_id: i64, movie_id: i64 },
    /// A source record has a malformed shape or breaks its data contract.
    #[error("Invalid {entity} {key}: {reason}")]
    Precondition {
        entity: &'static str,
        key: String,
        reason: String,
    },
}

impl TransformError {
    /// Short category name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TransformError::ReferentialIntegrity { .. } => "referential_integrity",
            TransformError::DivisionByZero { .. } => "arithmetic",
            TransformError::Precondition { .. } => "precondition",
        }
    }
}
