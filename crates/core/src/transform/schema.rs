use std::collections::HashSet;

use super::customer::build_customer_dimension;
use super::date::build_date_dimension;
use super::error::TransformError;
use super::fact::{build_sales_facts, FactInputs};
use super::location::build_location_dimension;
use super::movie::build_movie_dimension;
use super::types::StarSchema;
use crate::source::{validate_source_records, SourceRecords};

/// Runs every builder over the source records.
///
/// The location dimension is built before the facts and its key mapping is
/// handed to the fact builder. The result is checked for referential
/// completeness before it is returned.
pub fn build_star_schema(records: &SourceRecords) -> Result<StarSchema, TransformError> {
    validate_source_records(records)?;
    let rules = records.rules();

    let dates = build_date_dimension(&records.transactions);
    let customers = build_customer_dimension(&records.customers, &rules);
    let movies = build_movie_dimension(&records.movies);
    let (locations, location_keys) = build_location_dimension(&records.transactions, &rules);

    let sales = build_sales_facts(
        &records.transaction_items,
        FactInputs {
            transactions: &records.transactions,
            customers: &records.customers,
            movies: &records.movies,
            location_keys: &location_keys,
        },
    )?;

    let schema = StarSchema {
        dates,
        customers,
        movies,
        locations,
        sales,
    };
    check_referential_integrity(&schema)?;
    Ok(schema)
}

/// Verifies that every key a fact references exists in its dimension.
pub fn check_referential_integrity(schema: &StarSchema) -> Result<(), TransformError> {
    let dates: HashSet<u32> = schema.dates.iter().map(|d| d.date_key).collect();
    let customers: HashSet<i64> = schema.customers.iter().map(|c| c.customer_key).collect();
    let movies: HashSet<i64> = schema.movies.iter().map(|m| m.movie_key).collect();
    let locations: HashSet<u32> = schema.locations.iter().map(|l| l.location_key).collect();

    for fact in &schema.sales {
        let referenced_by = || {
            format!(
                "sales fact of transaction {} / movie {}",
                fact.transaction_id, fact.movie_key
            )
        };
        let missing = if !dates.contains(&fact.date_key) {
            Some(("DateDim", fact.date_key.to_string()))
        } else if !customers.contains(&fact.customer_key) {
            Some(("CustomerDim", fact.customer_key.to_string()))
        } else if !movies.contains(&fact.movie_key) {
            Some(("MovieDim", fact.movie_key.to_string()))
        } else if !locations.contains(&fact.location_key) {
            Some(("LocationDim", fact.location_key.to_string()))
        } else {
            None
        };

        if let Some((entity, id)) = missing {
            return Err(TransformError::ReferentialIntegrity {
                entity,
                id,
                referenced_by: referenced_by(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_records;
    use crate::transform::TransformRules;
    use rust_decimal::Decimal;

    #[test]
    fn test_sample_row_counts() {
        let schema = build_star_schema(&sample_records()).unwrap();

        assert_eq!(
            schema.row_counts(),
            [
                ("dim_date", 3),
                ("dim_customer", 4),
                ("dim_movie", 5),
                ("dim_location", 3),
                ("fact_sales", 7),
            ]
        );
    }

    #[test]
    fn test_every_fact_key_resolves() {
        let schema = build_star_schema(&sample_records()).unwrap();
        assert!(check_referential_integrity(&schema).is_ok());

        for fact in &schema.sales {
            assert!(schema.dates.iter().any(|d| d.date_key == fact.date_key));
            assert!(schema
                .customers
                .iter()
                .any(|c| c.customer_key == fact.customer_key));
            assert!(schema.movies.iter().any(|m| m.movie_key == fact.movie_key));
            assert!(schema
                .locations
                .iter()
                .any(|l| l.location_key == fact.location_key));
        }
    }

    #[test]
    fn test_rebuild_is_identical() {
        let records = sample_records();
        let first = build_star_schema(&records).unwrap();
        let second = build_star_schema(&records).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_zero_price_aborts_whole_build() {
        let mut records = sample_records();
        records.transaction_items[6].price = Decimal::ZERO;
        records.transaction_items[6].discount = Decimal::ZERO;

        assert_eq!(
            build_star_schema(&records),
            Err(TransformError::DivisionByZero {
                transaction_id: 4,
                movie_id: 201,
            })
        );
    }

    #[test]
    fn test_validation_runs_first() {
        let mut records = sample_records();
        records.movies.push(records.movies[0].clone());

        assert!(matches!(
            build_star_schema(&records),
            Err(TransformError::Precondition { entity: "Movie", .. })
        ));
    }

    #[test]
    fn test_blank_names_build_as_empty() {
        let mut records = sample_records();
        records.customers[0].name = "   ".to_string();
        records.movies[0].title = "\t".to_string();

        let schema = build_star_schema(&records).unwrap();

        assert_eq!(schema.customers[0].customer_name, "");
        assert_eq!(schema.movies[0].movie_title, "");
        assert_eq!(schema.sales.len(), 7);
    }

    #[test]
    fn test_rules_from_records_are_applied() {
        let mut records = sample_records();
        records.rules = Some(
            TransformRules::default()
                .with_gender_alias("L", "F")
                .with_region("Cinema B", "Harbour"),
        );

        let schema = build_star_schema(&records).unwrap();

        assert!(schema.customers.iter().all(|c| c.gender.as_str() == "F" || c.customer_id == 104));
        assert_eq!(schema.locations[1].region, "Harbour");
    }

    #[test]
    fn test_detects_dangling_fact_key() {
        let mut schema = build_star_schema(&sample_records()).unwrap();
        schema.locations.pop();

        assert!(matches!(
            check_referential_integrity(&schema),
            Err(TransformError::ReferentialIntegrity {
                entity: "LocationDim",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_sources() {
        let schema = build_star_schema(&SourceRecords::default()).unwrap();
        assert_eq!(schema, StarSchema::default());
    }
}
