//! Built-in sample data set.
//!
//! A small box office extract used by the CLI when no source file is given,
//! and by tests as a known fixture: 4 customers, 5 movies, 4 transactions
//! and 7 transaction items.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::types::{Customer, Movie, SourceRecords, Transaction, TransactionItem};

/// Returns the sample records.
///
/// # Example
///
/// ```
/// use starschema_core::source::sample_records;
///
/// let records = sample_records();
/// assert_eq!(records.transaction_items.len(), 7);
/// ```
pub fn sample_records() -> SourceRecords {
    SourceRecords {
        customers: vec![
            Customer::new(101, "Alice", "P"),
            Customer::new(102, "Bob", "L"),
            Customer::new(103, "Charlie", "L"),
            Customer::new(104, "David", "M"),
        ],
        movies: vec![
            Movie::new(201, "Inception", money(500)),
            Movie::new(202, "The Dark Knight", money(450)),
            Movie::new(203, "Interstellar", money(600)),
            Movie::new(204, "Tenet", money(550)),
            Movie::new(205, "Dunkirk", money(400)),
        ],
        transactions: vec![
            Transaction::new(1, at(2023, 10, 1, 10, 0), "Cinema A", 101),
            Transaction::new(2, at(2023, 10, 1, 12, 30), "Cinema B", 102),
            Transaction::new(3, at(2023, 10, 2, 15, 0), "Cinema A", 101),
            Transaction::new(4, at(2023, 10, 3, 11, 0), "Online", 103),
        ],
        transaction_items: vec![
            TransactionItem::new(201, 1, money(500), money(50)),
            TransactionItem::new(202, 1, money(450), money(0)),
            TransactionItem::new(203, 2, money(600), money(50)),
            TransactionItem::new(202, 2, money(450), money(0)),
            TransactionItem::new(204, 3, money(550), money(25)),
            TransactionItem::new(205, 3, money(400), money(0)),
            TransactionItem::new(201, 4, money(500), money(75)),
        ],
        rules: None,
    }
}

/// Amount expressed in cents.
fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Fixture timestamp; a typo in the literals above panics instead of
/// producing a wrong date.
fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("sample timestamp is a valid date and time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_timestamps() {
        let stamps: Vec<String> = sample_records()
            .transactions
            .iter()
            .map(|t| t.timestamp.to_string())
            .collect();

        assert_eq!(
            stamps,
            vec![
                "2023-10-01 10:00:00",
                "2023-10-01 12:30:00",
                "2023-10-02 15:00:00",
                "2023-10-03 11:00:00",
            ]
        );
    }

    #[test]
    #[should_panic(expected = "sample timestamp")]
    fn test_invalid_fixture_timestamp_panics() {
        at(2023, 2, 30, 10, 0);
    }

    #[test]
    fn test_sample_sizes() {
        let records = sample_records();
        assert_eq!(records.customers.len(), 4);
        assert_eq!(records.movies.len(), 5);
        assert_eq!(records.transactions.len(), 4);
        assert_eq!(records.transaction_items.len(), 7);
        assert_eq!(records.len(), 20);
    }

    #[test]
    fn test_sample_references_resolve() {
        let records = sample_records();
        let customers: HashSet<_> = records.customers.iter().map(|c| c.id).collect();
        let movies: HashSet<_> = records.movies.iter().map(|m| m.id).collect();
        let transactions: HashSet<_> = records.transactions.iter().map(|t| t.id).collect();

        assert!(records
            .transactions
            .iter()
            .all(|t| customers.contains(&t.customer_id)));
        assert!(records
            .transaction_items
            .iter()
            .all(|i| movies.contains(&i.movie_id) && transactions.contains(&i.transaction_id)));
    }

    #[test]
    fn test_sample_discounts_within_price() {
        let records = sample_records();
        assert!(records
            .transaction_items
            .iter()
            .all(|i| i.discount >= Decimal::ZERO && i.discount <= i.price));
    }

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(sample_records(), sample_records());
    }
}
