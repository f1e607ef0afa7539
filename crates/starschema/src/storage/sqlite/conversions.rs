//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and star schema rows.
//! Money columns are stored as TEXT in `Decimal` notation so values read
//! back exactly as they were built.

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;

use starschema_core::storage::{SalesReportRow, StoredSale};
use starschema_core::transform::{
    CustomerDim, DateDim, LocationDim, MovieDim, SalesFact,
};

// ============================================================================
// Dimension conversions
// ============================================================================

/// Convert a SQLite row to a DateDim.
///
/// Expected columns: date_key, full_date, day, month, quarter, year, day_of_week, day_name, month_name, is_weekend
pub fn row_to_date(row: &Row) -> rusqlite::Result<DateDim> {
    let full_date: String = row.get(1)?;

    Ok(DateDim {
        date_key: row.get(0)?,
        full_date: parse_date(1, &full_date)?,
        day: row.get(2)?,
        month: row.get(3)?,
        quarter: row.get(4)?,
        year: row.get(5)?,
        day_of_week: row.get(6)?,
        day_name: row.get(7)?,
        month_name: row.get(8)?,
        is_weekend: row.get(9)?,
    })
}

/// Convert a SQLite row to a CustomerDim.
///
/// Expected columns: customer_key, customer_id, customer_name, gender
pub fn row_to_customer(row: &Row) -> rusqlite::Result<CustomerDim> {
    let gender: String = row.get(3)?;

    Ok(CustomerDim {
        customer_key: row.get(0)?,
        customer_id: row.get(1)?,
        customer_name: row.get(2)?,
        gender: parse_enum(3, &gender)?,
    })
}

/// Convert a SQLite row to a MovieDim.
///
/// Expected columns: movie_key, movie_id, movie_title, base_price, price_category
pub fn row_to_movie(row: &Row) -> rusqlite::Result<MovieDim> {
    let category: String = row.get(4)?;

    Ok(MovieDim {
        movie_key: row.get(0)?,
        movie_id: row.get(1)?,
        movie_title: row.get(2)?,
        base_price: get_money(row, 3)?,
        price_category: parse_enum(4, &category)?,
    })
}

/// Convert a SQLite row to a LocationDim.
///
/// Expected columns: location_key, location_name, location_type, region
pub fn row_to_location(row: &Row) -> rusqlite::Result<LocationDim> {
    let location_type: String = row.get(2)?;

    Ok(LocationDim {
        location_key: row.get(0)?,
        location_name: row.get(1)?,
        location_type: parse_enum(2, &location_type)?,
        region: row.get(3)?,
    })
}

// ============================================================================
// Fact conversions
// ============================================================================

/// Convert a SQLite row to a StoredSale.
///
/// Expected columns: sales_id, date_key, customer_key, movie_key, location_key, transaction_id,
/// quantity, base_price, discount_amount, final_price, discount_percentage, profit_margin
pub fn row_to_sale(row: &Row) -> rusqlite::Result<StoredSale> {
    Ok(StoredSale {
        sales_id: row.get(0)?,
        fact: SalesFact {
            date_key: row.get(1)?,
            customer_key: row.get(2)?,
            movie_key: row.get(3)?,
            location_key: row.get(4)?,
            transaction_id: row.get(5)?,
            quantity: row.get(6)?,
            base_price: get_money(row, 7)?,
            discount_amount: get_money(row, 8)?,
            final_price: get_money(row, 9)?,
            discount_percentage: get_money(row, 10)?,
            profit_margin: get_money(row, 11)?,
        },
    })
}

/// Convert a row of the sales report join.
///
/// Expected columns: sales_id, full_date, customer_name, movie_title, location_name,
/// quantity, base_price, final_price, discount_percentage, profit_margin
pub fn row_to_report(row: &Row) -> rusqlite::Result<SalesReportRow> {
    let full_date: String = row.get(1)?;

    Ok(SalesReportRow {
        sales_id: row.get(0)?,
        full_date: parse_date(1, &full_date)?,
        customer_name: row.get(2)?,
        movie_title: row.get(3)?,
        location_name: row.get(4)?,
        quantity: row.get(5)?,
        base_price: get_money(row, 6)?,
        final_price: get_money(row, 7)?,
        discount_percentage: get_money(row, 8)?,
        profit_margin: get_money(row, 9)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Format a decimal for a TEXT money column, keeping its exact value.
pub fn money_to_sql(value: &Decimal) -> String {
    value.to_string()
}

/// Read a TEXT money column back as a decimal.
fn get_money(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let value: String = row.get(idx)?;
    parse_money(idx, &value)
}

fn parse_money(idx: usize, s: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse one of the string-coded enums (gender, price category, location type).
fn parse_enum<T>(idx: usize, s: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    s.parse()
        .map_err(|message: String| conversion_error(idx, Type::Text, message))
}

fn conversion_error(idx: usize, ty: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        ty,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_text_keeps_exact_value() {
        let price = Decimal::new(4499, 3);

        let text = money_to_sql(&price);

        assert_eq!(text, "4.499");
        assert_eq!(parse_money(0, &text).unwrap(), price);
        assert_eq!(parse_money(0, "4.50").unwrap().to_string(), "4.50");
        assert!(parse_money(0, "four").is_err());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        assert_eq!(format_date(&date), "2023-10-01");
        assert_eq!(parse_date(0, "2023-10-01").unwrap(), date);
        assert!(parse_date(0, "10/01/2023").is_err());
    }

    #[test]
    fn test_parse_enum() {
        use starschema_core::transform::{Gender, PriceCategory};

        assert_eq!(parse_enum::<Gender>(0, "F").unwrap(), Gender::Female);
        assert_eq!(
            parse_enum::<PriceCategory>(0, "Premium").unwrap(),
            PriceCategory::Premium
        );
        assert!(parse_enum::<Gender>(0, "P").is_err());
    }
}
