//! Pure join of persisted rows into the sales report.
//!
//! Backends without a query engine build the report from their stored rows
//! with this function. Semantics match an inner join: a fact whose dimension
//! row is missing is left out.

use std::collections::HashMap;

use super::types::{SalesReportRow, StoredSale};
use crate::transform::{CustomerDim, DateDim, LocationDim, MovieDim};

/// Joins stored sales with their dimensions, ordered by `sales_id`.
pub fn join_sales_report(
    dates: &[DateDim],
    customers: &[CustomerDim],
    movies: &[MovieDim],
    locations: &[LocationDim],
    sales: &[StoredSale],
) -> Vec<SalesReportRow> {
    let dates: HashMap<u32, &DateDim> = dates.iter().map(|d| (d.date_key, d)).collect();
    let customers: HashMap<i64, &CustomerDim> =
        customers.iter().map(|c| (c.customer_key, c)).collect();
    let movies: HashMap<i64, &MovieDim> = movies.iter().map(|m| (m.movie_key, m)).collect();
    let locations: HashMap<u32, &LocationDim> =
        locations.iter().map(|l| (l.location_key, l)).collect();

    let mut rows: Vec<SalesReportRow> = sales
        .iter()
        .filter_map(|sale| {
            let fact = &sale.fact;
            let date = dates.get(&fact.date_key)?;
            let customer = customers.get(&fact.customer_key)?;
            let movie = movies.get(&fact.movie_key)?;
            let location = locations.get(&fact.location_key)?;

            Some(SalesReportRow {
                sales_id: sale.sales_id,
                full_date: date.full_date,
                customer_name: customer.customer_name.clone(),
                movie_title: movie.movie_title.clone(),
                location_name: location.location_name.clone(),
                quantity: fact.quantity,
                base_price: fact.base_price,
                final_price: fact.final_price,
                discount_percentage: fact.discount_percentage,
                profit_margin: fact.profit_margin,
            })
        })
        .collect();

    rows.sort_by_key(|row| row.sales_id);
    rows
}
