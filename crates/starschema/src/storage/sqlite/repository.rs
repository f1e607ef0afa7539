//! SQLite repository implementation.
//!
//! Implements `StarSchemaRepository` from `starschema_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use starschema_core::storage::{
    RepositoryError, Result, SalesReportRow, StarSchemaRepository, StoredSale, Table,
};
use starschema_core::transform::{CustomerDim, DateDim, LocationDim, MovieDim, SalesFact};

use super::conversions::{
    format_date, money_to_sql, row_to_customer, row_to_date, row_to_location, row_to_movie,
    row_to_report, row_to_sale,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Path that selects an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based star schema sink.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens a file-based database, or an in-memory one for `:memory:`.
    ///
    /// The database file will be created if it doesn't exist. Tables are
    /// only created by [`StarSchemaRepository::create_tables`].
    pub async fn new(path: &str) -> Result<Self> {
        if path == IN_MEMORY_PATH {
            return Self::new_in_memory().await;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_connection(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_connection(&conn).await?;

        Ok(Self { conn })
    }

    /// Enables foreign key enforcement for this connection.
    async fn init_connection(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }

    /// Runs a SELECT that returns a full table through `map_row`.
    async fn select_all<T, F>(
        &self,
        sql: &'static str,
        table: &'static str,
        map_row: F,
    ) -> Result<Vec<T>>
    where
        T: Send + 'static,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt.query_map([], map_row).map_err(wrap_err)?;

                let mut result = Vec::new();
                for row_result in rows {
                    result.push(row_result.map_err(wrap_err)?);
                }
                Ok(result)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, table))
    }
}

// ============================================================================
// StarSchemaRepository implementation
// ============================================================================

#[async_trait]
impl StarSchemaRepository for SqliteRepository {
    async fn create_tables(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::DROP_TABLES).map_err(wrap_err)?;
                conn.execute_batch(schema::CREATE_TABLES)
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn insert_dates(&self, rows: &[DateDim]) -> Result<()> {
        let rows = rows.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_DATE).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.date_key,
                            format_date(&row.full_date),
                            row.day,
                            row.month,
                            row.quarter,
                            row.year,
                            row.day_of_week,
                            row.day_name,
                            row.month_name,
                            row.is_weekend,
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Table::DimDate.name()))
    }

    async fn insert_customers(&self, rows: &[CustomerDim]) -> Result<()> {
        let rows = rows.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_CUSTOMER).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.customer_key,
                            row.customer_id,
                            row.customer_name,
                            row.gender.as_str(),
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Table::DimCustomer.name()))
    }

    async fn insert_movies(&self, rows: &[MovieDim]) -> Result<()> {
        let rows = rows.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_MOVIE).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.movie_key,
                            row.movie_id,
                            row.movie_title,
                            money_to_sql(&row.base_price),
                            row.price_category.as_str(),
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Table::DimMovie.name()))
    }

    async fn insert_locations(&self, rows: &[LocationDim]) -> Result<()> {
        let rows = rows.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_LOCATION).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.location_key,
                            row.location_name,
                            row.location_type.as_str(),
                            row.region,
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Table::DimLocation.name()))
    }

    async fn insert_sales(&self, rows: &[SalesFact]) -> Result<()> {
        let rows = rows.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_SALE).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.date_key,
                            row.customer_key,
                            row.movie_key,
                            row.location_key,
                            row.transaction_id,
                            row.quantity,
                            money_to_sql(&row.base_price),
                            money_to_sql(&row.discount_amount),
                            money_to_sql(&row.final_price),
                            money_to_sql(&row.discount_percentage),
                            money_to_sql(&row.profit_margin),
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, Table::FactSales.name()))
    }

    async fn list_dates(&self) -> Result<Vec<DateDim>> {
        self.select_all(schema::SELECT_DATES, Table::DimDate.name(), row_to_date)
            .await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerDim>> {
        self.select_all(
            schema::SELECT_CUSTOMERS,
            Table::DimCustomer.name(),
            row_to_customer,
        )
        .await
    }

    async fn list_movies(&self) -> Result<Vec<MovieDim>> {
        self.select_all(schema::SELECT_MOVIES, Table::DimMovie.name(), row_to_movie)
            .await
    }

    async fn list_locations(&self) -> Result<Vec<LocationDim>> {
        self.select_all(
            schema::SELECT_LOCATIONS,
            Table::DimLocation.name(),
            row_to_location,
        )
        .await
    }

    async fn list_sales(&self) -> Result<Vec<StoredSale>> {
        self.select_all(schema::SELECT_SALES, Table::FactSales.name(), row_to_sale)
            .await
    }

    async fn sales_report(&self) -> Result<Vec<SalesReportRow>> {
        self.select_all(
            schema::SELECT_SALES_REPORT,
            Table::FactSales.name(),
            row_to_report,
        )
        .await
    }

    async fn count_rows(&self, table: Table) -> Result<usize> {
        let sql = schema::count_rows(table.name());

        self.conn
            .call(move |conn| {
                let count: i64 = conn
                    .query_row(&sql, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                Ok(count)
            })
            .await
            .map(|count| count.max(0) as usize)
            .map_err(|e| map_tokio_rusqlite_error(e, table.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use starschema_core::source::sample_records;
    use starschema_core::transform::{build_star_schema, PriceCategory, StarSchema};

    async fn loaded_repository() -> (SqliteRepository, StarSchema) {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let schema = build_star_schema(&sample_records()).unwrap();

        repo.create_tables().await.unwrap();
        repo.load(&schema).await.unwrap();

        (repo, schema)
    }

    #[tokio::test]
    async fn test_dimensions_round_trip() {
        let (repo, schema) = loaded_repository().await;

        assert_eq!(repo.list_dates().await.unwrap(), schema.dates);
        assert_eq!(repo.list_customers().await.unwrap(), schema.customers);
        assert_eq!(repo.list_movies().await.unwrap(), schema.movies);
        assert_eq!(repo.list_locations().await.unwrap(), schema.locations);
    }

    #[tokio::test]
    async fn test_money_reads_back_exactly() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let mut records = sample_records();
        records.movies[0].price = Decimal::new(4499, 3);
        let schema = build_star_schema(&records).unwrap();
        repo.create_tables().await.unwrap();
        repo.load(&schema).await.unwrap();

        let movies = repo.list_movies().await.unwrap();

        assert_eq!(movies[0].base_price.to_string(), "4.499");
        assert_eq!(movies[0].price_category, PriceCategory::Budget);
        assert_eq!(movies, schema.movies);
    }

    #[tokio::test]
    async fn test_sales_get_sequential_ids() {
        let (repo, schema) = loaded_repository().await;

        let sales = repo.list_sales().await.unwrap();

        let ids: Vec<i64> = sales.iter().map(|s| s.sales_id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        let facts: Vec<SalesFact> = sales.into_iter().map(|s| s.fact).collect();
        assert_eq!(facts, schema.sales);
    }

    #[tokio::test]
    async fn test_sales_report_join() {
        let (repo, _) = loaded_repository().await;

        let report = repo.sales_report().await.unwrap();

        assert_eq!(report.len(), 7);
        assert_eq!(report[0].customer_name, "Alice");
        assert_eq!(report[0].movie_title, "Inception");
        assert_eq!(report[0].location_name, "Cinema A");
        assert_eq!(report[0].final_price, Decimal::new(450, 2));
        assert_eq!(report[6].location_name, "Online");
    }

    #[tokio::test]
    async fn test_count_rows() {
        let (repo, schema) = loaded_repository().await;

        for (table, (name, expected)) in Table::ALL.into_iter().zip(schema.row_counts()) {
            assert_eq!(table.name(), name);
            assert_eq!(repo.count_rows(table).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_create_tables_discards_previous_run() {
        let (repo, schema) = loaded_repository().await;

        repo.create_tables().await.unwrap();
        assert_eq!(repo.count_rows(Table::FactSales).await.unwrap(), 0);

        repo.load(&schema).await.unwrap();
        let ids: Vec<i64> = repo
            .list_sales()
            .await
            .unwrap()
            .iter()
            .map(|s| s.sales_id)
            .collect();
        assert_eq!(ids.first(), Some(&1));
    }

    #[tokio::test]
    async fn test_duplicate_dimension_key_is_rejected() {
        let (repo, schema) = loaded_repository().await;

        let result = repo.insert_customers(&schema.customers[..1]).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "dim_customer",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_fact_with_unknown_dimension_is_rejected() {
        let (repo, schema) = loaded_repository().await;
        let mut orphan = schema.sales[0].clone();
        orphan.location_key = 42;

        let result = repo.insert_sales(&[orphan]).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_query_before_create_fails() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        assert!(matches!(
            repo.list_dates().await,
            Err(RepositoryError::QueryFailed(_))
        ));
    }
}
