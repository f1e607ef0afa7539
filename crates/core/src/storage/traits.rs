use async_trait::async_trait;

use crate::transform::{CustomerDim, DateDim, LocationDim, MovieDim, SalesFact, StarSchema};

use super::{Result, SalesReportRow, StoredSale, Table};

/// Sink for the star schema: persists rows and reads them back.
///
/// Tables are rebuilt wholesale: `create_tables` discards whatever a previous
/// run stored.
#[async_trait]
pub trait StarSchemaRepository: Send + Sync {
    /// Drops and recreates every table of the schema.
    async fn create_tables(&self) -> Result<()>;

    async fn insert_dates(&self, rows: &[DateDim]) -> Result<()>;

    async fn insert_customers(&self, rows: &[CustomerDim]) -> Result<()>;

    async fn insert_movies(&self, rows: &[MovieDim]) -> Result<()>;

    async fn insert_locations(&self, rows: &[LocationDim]) -> Result<()>;

    /// Inserts facts, assigning `sales_id` in slice order.
    async fn insert_sales(&self, rows: &[SalesFact]) -> Result<()>;

    /// Gets all dates, ordered by date key.
    async fn list_dates(&self) -> Result<Vec<DateDim>>;

    /// Gets all customers, ordered by customer key.
    async fn list_customers(&self) -> Result<Vec<CustomerDim>>;

    /// Gets all movies, ordered by movie key.
    async fn list_movies(&self) -> Result<Vec<MovieDim>>;

    /// Gets all locations, ordered by location key.
    async fn list_locations(&self) -> Result<Vec<LocationDim>>;

    /// Gets all sales, ordered by sales id.
    async fn list_sales(&self) -> Result<Vec<StoredSale>>;

    /// Gets every sale joined with its dimensions, ordered by sales id.
    async fn sales_report(&self) -> Result<Vec<SalesReportRow>>;

    /// Number of rows currently stored in a table.
    async fn count_rows(&self, table: Table) -> Result<usize>;

    /// Loads a built schema, dimensions first.
    async fn load(&self, schema: &StarSchema) -> Result<()> {
        self.insert_dates(&schema.dates).await?;
        self.insert_customers(&schema.customers).await?;
        self.insert_movies(&schema.movies).await?;
        self.insert_locations(&schema.locations).await?;
        self.insert_sales(&schema.sales).await
    }
}
