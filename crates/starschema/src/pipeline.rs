//! Imperative shell around the pure transform.
//!
//! Reads source records, builds the star schema, rebuilds the sink's tables
//! and loads them, then reads the persisted rows back for reporting.

use std::path::Path;

use serde::Serialize;

use starschema_core::source::{parse_source_records, sample_records, SourceRecords};
use starschema_core::storage::{SalesReportRow, StarSchemaRepository, StoredSale, Table};
use starschema_core::transform::{
    build_star_schema, CustomerDim, DateDim, LocationDim, MovieDim, StarSchema,
};

use crate::error::PipelineError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Reads source records from a JSON file, or returns the sample data set.
pub async fn load_source(path: Option<&Path>) -> Result<SourceRecords> {
    let Some(path) = path else {
        tracing::debug!("No source file given, using sample data");
        return Ok(sample_records());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::Source {
            path: path.to_path_buf(),
            source,
        })?;

    let records = parse_source_records(&json)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Loaded source records"
    );
    Ok(records)
}

/// Builds the star schema from source records.
pub fn build(records: &SourceRecords) -> Result<StarSchema> {
    let schema = build_star_schema(records)?;
    for (table, rows) in schema.row_counts() {
        tracing::debug!(table, rows, "Built table");
    }
    Ok(schema)
}

/// Builds the star schema and loads it into a freshly created set of tables.
pub async fn run_etl<R>(repo: &R, records: &SourceRecords) -> Result<StarSchema>
where
    R: StarSchemaRepository + ?Sized,
{
    let schema = build(records)?;

    repo.create_tables().await?;
    repo.load(&schema).await?;

    tracing::info!(
        dates = schema.dates.len(),
        customers = schema.customers.len(),
        movies = schema.movies.len(),
        locations = schema.locations.len(),
        sales = schema.sales.len(),
        "Star schema loaded"
    );
    Ok(schema)
}

/// Every persisted table plus the joined sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportData {
    pub dates: Vec<DateDim>,
    pub customers: Vec<CustomerDim>,
    pub movies: Vec<MovieDim>,
    pub locations: Vec<LocationDim>,
    pub facts: Vec<StoredSale>,
    pub sales: Vec<SalesReportRow>,
}

/// Reads every table back from the sink.
pub async fn read_back<R>(repo: &R) -> Result<ReportData>
where
    R: StarSchemaRepository + ?Sized,
{
    Ok(ReportData {
        dates: repo.list_dates().await?,
        customers: repo.list_customers().await?,
        movies: repo.list_movies().await?,
        locations: repo.list_locations().await?,
        facts: repo.list_sales().await?,
        sales: repo.sales_report().await?,
    })
}

/// Row count of one persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: Table,
    pub rows: usize,
}

/// Counts the rows of every table, in load order.
pub async fn count_tables<R>(repo: &R) -> Result<Vec<TableCount>>
where
    R: StarSchemaRepository + ?Sized,
{
    let mut counts = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        counts.push(TableCount {
            table,
            rows: repo.count_rows(table).await?,
        });
    }
    Ok(counts)
}

/// A table that can be read back on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportTable {
    Dates,
    Customers,
    Movies,
    Locations,
    /// Raw fact rows with their `sales_id`.
    Facts,
    /// Facts joined with every dimension.
    Sales,
}

/// Rows of a single table read back from the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableRows {
    Dates(Vec<DateDim>),
    Customers(Vec<CustomerDim>),
    Movies(Vec<MovieDim>),
    Locations(Vec<LocationDim>),
    Facts(Vec<StoredSale>),
    Sales(Vec<SalesReportRow>),
}

impl TableRows {
    pub fn len(&self) -> usize {
        match self {
            TableRows::Dates(rows) => rows.len(),
            TableRows::Customers(rows) => rows.len(),
            TableRows::Movies(rows) => rows.len(),
            TableRows::Locations(rows) => rows.len(),
            TableRows::Facts(rows) => rows.len(),
            TableRows::Sales(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads one table back from the sink.
pub async fn read_table<R>(repo: &R, table: ReportTable) -> Result<TableRows>
where
    R: StarSchemaRepository + ?Sized,
{
    let rows = match table {
        ReportTable::Dates => TableRows::Dates(repo.list_dates().await?),
        ReportTable::Customers => TableRows::Customers(repo.list_customers().await?),
        ReportTable::Movies => TableRows::Movies(repo.list_movies().await?),
        ReportTable::Locations => TableRows::Locations(repo.list_locations().await?),
        ReportTable::Facts => TableRows::Facts(repo.list_sales().await?),
        ReportTable::Sales => TableRows::Sales(repo.sales_report().await?),
    };
    tracing::debug!(?table, rows = rows.len(), "Read table");
    Ok(rows)
}
