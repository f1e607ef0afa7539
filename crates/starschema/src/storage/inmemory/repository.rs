//! In-memory repository implementation.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use starschema_core::storage::{
    join_sales_report, RepositoryError, Result, SalesReportRow, StarSchemaRepository, StoredSale,
    Table,
};
use starschema_core::transform::{CustomerDim, DateDim, LocationDim, MovieDim, SalesFact};

/// Rows of every table, present once `create_tables` ran.
#[derive(Debug, Default)]
struct Tables {
    dates: Vec<DateDim>,
    customers: Vec<CustomerDim>,
    movies: Vec<MovieDim>,
    locations: Vec<LocationDim>,
    sales: Vec<StoredSale>,
}

impl Tables {
    fn len(&self, table: Table) -> usize {
        match table {
            Table::DimDate => self.dates.len(),
            Table::DimCustomer => self.customers.len(),
            Table::DimMovie => self.movies.len(),
            Table::DimLocation => self.locations.len(),
            Table::FactSales => self.sales.len(),
        }
    }

    fn next_sales_id(&self) -> i64 {
        self.sales.last().map_or(1, |sale| sale.sales_id + 1)
    }

    /// Checks that every dimension a fact points at is stored.
    fn check_references(&self, fact: &SalesFact) -> Result<()> {
        let known = self.dates.iter().any(|d| d.date_key == fact.date_key)
            && self.customers.iter().any(|c| c.customer_key == fact.customer_key)
            && self.movies.iter().any(|m| m.movie_key == fact.movie_key)
            && self.locations.iter().any(|l| l.location_key == fact.location_key);

        if known {
            Ok(())
        } else {
            Err(RepositoryError::InvalidData(format!(
                "Foreign key constraint violation in {}",
                Table::FactSales
            )))
        }
    }
}

/// In-memory star schema sink.
///
/// Mirrors the SQLite backend: tables must be created before use, keys are
/// unique, and facts must reference stored dimension rows.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Option<Tables>>>,
}

impl InMemoryRepository {
    /// Creates a new repository with no tables.
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing_table(table: Table) -> RepositoryError {
    RepositoryError::QueryFailed(format!("no such table: {table}"))
}

/// Appends `rows`, rejecting the whole batch if any key is already taken.
fn insert_unique<T, K>(
    table: Table,
    stored: &mut Vec<T>,
    rows: &[T],
    key: impl Fn(&T) -> K,
) -> Result<()>
where
    T: Clone,
    K: Eq + Hash + ToString,
{
    let mut seen: HashSet<K> = stored.iter().map(&key).collect();

    for row in rows {
        let k = key(row);
        if seen.contains(&k) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: table.name(),
                id: k.to_string(),
            });
        }
        seen.insert(k);
    }

    stored.extend_from_slice(rows);
    Ok(())
}

#[async_trait]
impl StarSchemaRepository for InMemoryRepository {
    async fn create_tables(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        *tables = Some(Tables::default());
        Ok(())
    }

    async fn insert_dates(&self, rows: &[DateDim]) -> Result<()> {
        let mut guard = self.tables.write().await;
        let tables = guard.as_mut().ok_or_else(|| missing_table(Table::DimDate))?;
        insert_unique(Table::DimDate, &mut tables.dates, rows, |d| d.date_key)
    }

    async fn insert_customers(&self, rows: &[CustomerDim]) -> Result<()> {
        let mut guard = self.tables.write().await;
        let tables = guard
            .as_mut()
            .ok_or_else(|| missing_table(Table::DimCustomer))?;
        insert_unique(Table::DimCustomer, &mut tables.customers, rows, |c| {
            c.customer_key
        })
    }

    async fn insert_movies(&self, rows: &[MovieDim]) -> Result<()> {
        let mut guard = self.tables.write().await;
        let tables = guard.as_mut().ok_or_else(|| missing_table(Table::DimMovie))?;
        insert_unique(Table::DimMovie, &mut tables.movies, rows, |m| m.movie_key)
    }

    async fn insert_locations(&self, rows: &[LocationDim]) -> Result<()> {
        let mut guard = self.tables.write().await;
        let tables = guard
            .as_mut()
            .ok_or_else(|| missing_table(Table::DimLocation))?;
        insert_unique(Table::DimLocation, &mut tables.locations, rows, |l| {
            l.location_key
        })
    }

    async fn insert_sales(&self, rows: &[SalesFact]) -> Result<()> {
        let mut guard = self.tables.write().await;
        let tables = guard
            .as_mut()
            .ok_or_else(|| missing_table(Table::FactSales))?;

        for fact in rows {
            tables.check_references(fact)?;
        }

        let first_id = tables.next_sales_id();
        tables
            .sales
            .extend(rows.iter().cloned().zip(first_id..).map(|(fact, sales_id)| {
                StoredSale { sales_id, fact }
            }));
        Ok(())
    }

    async fn list_dates(&self) -> Result<Vec<DateDim>> {
        let guard = self.tables.read().await;
        let tables = guard.as_ref().ok_or_else(|| missing_table(Table::DimDate))?;
        let mut rows = tables.dates.clone();
        rows.sort_by_key(|d| d.date_key);
        Ok(rows)
    }

    async fn list_customers(&self) -> Result<Vec<CustomerDim>> {
        let guard = self.tables.read().await;
        let tables = guard
            .as_ref()
            .ok_or_else(|| missing_table(Table::DimCustomer))?;
        let mut rows = tables.customers.clone();
        rows.sort_by_key(|c| c.customer_key);
        Ok(rows)
    }

    async fn list_movies(&self) -> Result<Vec<MovieDim>> {
        let guard = self.tables.read().await;
        let tables = guard.as_ref().ok_or_else(|| missing_table(Table::DimMovie))?;
        let mut rows = tables.movies.clone();
        rows.sort_by_key(|m| m.movie_key);
        Ok(rows)
    }

    async fn list_locations(&self) -> Result<Vec<LocationDim>> {
        let guard = self.tables.read().await;
        let tables = guard
            .as_ref()
            .ok_or_else(|| missing_table(Table::DimLocation))?;
        let mut rows = tables.locations.clone();
        rows.sort_by_key(|l| l.location_key);
        Ok(rows)
    }

    async fn list_sales(&self) -> Result<Vec<StoredSale>> {
        let guard = self.tables.read().await;
        let tables = guard
            .as_ref()
            .ok_or_else(|| missing_table(Table::FactSales))?;
        Ok(tables.sales.clone())
    }

    async fn sales_report(&self) -> Result<Vec<SalesReportRow>> {
        let guard = self.tables.read().await;
        let tables = guard
            .as_ref()
            .ok_or_else(|| missing_table(Table::FactSales))?;
        Ok(join_sales_report(
            &tables.dates,
            &tables.customers,
            &tables.movies,
            &tables.locations,
            &tables.sales,
        ))
    }

    async fn count_rows(&self, table: Table) -> Result<usize> {
        let guard = self.tables.read().await;
        let tables = guard.as_ref().ok_or_else(|| missing_table(table))?;
        Ok(tables.len(table))
    }
}
