mod error;
mod report;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use report::join_sales_report;
pub use traits::StarSchemaRepository;
pub use types::{SalesReportRow, StoredSale, Table};
