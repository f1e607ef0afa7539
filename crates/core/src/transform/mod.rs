mod customer;
mod date;
mod error;
mod fact;
mod location;
mod measures;
mod movie;
mod rules;
mod schema;
mod types;

pub use customer::{build_customer_dimension, normalize_gender};
pub use date::{build_date_dimension, calendar_date, date_key, date_row, DATE_KEY_YEARS};
pub use error::TransformError;
pub use fact::{build_sales_facts, FactInputs};
pub use location::{build_location_dimension, location_type};
pub use measures::{compute_measures, percentage, round2, Measures};
pub use movie::{build_movie_dimension, price_category};
pub use rules::{TransformRules, ONLINE_LOCATION, UNKNOWN_REGION};
pub use schema::{build_star_schema, check_referential_integrity};
pub use types::{
    CustomerDim, DateDim, Gender, LocationDim, LocationKeys, LocationType, MovieDim,
    PriceCategory, SalesFact, StarSchema,
};
