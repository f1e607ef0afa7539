//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to drop every table, facts first.
pub const DROP_TABLES: &str = r#"
DROP TABLE IF EXISTS fact_sales;
DROP TABLE IF EXISTS dim_date;
DROP TABLE IF EXISTS dim_customer;
DROP TABLE IF EXISTS dim_movie;
DROP TABLE IF EXISTS dim_location;
"#;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Date dimension
CREATE TABLE IF NOT EXISTS dim_date (
    date_key INTEGER PRIMARY KEY,
    full_date TEXT NOT NULL,
    day INTEGER NOT NULL,
    month INTEGER NOT NULL,
    quarter INTEGER NOT NULL,
    year INTEGER NOT NULL,
    day_of_week INTEGER NOT NULL,
    day_name TEXT NOT NULL,
    month_name TEXT NOT NULL,
    is_weekend INTEGER NOT NULL
);

-- Customer dimension
CREATE TABLE IF NOT EXISTS dim_customer (
    customer_key INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL,
    customer_name TEXT NOT NULL,
    gender TEXT NOT NULL
);

-- Movie dimension
CREATE TABLE IF NOT EXISTS dim_movie (
    movie_key INTEGER PRIMARY KEY,
    movie_id INTEGER NOT NULL,
    movie_title TEXT NOT NULL,
    base_price TEXT NOT NULL,
    price_category TEXT NOT NULL
);

-- Location dimension
CREATE TABLE IF NOT EXISTS dim_location (
    location_key INTEGER PRIMARY KEY,
    location_name TEXT NOT NULL,
    location_type TEXT NOT NULL,
    region TEXT NOT NULL
);

-- Sales facts
CREATE TABLE IF NOT EXISTS fact_sales (
    sales_id INTEGER PRIMARY KEY AUTOINCREMENT,
    date_key INTEGER NOT NULL,
    customer_key INTEGER NOT NULL,
    movie_key INTEGER NOT NULL,
    location_key INTEGER NOT NULL,
    transaction_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    base_price TEXT NOT NULL,
    discount_amount TEXT NOT NULL,
    final_price TEXT NOT NULL,
    discount_percentage TEXT NOT NULL,
    profit_margin TEXT NOT NULL,
    FOREIGN KEY (date_key) REFERENCES dim_date(date_key),
    FOREIGN KEY (customer_key) REFERENCES dim_customer(customer_key),
    FOREIGN KEY (movie_key) REFERENCES dim_movie(movie_key),
    FOREIGN KEY (location_key) REFERENCES dim_location(location_key)
);

-- Indexes for the report joins
CREATE INDEX IF NOT EXISTS idx_fact_sales_date_key ON fact_sales(date_key);
CREATE INDEX IF NOT EXISTS idx_fact_sales_customer_key ON fact_sales(customer_key);
CREATE INDEX IF NOT EXISTS idx_fact_sales_movie_key ON fact_sales(movie_key);
CREATE INDEX IF NOT EXISTS idx_fact_sales_location_key ON fact_sales(location_key);
"#;

// Date dimension queries
pub const INSERT_DATE: &str = r#"
INSERT INTO dim_date (date_key, full_date, day, month, quarter, year, day_of_week, day_name, month_name, is_weekend)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub const SELECT_DATES: &str = r#"
SELECT date_key, full_date, day, month, quarter, year, day_of_week, day_name, month_name, is_weekend
FROM dim_date
ORDER BY date_key
"#;

// Customer dimension queries
pub const INSERT_CUSTOMER: &str = r#"
INSERT INTO dim_customer (customer_key, customer_id, customer_name, gender)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_CUSTOMERS: &str = r#"
SELECT customer_key, customer_id, customer_name, gender
FROM dim_customer
ORDER BY customer_key
"#;

// Movie dimension queries
pub const INSERT_MOVIE: &str = r#"
INSERT INTO dim_movie (movie_key, movie_id, movie_title, base_price, price_category)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_MOVIES: &str = r#"
SELECT movie_key, movie_id, movie_title, base_price, price_category
FROM dim_movie
ORDER BY movie_key
"#;

// Location dimension queries
pub const INSERT_LOCATION: &str = r#"
INSERT INTO dim_location (location_key, location_name, location_type, region)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_LOCATIONS: &str = r#"
SELECT location_key, location_name, location_type, region
FROM dim_location
ORDER BY location_key
"#;

// Fact queries
pub const INSERT_SALE: &str = r#"
INSERT INTO fact_sales (date_key, customer_key, movie_key, location_key, transaction_id, quantity, base_price, discount_amount, final_price, discount_percentage, profit_margin)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub const SELECT_SALES: &str = r#"
SELECT sales_id, date_key, customer_key, movie_key, location_key, transaction_id, quantity, base_price, discount_amount, final_price, discount_percentage, profit_margin
FROM fact_sales
ORDER BY sales_id
"#;

pub const SELECT_SALES_REPORT: &str = r#"
SELECT fs.sales_id, dd.full_date, dc.customer_name, dm.movie_title, dl.location_name,
       fs.quantity, fs.base_price, fs.final_price, fs.discount_percentage, fs.profit_margin
FROM fact_sales fs
INNER JOIN dim_date dd ON fs.date_key = dd.date_key
INNER JOIN dim_customer dc ON fs.customer_key = dc.customer_key
INNER JOIN dim_movie dm ON fs.movie_key = dm.movie_key
INNER JOIN dim_location dl ON fs.location_key = dl.location_key
ORDER BY fs.sales_id
"#;

/// Row count query for a table name produced by `Table::name`.
pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table}")
}
