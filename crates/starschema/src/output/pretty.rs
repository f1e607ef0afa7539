use prettytable::{format, Cell, Row, Table};
use rust_decimal::Decimal;

use starschema_core::storage::{SalesReportRow, StoredSale};
use starschema_core::transform::{
    CustomerDim, DateDim, LocationDim, MovieDim, SalesFact, StarSchema,
};

use crate::pipeline::{ReportData, TableCount, TableRows};

/// Human-readable text rendering.
pub trait Pretty {
    fn pretty(&self) -> String;
}

/// A titled table rendered with `prettytable`.
pub struct TextTable {
    title: String,
    table: Table,
}

impl TextTable {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));

        Self {
            title: title.into(),
            table,
        }
    }

    pub fn push(&mut self, cells: Vec<String>) {
        self.table
            .add_row(Row::new(cells.iter().map(|c| Cell::new(c)).collect()));
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.title, self.table)
    }
}

fn money(value: &Decimal) -> String {
    format!("{value:.2}")
}

impl Pretty for [DateDim] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new(
            "dim_date",
            &[
                "date_key", "full_date", "day", "month", "quarter", "year", "dow", "day_name",
                "month_name", "weekend",
            ],
        );
        for row in self {
            table.push(vec![
                row.date_key.to_string(),
                row.full_date.to_string(),
                row.day.to_string(),
                row.month.to_string(),
                row.quarter.to_string(),
                row.year.to_string(),
                row.day_of_week.to_string(),
                row.day_name.clone(),
                row.month_name.clone(),
                row.is_weekend.to_string(),
            ]);
        }
        table.render()
    }
}

impl Pretty for [CustomerDim] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new(
            "dim_customer",
            &["customer_key", "customer_id", "customer_name", "gender"],
        );
        for row in self {
            table.push(vec![
                row.customer_key.to_string(),
                row.customer_id.to_string(),
                row.customer_name.clone(),
                row.gender.to_string(),
            ]);
        }
        table.render()
    }
}

impl Pretty for [MovieDim] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new(
            "dim_movie",
            &["movie_key", "movie_id", "movie_title", "base_price", "price_category"],
        );
        for row in self {
            table.push(vec![
                row.movie_key.to_string(),
                row.movie_id.to_string(),
                row.movie_title.clone(),
                money(&row.base_price),
                row.price_category.to_string(),
            ]);
        }
        table.render()
    }
}

impl Pretty for [LocationDim] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new(
            "dim_location",
            &["location_key", "location_name", "location_type", "region"],
        );
        for row in self {
            table.push(vec![
                row.location_key.to_string(),
                row.location_name.clone(),
                row.location_type.to_string(),
                row.region.clone(),
            ]);
        }
        table.render()
    }
}

const FACT_HEADERS: [&str; 11] = [
    "date_key",
    "customer_key",
    "movie_key",
    "location_key",
    "transaction_id",
    "qty",
    "base_price",
    "discount",
    "final_price",
    "discount_%",
    "margin_%",
];

fn fact_cells(fact: &SalesFact) -> Vec<String> {
    vec![
        fact.date_key.to_string(),
        fact.customer_key.to_string(),
        fact.movie_key.to_string(),
        fact.location_key.to_string(),
        fact.transaction_id.to_string(),
        fact.quantity.to_string(),
        money(&fact.base_price),
        money(&fact.discount_amount),
        money(&fact.final_price),
        money(&fact.discount_percentage),
        money(&fact.profit_margin),
    ]
}

impl Pretty for [SalesFact] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new("fact_sales", &FACT_HEADERS);
        for fact in self {
            table.push(fact_cells(fact));
        }
        table.render()
    }
}

impl Pretty for [StoredSale] {
    fn pretty(&self) -> String {
        let headers: Vec<&str> = std::iter::once("sales_id").chain(FACT_HEADERS).collect();
        let mut table = TextTable::new("fact_sales", &headers);
        for sale in self {
            let mut cells = vec![sale.sales_id.to_string()];
            cells.extend(fact_cells(&sale.fact));
            table.push(cells);
        }
        table.render()
    }
}

impl Pretty for [SalesReportRow] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new(
            "sales report",
            &[
                "sales_id", "date", "customer", "movie", "location", "qty", "base_price",
                "final_price", "discount_%", "margin_%",
            ],
        );
        for row in self {
            table.push(vec![
                row.sales_id.to_string(),
                row.full_date.to_string(),
                row.customer_name.clone(),
                row.movie_title.clone(),
                row.location_name.clone(),
                row.quantity.to_string(),
                money(&row.base_price),
                money(&row.final_price),
                money(&row.discount_percentage),
                money(&row.profit_margin),
            ]);
        }
        table.render()
    }
}

impl Pretty for [TableCount] {
    fn pretty(&self) -> String {
        let mut table = TextTable::new("row counts", &["table", "rows"]);
        for count in self {
            table.push(vec![count.table.to_string(), count.rows.to_string()]);
        }
        table.render()
    }
}

impl Pretty for StarSchema {
    fn pretty(&self) -> String {
        [
            self.dates.pretty(),
            self.customers.pretty(),
            self.movies.pretty(),
            self.locations.pretty(),
            self.sales.pretty(),
        ]
        .join("\n")
    }
}

impl Pretty for ReportData {
    fn pretty(&self) -> String {
        [
            self.dates.pretty(),
            self.customers.pretty(),
            self.movies.pretty(),
            self.locations.pretty(),
            self.facts.pretty(),
            self.sales.pretty(),
        ]
        .join("\n")
    }
}

impl Pretty for TableRows {
    fn pretty(&self) -> String {
        match self {
            TableRows::Dates(rows) => rows.pretty(),
            TableRows::Customers(rows) => rows.pretty(),
            TableRows::Movies(rows) => rows.pretty(),
            TableRows::Locations(rows) => rows.pretty(),
            TableRows::Facts(rows) => rows.pretty(),
            TableRows::Sales(rows) => rows.pretty(),
        }
    }
}
