use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transform::SalesFact;

/// A table of the star schema. `ALL` lists them in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    DimDate,
    DimCustomer,
    DimMovie,
    DimLocation,
    FactSales,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::DimDate,
        Table::DimCustomer,
        Table::DimMovie,
        Table::DimLocation,
        Table::FactSales,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::DimDate => "dim_date",
            Table::DimCustomer => "dim_customer",
            Table::DimMovie => "dim_movie",
            Table::DimLocation => "dim_location",
            Table::FactSales => "fact_sales",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| format!("Unknown table: {s}"))
    }
}

/// A sales fact as persisted, with the id the sink assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSale {
    /// 1-based, in load order.
    pub sales_id: i64,
    #[serde(flatten)]
    pub fact: SalesFact,
}

/// One line of the sales report: a fact joined with all four dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReportRow {
    pub sales_id: i64,
    pub full_date: NaiveDate,
    pub customer_name: String,
    pub movie_title: String,
    pub location_name: String,
    pub quantity: u32,
    pub base_price: Decimal,
    pub final_price: Decimal,
    pub discount_percentage: Decimal,
    pub profit_margin: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::ALL {
            assert_eq!(table.name().parse::<Table>(), Ok(table));
        }
        assert!("fact_returns".parse::<Table>().is_err());
    }

    #[test]
    fn test_load_order() {
        let names: Vec<&str> = Table::ALL.iter().map(Table::name).collect();
        assert_eq!(
            names,
            vec![
                "dim_date",
                "dim_customer",
                "dim_movie",
                "dim_location",
                "fact_sales"
            ]
        );
    }
}
