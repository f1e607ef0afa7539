use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized gender of a customer. Always one of exactly two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Gender::Female),
            "M" => Ok(Gender::Male),
            other => Err(format!("Invalid gender: {other}")),
        }
    }
}

/// Price bucket of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    Budget,
    Standard,
    Premium,
}

impl PriceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::Budget => "Budget",
            PriceCategory::Standard => "Standard",
            PriceCategory::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Budget" => Ok(PriceCategory::Budget),
            "Standard" => Ok(PriceCategory::Standard),
            "Premium" => Ok(PriceCategory::Premium),
            other => Err(format!("Invalid price category: {other}")),
        }
    }
}

/// Whether a sale happened on the web or at a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Online,
    Physical,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Online => "Online",
            LocationType::Physical => "Physical",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Online" => Ok(LocationType::Online),
            "Physical" => Ok(LocationType::Physical),
            other => Err(format!("Invalid location type: {other}")),
        }
    }
}

/// One calendar date on which at least one transaction happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDim {
    /// `YYYYMMDD` encoding of `full_date`.
    pub date_key: u32,
    pub full_date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub quarter: u32,
    pub year: i32,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
    pub day_name: String,
    pub month_name: String,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDim {
    pub customer_key: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDim {
    pub movie_key: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub base_price: Decimal,
    pub price_category: PriceCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDim {
    /// Surrogate key, 1-based in order of first appearance.
    pub location_key: u32,
    pub location_name: String,
    pub location_type: LocationType,
    pub region: String,
}

/// One ticket sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFact {
    pub date_key: u32,
    pub customer_key: i64,
    pub movie_key: i64,
    pub location_key: u32,
    pub transaction_id: i64,
    pub quantity: u32,
    pub base_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    /// Percentage on a 0..100 scale.
    pub discount_percentage: Decimal,
    /// Percentage on a 0..100 scale.
    pub profit_margin: Decimal,
}

/// Location name to surrogate key, as assigned by the location dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationKeys(HashMap<String, u32>);

impl LocationKeys {
    pub fn get(&self, location_name: &str) -> Option<u32> {
        self.0.get(location_name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[LocationDim]> for LocationKeys {
    fn from(rows: &[LocationDim]) -> Self {
        Self(
            rows.iter()
                .map(|row| (row.location_name.clone(), row.location_key))
                .collect(),
        )
    }
}

/// Every dimension and the fact table produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarSchema {
    pub dates: Vec<DateDim>,
    pub customers: Vec<CustomerDim>,
    pub movies: Vec<MovieDim>,
    pub locations: Vec<LocationDim>,
    pub sales: Vec<SalesFact>,
}

impl StarSchema {
    /// Number of rows per table, in load order.
    pub fn row_counts(&self) -> [(&'static str, usize); 5] {
        [
            ("dim_date", self.dates.len()),
            ("dim_customer", self.customers.len()),
            ("dim_movie", self.movies.len()),
            ("dim_location", self.locations.len()),
            ("fact_sales", self.sales.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), r#""F""#);
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), r#""M""#);
        assert_eq!("F".parse::<Gender>(), Ok(Gender::Female));
        assert!("P".parse::<Gender>().is_err());
    }

    #[test]
    fn test_enum_strings_round_trip() {
        for category in [
            PriceCategory::Budget,
            PriceCategory::Standard,
            PriceCategory::Premium,
        ] {
            assert_eq!(category.as_str().parse::<PriceCategory>(), Ok(category));
        }
        for kind in [LocationType::Online, LocationType::Physical] {
            assert_eq!(kind.to_string().parse::<LocationType>(), Ok(kind));
        }
    }

    #[test]
    fn test_location_keys_from_rows() {
        let rows = vec![
            LocationDim {
                location_key: 1,
                location_name: "Cinema A".to_string(),
                location_type: LocationType::Physical,
                region: "North Region".to_string(),
            },
            LocationDim {
                location_key: 2,
                location_name: "Online".to_string(),
                location_type: LocationType::Online,
                region: "Online".to_string(),
            },
        ];

        let keys = LocationKeys::from(rows.as_slice());
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.get("Cinema A"), Some(1));
        assert_eq!(keys.get("Online"), Some(2));
        assert_eq!(keys.get("Cinema B"), None);
    }
}
