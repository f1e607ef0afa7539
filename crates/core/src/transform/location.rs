use std::collections::HashSet;

use super::rules::{TransformRules, ONLINE_LOCATION};
use super::types::{LocationDim, LocationKeys, LocationType};
use crate::source::Transaction;

/// Builds one location dimension row per distinct location name.
///
/// Keys are assigned 1, 2, 3, ... in order of first appearance among the
/// transactions. The returned [`LocationKeys`] is the only mapping the fact
/// builder may use.
pub fn build_location_dimension(
    transactions: &[Transaction],
    rules: &TransformRules,
) -> (Vec<LocationDim>, LocationKeys) {
    let mut seen = HashSet::new();
    let rows: Vec<LocationDim> = transactions
        .iter()
        .map(|t| t.location.as_str())
        .filter(|name| seen.insert(*name))
        .zip(1u32..)
        .map(|(name, location_key)| LocationDim {
            location_key,
            location_name: name.to_string(),
            location_type: location_type(name),
            region: rules.region_for(name).to_string(),
        })
        .collect();

    let keys = LocationKeys::from(rows.as_slice());
    (rows, keys)
}

/// "Online" exactly when the name is the literal `Online`.
pub fn location_type(name: &str) -> LocationType {
    if name == ONLINE_LOCATION {
        LocationType::Online
    } else {
        LocationType::Physical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_records;
    use chrono::NaiveDate;

    fn transaction(id: i64, location: &str) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Transaction::new(id, at, location, 1)
    }

    #[test]
    fn test_sample_locations() {
        let (rows, keys) =
            build_location_dimension(&sample_records().transactions, &TransformRules::default());

        let summary: Vec<(u32, &str, LocationType, &str)> = rows
            .iter()
            .map(|r| {
                (
                    r.location_key,
                    r.location_name.as_str(),
                    r.location_type,
                    r.region.as_str(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Cinema A", LocationType::Physical, "North Region"),
                (2, "Cinema B", LocationType::Physical, "South Region"),
                (3, "Online", LocationType::Online, "Online"),
            ]
        );
        assert_eq!(keys.get("Online"), Some(3));
    }

    #[test]
    fn test_first_appearance_order() {
        let transactions = vec![
            transaction(1, "Zeta"),
            transaction(2, "Alpha"),
            transaction(3, "Zeta"),
            transaction(4, "Mid"),
            transaction(5, "Alpha"),
        ];

        let (rows, _) = build_location_dimension(&transactions, &TransformRules::default());

        let names: Vec<&str> = rows.iter().map(|r| r.location_name.as_str()).collect();
        let keys: Vec<u32> = rows.iter().map(|r| r.location_key).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_keys_are_stable_across_runs() {
        let transactions = sample_records().transactions;
        let rules = TransformRules::default();

        let first = build_location_dimension(&transactions, &rules);
        let second = build_location_dimension(&transactions, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_region_and_case_sensitive_type() {
        let transactions = vec![transaction(1, "online"), transaction(2, "Drive-In")];

        let (rows, _) = build_location_dimension(&transactions, &TransformRules::default());

        assert_eq!(rows[0].location_type, LocationType::Physical);
        assert_eq!(rows[0].region, "Unknown");
        assert_eq!(rows[1].region, "Unknown");
    }
}
