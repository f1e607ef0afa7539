use super::rules::TransformRules;
use super::types::{CustomerDim, Gender};
use crate::source::Customer;

/// Reduces a raw gender code to "F" or "M".
///
/// "F" and "M" pass through. Other codes go through the alias table; anything
/// unmapped, or mapped to a value other than "F", becomes "M".
pub fn normalize_gender(code: &str, rules: &TransformRules) -> Gender {
    match code {
        "F" => Gender::Female,
        "M" => Gender::Male,
        other => match rules.gender_aliases.get(other).map(String::as_str) {
            Some("F") => Gender::Female,
            _ => Gender::Male,
        },
    }
}

/// Builds one customer dimension row per customer, preserving input order.
pub fn build_customer_dimension(customers: &[Customer], rules: &TransformRules) -> Vec<CustomerDim> {
    customers
        .iter()
        .map(|customer| CustomerDim {
            customer_key: customer.id,
            customer_id: customer.id,
            customer_name: customer.name.trim().to_string(),
            gender: normalize_gender(&customer.gender_code, rules),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_records;

    #[test]
    fn test_canonical_codes_pass_through() {
        let rules = TransformRules::default();
        assert_eq!(normalize_gender("F", &rules), Gender::Female);
        assert_eq!(normalize_gender("M", &rules), Gender::Male);
    }

    #[test]
    fn test_alias_and_default() {
        let rules = TransformRules::default();
        assert_eq!(normalize_gender("P", &rules), Gender::Female);
        assert_eq!(normalize_gender("L", &rules), Gender::Male);
        assert_eq!(normalize_gender("", &rules), Gender::Male);
        assert_eq!(normalize_gender("f", &rules), Gender::Male);
    }

    #[test]
    fn test_alias_to_non_canonical_value_collapses_to_male() {
        let rules = TransformRules::default().with_gender_alias("X", "Other");
        assert_eq!(normalize_gender("X", &rules), Gender::Male);
    }

    #[test]
    fn test_sample_customers() {
        let rows = build_customer_dimension(&sample_records().customers, &TransformRules::default());

        let genders: Vec<&str> = rows.iter().map(|r| r.gender.as_str()).collect();
        assert_eq!(genders, vec!["F", "M", "M", "M"]);

        let keys: Vec<i64> = rows.iter().map(|r| r.customer_key).collect();
        assert_eq!(keys, vec![101, 102, 103, 104]);
        assert!(rows.iter().all(|r| r.customer_key == r.customer_id));
    }

    #[test]
    fn test_name_is_trimmed_without_case_change() {
        let customers = vec![Customer::new(1, "  aLiCe \t", "F")];
        let rows = build_customer_dimension(&customers, &TransformRules::default());
        assert_eq!(rows[0].customer_name, "aLiCe");
    }

    #[test]
    fn test_one_row_per_customer_whatever_the_code() {
        let customers: Vec<Customer> = ["F", "M", "P", "L", "X", "?", ""]
            .iter()
            .enumerate()
            .map(|(i, code)| Customer::new(i as i64, "Name", *code))
            .collect();

        let rows = build_customer_dimension(&customers, &TransformRules::default());

        assert_eq!(rows.len(), customers.len());
        assert!(rows
            .iter()
            .all(|r| matches!(r.gender.as_str(), "F" | "M")));
    }
}
