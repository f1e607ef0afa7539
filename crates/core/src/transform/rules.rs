use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Location name that marks a web sale rather than a physical venue.
pub const ONLINE_LOCATION: &str = "Online";

/// Region assigned to locations missing from the region table.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Lookup tables used while deriving dimension attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRules {
    /// Non-canonical gender codes mapped onto "F" or "M".
    #[serde(default = "default_gender_aliases")]
    pub gender_aliases: BTreeMap<String, String>,
    /// Location name to region.
    #[serde(default = "default_regions")]
    pub regions: BTreeMap<String, String>,
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            gender_aliases: default_gender_aliases(),
            regions: default_regions(),
        }
    }
}

impl TransformRules {
    /// Region of a location, or "Unknown" when it is not mapped.
    pub fn region_for(&self, location: &str) -> &str {
        self.regions
            .get(location)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_REGION)
    }

    pub fn with_gender_alias(mut self, code: impl Into<String>, gender: impl Into<String>) -> Self {
        self.gender_aliases.insert(code.into(), gender.into());
        self
    }

    pub fn with_region(mut self, location: impl Into<String>, region: impl Into<String>) -> Self {
        self.regions.insert(location.into(), region.into());
        self
    }
}

fn default_gender_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("P".to_string(), "F".to_string())])
}

fn default_regions() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Cinema A".to_string(), "North Region".to_string()),
        ("Cinema B".to_string(), "South Region".to_string()),
        (ONLINE_LOCATION.to_string(), "Online".to_string()),
    ])
}
