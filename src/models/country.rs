use serde::{Deserialize, Serialize};

/// Names one analysed country in both upstream datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMapping {
    pub case_name: String,
    pub population_name: String,
}

impl CountryMapping {
    pub fn new(case_name: &str, population_name: &str) -> Self {
        Self {
            case_name: case_name.to_string(),
            population_name: population_name.to_string(),
        }
    }

    /// Same name in both datasets.
    pub fn same(name: &str) -> Self {
        Self::new(name, name)
    }

    /// Parses `case_name` or `case_name=population_name`.
    pub fn parse(entry: &str) -> Option<Self> {
        let (case_name, population_name) = match entry.split_once('=') {
            Some((case_name, population_name)) => (case_name.trim(), population_name.trim()),
            None => (entry.trim(), entry.trim()),
        };

        if case_name.is_empty() || population_name.is_empty() {
            return None;
        }

        Some(Self::new(case_name, population_name))
    }
}

pub fn default_countries() -> Vec<CountryMapping> {
    vec![
        CountryMapping::new("Korea, South", "Korea, Rep."),
        CountryMapping::same("Germany"),
        CountryMapping::same("United Kingdom"),
        CountryMapping::new("US", "United States"),
        CountryMapping::same("France"),
    ]
}
