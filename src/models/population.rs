use serde::{Deserialize, Serialize};

/// Row of the population-figures-by-country table. Only the 2016 column is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPopulationRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year_2016")]
    pub year_2016: Option<f64>,
}
