use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of the long-format case table (`Date,Country,Confirmed,Recovered,Deaths`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCaseRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Confirmed")]
    pub confirmed: Option<u64>,
    #[serde(rename = "Recovered", default)]
    pub recovered: Option<u64>,
    #[serde(rename = "Deaths", default)]
    pub deaths: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMetric {
    Confirmed,
    Recovered,
    Deaths,
}

impl CaseMetric {
    pub fn value(&self, record: &RawCaseRecord) -> Option<u64> {
        match self {
            CaseMetric::Confirmed => record.confirmed,
            CaseMetric::Recovered => record.recovered,
            CaseMetric::Deaths => record.deaths,
        }
    }
}

impl FromStr for CaseMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(CaseMetric::Confirmed),
            "recovered" => Ok(CaseMetric::Recovered),
            "deaths" => Ok(CaseMetric::Deaths),
            other => Err(format!("unknown case metric '{}'", other)),
        }
    }
}

impl RawCaseRecord {
    /// Sums the selected metrics. `None` when every selected column is blank.
    pub fn case_count(&self, metrics: &[CaseMetric]) -> Option<u64> {
        metrics
            .iter()
            .filter_map(|metric| metric.value(self))
            .fold(None, |acc, value| Some(acc.unwrap_or(0) + value))
    }
}
