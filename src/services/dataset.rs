use crate::models::case::RawCaseRecord;
use crate::models::country::CountryMapping;
use crate::models::population::RawPopulationRecord;
use crate::utils::fetch::{fetch_text, FetchError};
use reqwest::Client;
use std::collections::HashSet;
use std::io::Read;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Fetch error: {0}")]
    FetchError(#[from] FetchError),
    #[error("CSV error in {source_name}: {error}")]
    CsvError {
        source_name: &'static str,
        #[source]
        error: csv::Error,
    },
}

/// Fetches the two upstream tables. Requests run one after the other.
pub struct DatasetService {
    client: Client,
    cases_url: String,
    population_url: String,
}

impl DatasetService {
    pub fn new(client: Client, cases_url: &str, population_url: &str) -> Self {
        Self {
            client,
            cases_url: cases_url.to_string(),
            population_url: population_url.to_string(),
        }
    }

    pub async fn load_cases(
        &self,
        countries: &[CountryMapping],
    ) -> Result<Vec<RawCaseRecord>, DatasetError> {
        let body = fetch_text(&self.client, &self.cases_url).await?;
        let records = parse_cases(body.as_bytes(), countries)?;
        info!("Loaded {} case rows for {} countries", records.len(), countries.len());
        Ok(records)
    }

    pub async fn load_populations(
        &self,
        countries: &[CountryMapping],
    ) -> Result<Vec<RawPopulationRecord>, DatasetError> {
        let body = fetch_text(&self.client, &self.population_url).await?;
        let records = parse_populations(body.as_bytes(), countries)?;
        info!("Loaded {} population rows", records.len());
        Ok(records)
    }
}

/// Parses the case CSV, keeping only rows whose country is one of `countries`.
pub fn parse_cases<R: Read>(
    reader: R,
    countries: &[CountryMapping],
) -> Result<Vec<RawCaseRecord>, DatasetError> {
    let wanted: HashSet<&str> = countries.iter().map(|c| c.case_name.as_str()).collect();
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in rdr.deserialize::<RawCaseRecord>() {
        let record = result.map_err(|error| DatasetError::CsvError {
            source_name: "case data",
            error,
        })?;
        if wanted.contains(record.country.as_str()) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Parses the population CSV, keeping rows named by any mapping's population
/// name, with the name rewritten to the case dataset's spelling.
pub fn parse_populations<R: Read>(
    reader: R,
    countries: &[CountryMapping],
) -> Result<Vec<RawPopulationRecord>, DatasetError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in rdr.deserialize::<RawPopulationRecord>() {
        let mut record = result.map_err(|error| DatasetError::CsvError {
            source_name: "population data",
            error,
        })?;
        if let Some(mapping) = countries
            .iter()
            .find(|c| c.population_name == record.country)
        {
            record.country = mapping.case_name.clone();
            records.push(record);
        }
    }

    Ok(records)
}
