use crate::models::case::{CaseMetric, RawCaseRecord};
use crate::models::country::CountryMapping;
use crate::models::population::RawPopulationRecord;
use crate::models::table::PerCapitaTable;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, PartialEq)]
pub enum PerCapitaError {
    #[error("No population entry for {case_name} (looked up as '{population_name}')")]
    MissingPopulation {
        case_name: String,
        population_name: String,
    },
    #[error("{count} population entries for {case_name}, expected exactly one")]
    AmbiguousPopulation { case_name: String, count: usize },
    #[error("Population for {case_name} is not a positive number")]
    InvalidPopulation { case_name: String },
    #[error("Rate for {case_name} on {date} is not a finite number")]
    NonFiniteRate { case_name: String, date: NaiveDate },
}

impl PerCapitaError {
    /// Lookup failures mean the country configuration and the live dataset
    /// have drifted apart.
    pub fn is_configuration_drift(&self) -> bool {
        matches!(
            self,
            PerCapitaError::MissingPopulation { .. } | PerCapitaError::AmbiguousPopulation { .. }
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateOptions {
    pub scale: f64,
    pub precision: u32,
}

impl Default for RateOptions {
    fn default() -> Self {
        Self {
            scale: 1_000_000.0,
            precision: 2,
        }
    }
}

/// Rounds half to even, the way the pivot-table tooling rounds decimals.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = i32::try_from(precision)
        .map(|p| 10f64.powi(p))
        .unwrap_or(f64::INFINITY);
    (value * factor).round_ties_even() / factor
}

/// Builds the `case_name → population` lookup. Every configured country must
/// resolve to exactly one positive figure.
pub fn population_lookup(
    populations: &[RawPopulationRecord],
    countries: &[CountryMapping],
) -> Result<HashMap<String, f64>, PerCapitaError> {
    let mut lookup = HashMap::with_capacity(countries.len());

    for mapping in countries {
        let matches: Vec<&RawPopulationRecord> = populations
            .iter()
            .filter(|p| p.country == mapping.case_name)
            .collect();

        let record = match matches.as_slice() {
            [record] => *record,
            [] => {
                let err = PerCapitaError::MissingPopulation {
                    case_name: mapping.case_name.clone(),
                    population_name: mapping.population_name.clone(),
                };
                error!("Configuration integrity error: {}", err);
                return Err(err);
            }
            many => {
                let err = PerCapitaError::AmbiguousPopulation {
                    case_name: mapping.case_name.clone(),
                    count: many.len(),
                };
                error!("Configuration integrity error: {}", err);
                return Err(err);
            }
        };

        match record.year_2016 {
            Some(population) if population > 0.0 => {
                lookup.insert(mapping.case_name.clone(), population);
            }
            _ => {
                return Err(PerCapitaError::InvalidPopulation {
                    case_name: mapping.case_name.clone(),
                })
            }
        }
    }

    Ok(lookup)
}

/// Pivots the long case table into a date × country matrix of per-capita rates.
///
/// Columns follow the order of `countries`, restricted to those with at least
/// one case row. Duplicate `(date, country)` rows are averaged; absent pairs
/// stay `None`.
pub fn compute(
    cases: &[RawCaseRecord],
    populations: &[RawPopulationRecord],
    countries: &[CountryMapping],
    metrics: &[CaseMetric],
    options: RateOptions,
) -> Result<PerCapitaTable, PerCapitaError> {
    let lookup = population_lookup(populations, countries)?;

    // (sum, count) per cell, so duplicates can be averaged
    let mut cells: BTreeMap<NaiveDate, HashMap<&str, (f64, u32)>> = BTreeMap::new();
    for record in cases {
        let Some(count) = record.case_count(metrics) else {
            continue;
        };
        let cell = cells
            .entry(record.date)
            .or_default()
            .entry(record.country.as_str())
            .or_insert((0.0, 0));
        cell.0 += count as f64;
        cell.1 += 1;
    }

    let present: Vec<&CountryMapping> = countries
        .iter()
        .filter(|c| cells.values().any(|row| row.contains_key(c.case_name.as_str())))
        .collect();

    let mut dates = Vec::with_capacity(cells.len());
    let mut rates = Vec::with_capacity(cells.len());
    for (date, row) in &cells {
        let mut rate_row = Vec::with_capacity(present.len());
        for mapping in &present {
            let Some((sum, n)) = row.get(mapping.case_name.as_str()) else {
                rate_row.push(None);
                continue;
            };
            let population = lookup[&mapping.case_name];
            let cases = sum / f64::from(*n);
            let rate = round_to(cases / population * options.scale, options.precision);
            // serde_json would write these as null
            if !rate.is_finite() {
                return Err(PerCapitaError::NonFiniteRate {
                    case_name: mapping.case_name.clone(),
                    date: *date,
                });
            }
            rate_row.push(Some(rate));
        }
        dates.push(*date);
        rates.push(rate_row);
    }

    debug!(
        "Per-capita table: {} dates x {} countries",
        dates.len(),
        present.len()
    );

    Ok(PerCapitaTable {
        dates,
        countries: present.iter().map(|c| c.case_name.clone()).collect(),
        rates,
    })
}
