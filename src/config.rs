use crate::models::case::CaseMetric;
use crate::models::country::{default_countries, CountryMapping};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CASES_URL: &str =
    "https://raw.githubusercontent.com/datasets/covid-19/master/data/countries-aggregated.csv";
/// Beyond this many decimals an f64 rate has no digits left to round.
pub const MAX_RATE_PRECISION: u32 = 15;

pub const DEFAULT_POPULATION_URL: &str =
    "https://datahub.io/JohnSnowLabs/population-figures-by-country/r/population-figures-by-country-csv.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub cases_url: String,
    pub population_url: String,
    pub fetch_timeout_secs: u64,
    pub countries: Vec<CountryMapping>,
    pub case_metrics: Vec<CaseMetric>,
    pub rate_scale: f64,
    pub rate_precision: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cases_url: DEFAULT_CASES_URL.to_string(),
            population_url: DEFAULT_POPULATION_URL.to_string(),
            fetch_timeout_secs: 30,
            countries: default_countries(),
            case_metrics: vec![CaseMetric::Confirmed],
            rate_scale: 1_000_000.0,
            rate_precision: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cases_url: env::var("CASES_URL").unwrap_or(defaults.cases_url),
            population_url: env::var("POPULATION_URL").unwrap_or(defaults.population_url),
            fetch_timeout_secs: parse_var("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            countries: match env::var("ANALYSIS_COUNTRIES") {
                Ok(value) if !value.trim().is_empty() => parse_countries(&value)?,
                _ => defaults.countries,
            },
            case_metrics: match env::var("CASE_METRICS") {
                Ok(value) if !value.trim().is_empty() => parse_metrics(&value)?,
                _ => defaults.case_metrics,
            },
            rate_scale: parse_var("RATE_SCALE", defaults.rate_scale)?,
            rate_precision: parse_var("RATE_PRECISION", defaults.rate_precision)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Rejects values that would make every fetch time out or every rate non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rate_scale.is_finite() || self.rate_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "RATE_SCALE",
                reason: "must be a finite positive number".to_string(),
            });
        }
        if self.rate_precision > MAX_RATE_PRECISION {
            return Err(ConfigError::InvalidValue {
                name: "RATE_PRECISION",
                reason: format!("must be at most {}", MAX_RATE_PRECISION),
            });
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.countries.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "ANALYSIS_COUNTRIES",
                reason: "no countries configured".to_string(),
            });
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Human label for the scale, e.g. `1M` for 1e6 or `100K` for 1e5.
    pub fn scale_label(&self) -> String {
        let scale = self.rate_scale;
        if scale >= 1_000_000.0 && scale % 1_000_000.0 == 0.0 {
            format!("{}M", scale / 1_000_000.0)
        } else if scale >= 1_000.0 && scale % 1_000.0 == 0.0 {
            format!("{}K", scale / 1_000.0)
        } else {
            format!("{}", scale)
        }
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name,
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

/// `;`-separated, because country names such as `Korea, South` contain commas.
pub fn parse_countries(value: &str) -> Result<Vec<CountryMapping>, ConfigError> {
    let mut countries: Vec<CountryMapping> = Vec::new();

    for entry in value.split(';').filter(|s| !s.trim().is_empty()) {
        let mapping = CountryMapping::parse(entry).ok_or_else(|| ConfigError::InvalidValue {
            name: "ANALYSIS_COUNTRIES",
            reason: format!("malformed entry '{}'", entry.trim()),
        })?;

        if countries.iter().any(|c| c.case_name == mapping.case_name) {
            return Err(ConfigError::InvalidValue {
                name: "ANALYSIS_COUNTRIES",
                reason: format!("duplicate country '{}'", mapping.case_name),
            });
        }
        countries.push(mapping);
    }

    Ok(countries)
}

pub fn parse_metrics(value: &str) -> Result<Vec<CaseMetric>, ConfigError> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<CaseMetric>().map_err(|reason| ConfigError::InvalidValue {
                name: "CASE_METRICS",
                reason,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_list_with_aliases() {
        let countries = parse_countries("Korea, South=Korea, Rep.; Germany ;").unwrap();
        assert_eq!(
            countries,
            vec![
                CountryMapping::new("Korea, South", "Korea, Rep."),
                CountryMapping::same("Germany"),
            ]
        );
    }

    #[test]
    fn rejects_duplicate_countries() {
        assert!(parse_countries("US=United States;US").is_err());
    }

    #[test]
    fn parses_metric_list() {
        assert_eq!(
            parse_metrics("Confirmed, Deaths").unwrap(),
            vec![CaseMetric::Confirmed, CaseMetric::Deaths]
        );
        assert!(parse_metrics("Confirmed,Active").is_err());
    }

    #[test]
    fn scale_label_follows_scale() {
        let mut config = Config::default();
        assert_eq!(config.scale_label(), "1M");
        config.rate_scale = 100_000.0;
        assert_eq!(config.scale_label(), "100K");
    }

    fn rejected_name(config: &Config) -> &'static str {
        match config.validate() {
            Err(ConfigError::InvalidValue { name, .. }) => name,
            Ok(()) => panic!("expected {:?} to be rejected", config),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_or_non_positive_scale() {
        for scale in [f64::INFINITY, f64::NAN, 0.0, -1.0] {
            let config = Config {
                rate_scale: scale,
                ..Config::default()
            };
            assert_eq!(rejected_name(&config), "RATE_SCALE");
        }
    }

    #[test]
    fn rejects_precision_above_limit() {
        let at_limit = Config {
            rate_precision: MAX_RATE_PRECISION,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        for precision in [MAX_RATE_PRECISION + 1, 400, u32::MAX] {
            let config = Config {
                rate_precision: precision,
                ..Config::default()
            };
            assert_eq!(rejected_name(&config), "RATE_PRECISION");
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = Config {
            fetch_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(rejected_name(&config), "FETCH_TIMEOUT_SECS");
    }

    #[test]
    fn rejects_empty_country_list() {
        let config = Config {
            countries: Vec::new(),
            ..Config::default()
        };
        assert_eq!(rejected_name(&config), "ANALYSIS_COUNTRIES");
    }
}
