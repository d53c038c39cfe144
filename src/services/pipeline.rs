use crate::config::{Config, ConfigError};
use crate::models::case::CaseMetric;
use crate::models::chart::ChartSpec;
use crate::models::country::CountryMapping;
use crate::models::table::PerCapitaTable;
use crate::services::chart;
use crate::services::dataset::{DatasetError, DatasetService};
use crate::services::per_capita::{self, PerCapitaError, RateOptions};
use crate::services::series;
use crate::utils::fetch::{build_client, FetchError};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),
    #[error("Per-capita error: {0}")]
    PerCapitaError(#[from] PerCapitaError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Fetch error: {0}")]
    FetchError(#[from] FetchError),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl PipelineError {
    /// True when an upstream source could not be reached or served a table
    /// that does not parse. Client construction failures are local.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PipelineError::DatasetError(DatasetError::FetchError(_) | DatasetError::CsvError { .. })
        )
    }
}

/// Fetch → per-capita table → series → chart spec → JSON. Nothing is kept
/// between runs.
pub struct ChartPipeline {
    datasets: DatasetService,
    countries: Vec<CountryMapping>,
    metrics: Vec<CaseMetric>,
    rate_options: RateOptions,
    scale_label: String,
}

impl ChartPipeline {
    pub fn new(config: &Config) -> Result<Self, PipelineError> {
        config.validate()?;
        let client = build_client(config.fetch_timeout())?;

        Ok(Self {
            datasets: DatasetService::new(client, &config.cases_url, &config.population_url),
            countries: config.countries.clone(),
            metrics: config.case_metrics.clone(),
            rate_options: RateOptions {
                scale: config.rate_scale,
                precision: config.rate_precision,
            },
            scale_label: config.scale_label(),
        })
    }

    pub async fn per_capita_table(&self) -> Result<PerCapitaTable, PipelineError> {
        let cases = self.datasets.load_cases(&self.countries).await?;
        let populations = self.datasets.load_populations(&self.countries).await?;

        let table = per_capita::compute(
            &cases,
            &populations,
            &self.countries,
            &self.metrics,
            self.rate_options,
        )
        .inspect_err(|e| {
            if !e.is_configuration_drift() {
                error!("Population data rejected: {}", e);
            }
        })?;

        Ok(table)
    }

    pub async fn chart_spec(&self) -> Result<ChartSpec, PipelineError> {
        let table = self.per_capita_table().await?;
        let series = series::assemble(&table);
        info!(
            "Assembled {} series over {} dates",
            series.len(),
            table.dates.len()
        );
        Ok(chart::build(series, &self.scale_label))
    }

    pub async fn chart_json(&self) -> Result<String, PipelineError> {
        let spec = self.chart_spec().await?;
        Ok(chart::to_json(&spec)?)
    }
}
