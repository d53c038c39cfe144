use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("covidchart/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Downloads `url` and returns the body as text. Non-success statuses are errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    info!("Fetching {}", url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::DownloadFailed(format!(
            "HTTP error {} for {}",
            response.status(),
            url
        )));
    }

    let body = response.text().await?;
    debug!(
        "Fetched {:.2} KB from {}",
        body.len() as f64 / 1024.0,
        url
    );

    Ok(body)
}
