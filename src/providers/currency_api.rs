use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::rates::{RateProvider, RateTable};

/// URL of the rate document for `source`. The code is lower-cased.
pub fn rates_url(base_url: &str, source: &CurrencyCode) -> String {
    format!("{}/{}.json", base_url.trim_end_matches('/'), source.api_key())
}

// CurrencyApiProvider implementation for RateProvider
pub struct CurrencyApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CurrencyApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("curconv/1.0")
            .timeout(timeout)
            .build()?;
        Ok(CurrencyApiProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RateProvider for CurrencyApiProvider {
    #[instrument(
        name = "CurrencyApiFetch",
        skip(self),
        fields(source = %source)
    )]
    async fn fetch_rates(&self, source: &CurrencyCode) -> Result<RateTable> {
        let url = rates_url(&self.base_url, source);
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency: {} URL: {}", e, source, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency: {}",
                response.status(),
                source
            ));
        }

        let text = response.text().await?;

        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", source, e))
    }
}
