use crate::model::{ProviderError, QuoteRequest};
use crate::parser::{AlphaVantageParser, Parser};
use crate::provider::traits::QuoteProvider;
use crate::series::TimeSeries;

use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";

pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent("WyckoffSniper/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn query<'a>(&'a self, req: &'a QuoteRequest) -> [(&'static str, &'a str); 4] {
        [
            ("function", INTRADAY_FUNCTION),
            ("symbol", req.symbol.as_str()),
            ("interval", req.interval.as_str()),
            ("apikey", self.api_key.as_str()),
        ]
    }
}

#[async_trait::async_trait]
impl QuoteProvider for AlphaVantageProvider {
    async fn fetch_series(&self, req: &QuoteRequest) -> Result<TimeSeries, ProviderError> {
        info!("Requesting {} intraday ({})", req.symbol, req.interval);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query(req))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "Alpha Vantage responded {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(e.without_url().to_string()))?;

        AlphaVantageParser::new(req.interval.as_str()).parse(&body, &req.symbol)
    }
}
