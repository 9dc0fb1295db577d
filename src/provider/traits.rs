use crate::model::{ProviderError, QuoteRequest};
use crate::series::TimeSeries;

/// Supplies the intraday series for one symbol. Failures are final for the run.
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_series(&self, req: &QuoteRequest) -> Result<TimeSeries, ProviderError>;
}
