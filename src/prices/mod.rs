//! Live price lookup
//!
//! Providers implement [`PriceProvider`] and report typed failures.
//! [`PriceSource`] sits on top and absorbs every failure into "price
//! unavailable" so one bad ticker never aborts a portfolio pass.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub mod yahoo;

pub use yahoo::YahooFinance;

/// Errors from a price provider
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Api(String),

    #[error("No price data for {0}")]
    NoData(String),
}

/// Trait for latest-price providers
#[async_trait]
pub trait PriceProvider {
    /// Get the name of the provider
    fn name(&self) -> &str;

    /// Fetch the most recent closing price for a ticker
    async fn fetch_latest_close(&self, ticker: &str) -> Result<f64, PriceError>;
}

/// Error-absorbing wrapper around a price provider
///
/// Callers get an Option and never see the underlying error; the cause
/// still lands in the log so failed tickers can be diagnosed later.
pub struct PriceSource<P: PriceProvider> {
    provider: P,
}

impl<P: PriceProvider> PriceSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Latest close for the ticker, or None when the fetch failed
    pub async fn latest_close(&self, ticker: &str) -> Option<f64> {
        match self.provider.fetch_latest_close(ticker).await {
            Ok(price) => Some(price),
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    %ticker,
                    error = %e,
                    "Price fetch failed"
                );
                None
            }
        }
    }
}
