//! Yahoo Finance chart API provider

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;

use super::{PriceError, PriceProvider};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Yahoo rejects requests without a browser-style user agent
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Yahoo Finance provider
///
/// Hits the v8 chart endpoint with a one-day range and takes the last
/// non-null close, which is the most recent daily close for symbols the
/// exchange knows about.
pub struct YahooFinance {
    client: reqwest::Client,
    base_url: String,
}

impl YahooFinance {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host (tests swap in a local
    /// mock server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for YahooFinance {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for YahooFinance {
    fn name(&self) -> &str {
        "yahoo-finance"
    }

    async fn fetch_latest_close(&self, ticker: &str) -> Result<f64, PriceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await?
            .error_for_status()?;

        let payload: ChartResponse = response.json().await?;

        if let Some(err) = payload.chart.error {
            return Err(PriceError::Api(format!("{}: {}", err.code, err.description)));
        }

        let result = payload
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| PriceError::NoData(ticker.to_string()))?;

        // The close series can end in nulls for the in-progress bar
        result
            .indicators
            .quote
            .first()
            .and_then(|block| block.close.iter().rev().find_map(|close| *close))
            .ok_or_else(|| PriceError::NoData(ticker.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chart_body(closes: &[Option<f64>]) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "TEST" },
                    "timestamp": [1_700_000_000],
                    "indicators": { "quote": [{ "close": closes }] }
                }],
                "error": null
            }
        })
    }

    fn provider_for(server: &MockServer) -> YahooFinance {
        YahooFinance::with_base_url(server.uri())
    }

    #[tokio::test]
    async fn returns_last_close() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("range", "1d"))
            .and(query_param("interval", "1d"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chart_body(&[Some(100.0), Some(101.5)])),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let price = provider.fetch_latest_close("AAPL").await.unwrap();
        assert_eq!(price, 101.5);
    }

    #[tokio::test]
    async fn skips_trailing_nulls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/MSFT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chart_body(&[Some(310.0), None, None])),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let price = provider.fetch_latest_close("MSFT").await.unwrap();
        assert_eq!(price, 310.0);
    }

    #[tokio::test]
    async fn provider_error_object_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/FAKETICKER"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {
                    "result": null,
                    "error": {
                        "code": "Not Found",
                        "description": "No data found, symbol may be delisted"
                    }
                }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_latest_close("FAKETICKER").await.unwrap_err();
        assert!(matches!(err, PriceError::Api(_)));
    }

    #[tokio::test]
    async fn empty_result_maps_to_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/EMPTY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": { "result": [], "error": null }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_latest_close("EMPTY").await.unwrap_err();
        assert!(matches!(err, PriceError::NoData(_)));
    }

    #[tokio::test]
    async fn all_null_closes_map_to_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/HALTED"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chart_body(&[None, None])),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_latest_close("HALTED").await.unwrap_err();
        assert!(matches!(err, PriceError::NoData(_)));
    }

    #[tokio::test]
    async fn server_error_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch_latest_close("AAPL").await.unwrap_err();
        assert!(matches!(err, PriceError::Http(_)));
    }
}
