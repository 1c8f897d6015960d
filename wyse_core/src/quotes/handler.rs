use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use crate::{
    config::Config,
    error::{FxError, FxResult},
    pairs::CurrencyPair,
    quotes::dto::{FxDailyBar, FxDailyResponse},
    ta::types::{PriceBar, PriceSeries},
};

/// Anything that can supply a daily series for a pair.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_daily(&self, pair: &CurrencyPair) -> FxResult<PriceSeries>;
}

/// Alpha Vantage `FX_DAILY` client.
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl QuoteClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> FxResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> FxResult<Self> {
        Self::new(
            config.alphavantage_url.clone(),
            config.alphavantage_api_key.clone(),
            config.request_timeout,
        )
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch_daily(&self, pair: &CurrencyPair) -> FxResult<PriceSeries> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FxError::Provider("quote provider key not configured".to_string()))?;

        log::debug!("Fetching daily series for {}", pair);

        let response = self
            .client
            .get(format!("{}/query", self.base_url.trim_end_matches('/')))
            .query(&[
                ("function", "FX_DAILY"),
                ("from_symbol", pair.base.as_str()),
                ("to_symbol", pair.quote.as_str()),
                ("outputsize", "full"),
                ("apikey", api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<FxDailyResponse>().await?;

        into_series(pair, body)
    }
}

fn into_series(pair: &CurrencyPair, body: FxDailyResponse) -> FxResult<PriceSeries> {
    if let Some(note) = body.note.or(body.information) {
        return Err(FxError::ProviderRateLimited(note));
    }
    if let Some(message) = body.error_message {
        return Err(FxError::Provider(message));
    }

    let time_series = match body.time_series {
        Some(ts) if !ts.is_empty() => ts,
        _ => return Err(FxError::NoData),
    };

    let bars = time_series
        .iter()
        .map(|(date, bar)| parse_bar(date, bar))
        .collect::<FxResult<Vec<_>>>()?;

    Ok(PriceSeries::new(pair.clone(), bars))
}

fn parse_bar(date: &str, bar: &FxDailyBar) -> FxResult<PriceBar> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| FxError::Provider(format!("bad date {:?}: {}", date, e)))?;

    Ok(PriceBar {
        date,
        open: parse_price(&bar.open)?,
        high: parse_price(&bar.high)?,
        low: parse_price(&bar.low)?,
        close: parse_price(&bar.close)?,
    })
}

fn parse_price(raw: &str) -> FxResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FxError::Provider(format!("bad price {:?}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    async fn serve(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "FX_DAILY"))
            .and(query_param("from_symbol", "EUR"))
            .and(query_param("to_symbol", "USD"))
            .and(query_param("outputsize", "full"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> QuoteClient {
        QuoteClient::new(server.uri(), Some("test-key".to_string()), TEST_TIMEOUT).unwrap()
    }

    fn eurusd() -> CurrencyPair {
        CurrencyPair::new("EUR", "USD")
    }

    #[tokio::test]
    async fn test_parses_and_sorts_series() {
        let server = serve(json!({
            "Meta Data": { "1. Information": "Forex Daily Prices" },
            "Time Series FX (Daily)": {
                "2024-05-02": { "1. open": "1.0700", "2. high": "1.0750", "3. low": "1.0690", "4. close": "1.0725" },
                "2024-05-01": { "1. open": "1.0660", "2. high": "1.0710", "3. low": "1.0650", "4. close": "1.0700" }
            }
        }))
        .await;

        let series = client(&server).fetch_daily(&eurusd()).await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.07, 1.0725]);
        assert_eq!(series.bars()[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(series.bars()[1].high, 1.075);
        assert_eq!(series.pair(), &eurusd());
    }

    #[tokio::test]
    async fn test_note_is_rate_limit() {
        let server = serve(json!({ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute." })).await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::ProviderRateLimited(ref m) if m.contains("5 calls per minute")));
    }

    #[tokio::test]
    async fn test_information_is_rate_limit() {
        let server = serve(json!({ "Information": "daily limit reached" })).await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::ProviderRateLimited(_)));
    }

    #[tokio::test]
    async fn test_error_message_is_provider_error() {
        let server = serve(json!({ "Error Message": "Invalid API call." })).await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::Provider(ref m) if m == "Invalid API call."));
    }

    #[tokio::test]
    async fn test_missing_or_empty_series_is_no_data() {
        let server = serve(json!({ "Meta Data": {} })).await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::NoData));

        let server = serve(json!({ "Time Series FX (Daily)": {} })).await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::NoData));
    }

    #[tokio::test]
    async fn test_unparsable_price_is_provider_error() {
        let server = serve(json!({
            "Time Series FX (Daily)": {
                "2024-05-01": { "1. open": "abc", "2. high": "1", "3. low": "1", "4. close": "1" }
            }
        }))
        .await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::Provider(_)));
    }

    #[tokio::test]
    async fn test_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let err = client(&server).fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::Http(_)));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "Time Series FX (Daily)": {} }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = QuoteClient::new(
            server.uri(),
            Some("test-key".to_string()),
            Duration::from_millis(200),
        )
        .unwrap();
        let started = std::time::Instant::now();
        let err = client.fetch_daily(&eurusd()).await.unwrap_err();

        assert!(matches!(err, FxError::Http(ref e) if e.is_timeout()), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let server = MockServer::start().await;
        let client = QuoteClient::new(server.uri(), None, TEST_TIMEOUT).unwrap();
        let err = client.fetch_daily(&eurusd()).await.unwrap_err();
        assert!(matches!(err, FxError::Provider(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
