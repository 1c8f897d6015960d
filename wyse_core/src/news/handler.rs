use std::time::Duration;

use reqwest::Client;

use crate::{
    config::Config,
    error::FxResult,
    news::dto::{NewsHeadline, NewsResponse},
};

pub const NEWS_QUERY: &str =
    "forex OR EURUSD OR GBPUSD OR USDJPY OR USDCHF OR USDCAD OR AUDUSD OR NZDUSD";
const PAGE_SIZE: &str = "10";
const UNTITLED: &str = "(no title)";

#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsClient {
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
            config.newsapi_url.clone(),
            config.newsapi_key.clone(),
            config.request_timeout,
        )
    }

    /// Latest forex headlines, newest first. Without an API key this is always empty.
    pub async fn latest_headlines(&self, limit: usize) -> FxResult<Vec<NewsHeadline>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::debug!("NEWSAPI_KEY not set; skipping news fetch");
            return Ok(vec![]);
        };

        let response = self
            .client
            .get(format!("{}/v2/everything", self.base_url.trim_end_matches('/')))
            .query(&[
                ("q", NEWS_QUERY),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", PAGE_SIZE),
                ("apiKey", api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<NewsResponse>().await?;

        Ok(body
            .articles
            .into_iter()
            .take(limit)
            .map(|article| NewsHeadline {
                title: article.title.unwrap_or_else(|| UNTITLED.to_string()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_headlines_limited_and_titled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", NEWS_QUERY))
            .and(query_param("language", "en"))
            .and(query_param("apiKey", "k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "articles": [
                    { "title": "Dollar slips as yields ease" },
                    { "title": null },
                    { "title": "Yen rallies" },
                    { "title": "Euro steady" }
                ]
            })))
            .mount(&server)
            .await;

        let news = NewsClient::new(server.uri(), Some("k".to_string()), TEST_TIMEOUT).unwrap();
        let headlines = news.latest_headlines(3).await.unwrap();

        let titles: Vec<&str> = headlines.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Dollar slips as yields ease", "(no title)", "Yen rallies"]);
    }

    #[tokio::test]
    async fn test_missing_articles_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        let news = NewsClient::new(server.uri(), Some("k".to_string()), TEST_TIMEOUT).unwrap();
        assert!(news.latest_headlines(6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_key_is_empty_not_error() {
        let server = MockServer::start().await;
        let news = NewsClient::new(server.uri(), None, TEST_TIMEOUT).unwrap();
        assert!(news.latest_headlines(6).await.unwrap().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let news = NewsClient::new(server.uri(), Some("bad".to_string()), TEST_TIMEOUT).unwrap();
        let err = news.latest_headlines(6).await.unwrap_err();
        assert!(matches!(err, FxError::Http(_)));
    }

    #[tokio::test]
    async fn test_slow_news_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "articles": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let news = NewsClient::new(server.uri(), Some("k".to_string()), Duration::from_millis(200)).unwrap();
        let err = news.latest_headlines(6).await.unwrap_err();
        assert!(matches!(err, FxError::Http(ref e) if e.is_timeout()), "got {:?}", err);
    }
}
