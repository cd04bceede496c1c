use super::util::get_json;
use crate::core::news::make_snippet;
use crate::core::{Article, NewsProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Latest English crypto headlines from CryptoCompare.
pub struct CryptoCompareNewsProvider {
    base_url: String,
}

impl CryptoCompareNewsProvider {
    pub fn new(base_url: &str) -> Self {
        CryptoCompareNewsProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data", default)]
    data: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    title: String,
    #[serde(default)]
    body: String,
    url: String,
    imageurl: Option<String>,
    #[serde(default)]
    source: String,
}

#[async_trait]
impl NewsProvider for CryptoCompareNewsProvider {
    fn name(&self) -> &str {
        "Crypto News"
    }

    async fn load_news(&self, limit: usize) -> Result<Vec<Article>> {
        let url = format!("{}/data/v2/news/?lang=EN&sortOrder=latest", self.base_url);
        let response: NewsResponse = get_json(&url)
            .await
            .context("Failed to load crypto news")?;
        debug!("Received {} crypto articles", response.data.len());

        Ok(response
            .data
            .into_iter()
            .take(limit)
            .map(|item| Article {
                snippet: make_snippet(&item.body),
                title: item.title,
                url: item.url,
                image_url: item.imageurl.filter(|u| !u.is_empty()),
                source: item.source,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_news_truncates_to_limit() {
        let mock_server = MockServer::start().await;
        let items: Vec<String> = (0..8)
            .map(|i| {
                format!(
                    r#"{{"title": "Headline {i}", "body": "{}", "url": "https://news.example/{i}",
                        "imageurl": "", "source": "coindesk"}}"#,
                    "b".repeat(200)
                )
            })
            .collect();
        let body = format!(r#"{{"Type": 100, "Data": [{}]}}"#, items.join(","));

        Mock::given(method("GET"))
            .and(path("/data/v2/news/"))
            .and(query_param("lang", "EN"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        let provider = CryptoCompareNewsProvider::new(&mock_server.uri());
        let articles = provider.load_news(5).await.unwrap();

        assert_eq!(articles.len(), 5);
        assert_eq!(articles[0].title, "Headline 0");
        assert_eq!(articles[4].url, "https://news.example/4");
        assert_eq!(articles[0].snippet.len(), 123);
        assert!(articles[0].image_url.is_none());
        assert_eq!(articles[0].source, "coindesk");
    }

    #[tokio::test]
    async fn test_missing_data_is_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/v2/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Message": "rate limited"}"#))
            .mount(&mock_server)
            .await;

        let provider = CryptoCompareNewsProvider::new(&mock_server.uri());
        assert!(provider.load_news(5).await.unwrap().is_empty());
    }
}
