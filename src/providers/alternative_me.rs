use super::util::get_json;
use crate::core::IndexSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Fear & Greed index from alternative.me.
pub struct FearGreedProvider {
    base_url: String,
}

impl FearGreedProvider {
    pub fn new(base_url: &str) -> Self {
        FearGreedProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    #[serde(default)]
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    // Published as a numeric string, e.g. "54"
    value: String,
    value_classification: Option<String>,
}

#[async_trait]
impl IndexSource for FearGreedProvider {
    fn name(&self) -> &str {
        "alternative.me"
    }

    async fn fetch_index(&self) -> Result<Option<f64>> {
        let url = format!("{}/fng/?limit=1&format=json", self.base_url);
        let response: FearGreedResponse = get_json(&url)
            .await
            .context("Failed to load Fear & Greed index")?;

        let Some(entry) = response.data.first() else {
            return Ok(None);
        };
        debug!(
            value = %entry.value,
            classification = ?entry.value_classification,
            "Received Fear & Greed reading"
        );

        let value = entry
            .value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Invalid Fear & Greed value: {}", entry.value))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_fetch_index() {
        let mock_server = create_mock_server(
            r#"{
                "name": "Fear and Greed Index",
                "data": [{
                    "value": "54",
                    "value_classification": "Neutral",
                    "timestamp": "1717200000"
                }]
            }"#,
        )
        .await;

        let provider = FearGreedProvider::new(&mock_server.uri());
        assert_eq!(provider.fetch_index().await.unwrap(), Some(54.0));
    }

    #[tokio::test]
    async fn test_empty_data_is_none() {
        let mock_server = create_mock_server(r#"{"data": []}"#).await;
        let provider = FearGreedProvider::new(&mock_server.uri());
        assert_eq!(provider.fetch_index().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_numeric_value_is_error() {
        let mock_server = create_mock_server(r#"{"data": [{"value": "n/a"}]}"#).await;
        let provider = FearGreedProvider::new(&mock_server.uri());

        let result = provider.fetch_index().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid Fear & Greed value: n/a"
        );
    }
}
