use super::util::get_json;
use crate::core::news::make_snippet;
use crate::core::{Article, NewsProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

const MACRO_QUERY: &str =
    "economy%20OR%20interest%20rate%20OR%20inflation%20OR%20bank%20of%20england%20OR%20federal%20reserve";
const LOOKBACK_DAYS: i64 = 3;

/// Macro-economic headlines from the GDELT document API.
pub struct GdeltNewsProvider {
    base_url: String,
}

impl GdeltNewsProvider {
    pub fn new(base_url: &str) -> Self {
        GdeltNewsProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, limit: usize, end: DateTime<Utc>) -> String {
        let start = end - Duration::days(LOOKBACK_DAYS);
        format!(
            "{}/api/v2/doc/doc?query={}&mode=ArtList&maxrecords={}&sort=HybridRel&format=json&startdatetime={}&enddatetime={}",
            self.base_url,
            MACRO_QUERY,
            limit,
            start.format("%Y%m%d%H%M%S"),
            end.format("%Y%m%d%H%M%S")
        )
    }
}

#[derive(Debug, Deserialize)]
struct GdeltResponse {
    #[serde(default)]
    articles: Vec<GdeltArticle>,
}

#[derive(Debug, Deserialize)]
struct GdeltArticle {
    title: String,
    url: String,
    snippet: Option<String>,
    #[serde(alias = "socialimage")]
    image: Option<String>,
    #[serde(alias = "domain", default)]
    source: String,
}

#[async_trait]
impl NewsProvider for GdeltNewsProvider {
    fn name(&self) -> &str {
        "Macro News"
    }

    async fn load_news(&self, limit: usize) -> Result<Vec<Article>> {
        let url = self.search_url(limit, Utc::now());
        let response: GdeltResponse = get_json(&url)
            .await
            .context("Failed to load macro news")?;
        debug!("Received {} macro articles", response.articles.len());

        Ok(response
            .articles
            .into_iter()
            .take(limit)
            .map(|a| Article {
                snippet: a.snippet.as_deref().map(make_snippet).unwrap_or_default(),
                title: a.title,
                url: a.url,
                image_url: a.image.filter(|u| !u.is_empty()),
                source: a.source,
            })
            .collect())
    }
}
