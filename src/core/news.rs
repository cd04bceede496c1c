//! News article abstraction shared by the crypto and macro feeds.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const SNIPPET_LENGTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn load_news(&self, limit: usize) -> Result<Vec<Article>>;
}

/// Cuts `text` to `SNIPPET_LENGTH` characters and appends an ellipsis.
pub fn make_snippet(text: &str) -> String {
    let cut: String = text.chars().take(SNIPPET_LENGTH).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_snippet() {
        assert_eq!(make_snippet("short"), "short...");

        let long = "x".repeat(300);
        let snippet = make_snippet(&long);
        assert_eq!(snippet.len(), SNIPPET_LENGTH + 3);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_make_snippet_respects_char_boundaries() {
        let text = "é".repeat(200);
        assert_eq!(make_snippet(&text).chars().count(), SNIPPET_LENGTH + 3);
    }
}
