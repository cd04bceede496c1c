use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const USER_AGENT: &str = concat!("cryptodash/", env!("CARGO_PKG_VERSION"));

/// Issues a GET and decodes the JSON body.
///
/// Non-success statuses and malformed bodies are errors naming `url`; there is
/// no retry, the caller simply skips this refresh.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    debug!("Requesting {}", url);

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
    }

    let text = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON response from {url}"))
}
