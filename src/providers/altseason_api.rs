//! External altseason index endpoints.
//!
//! Different publishers expose the index under different field names. The
//! payload is decoded into an explicit set of shapes, tried in the order the
//! variants are declared; the first shape that fits wins.

use super::util::get_json;
use crate::core::IndexSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberLike::Number(n) => Some(*n),
            NumberLike::Text(s) => s.trim().trim_end_matches('%').parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct NestedValue {
    value: NumberLike,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum AltseasonPayload {
    AltseasonIndex { altseason_index: NumberLike },
    Index { index: NumberLike },
    Value { value: NumberLike },
    Nested { data: NestedValue },
    Bare(NumberLike),
    Unrecognised(serde_json::Value),
}

impl AltseasonPayload {
    fn index(&self) -> Option<f64> {
        match self {
            AltseasonPayload::AltseasonIndex { altseason_index: n }
            | AltseasonPayload::Index { index: n }
            | AltseasonPayload::Value { value: n }
            | AltseasonPayload::Nested {
                data: NestedValue { value: n },
            }
            | AltseasonPayload::Bare(n) => n.as_f64(),
            AltseasonPayload::Unrecognised(_) => None,
        }
    }
}

pub struct AltseasonApiSource {
    name: String,
    url: String,
}

impl AltseasonApiSource {
    pub fn new(name: &str, url: &str) -> Self {
        AltseasonApiSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl IndexSource for AltseasonApiSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_index(&self) -> Result<Option<f64>> {
        let payload: AltseasonPayload = get_json(&self.url)
            .await
            .with_context(|| format!("Failed to load altseason index from {}", self.name))?;

        debug!(source = %self.name, payload = ?payload, "Decoded altseason payload");
        Ok(payload.index())
    }
}
