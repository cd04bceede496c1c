//! Resolution of scalar sentiment indices from several alternative sources.

use crate::core::classify::{
    ALTSEASON_BUCKETS, Classification, Color, FEAR_GREED_BUCKETS, altseason_color, classify,
};
use crate::core::error::MetricsError;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// An external provider of a 0-100 index value.
///
/// `Ok(None)` means the source answered but had no usable value.
#[async_trait]
pub trait IndexSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_index(&self) -> Result<Option<f64>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndexOrigin {
    Source(String),
    Computed,
}

impl Display for IndexOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexOrigin::Source(name) => write!(f, "{name}"),
            IndexOrigin::Computed => write!(f, "computed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIndex {
    pub value: f64,
    pub origin: IndexOrigin,
}

/// Returns the first in-range value offered by `sources`, in declared order.
///
/// Source errors and empty answers are logged and skipped. Only when every
/// source has been exhausted is `fallback` awaited.
pub async fn resolve_index<F>(sources: &[Box<dyn IndexSource>], fallback: F) -> Result<ResolvedIndex>
where
    F: Future<Output = Result<f64>>,
{
    for source in sources {
        match source.fetch_index().await {
            Ok(Some(value)) if (0.0..=100.0).contains(&value) => {
                debug!(source = source.name(), value, "Resolved index from source");
                return Ok(ResolvedIndex {
                    value,
                    origin: IndexOrigin::Source(source.name().to_string()),
                });
            }
            Ok(Some(value)) => {
                warn!(source = source.name(), value, "Index source returned out-of-range value");
            }
            Ok(None) => {
                debug!(source = source.name(), "Index source had no value");
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "Index source failed");
            }
        }
    }

    debug!("All index sources exhausted, using computed fallback");
    let value = fallback.await?;
    Ok(ResolvedIndex {
        value,
        origin: IndexOrigin::Computed,
    })
}

/// A classified index value ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReading {
    pub value: f64,
    pub classification: Classification,
    pub color: Color,
}

impl SentimentReading {
    pub fn fear_greed(value: f64) -> Result<Self, MetricsError> {
        let classification = classify(value, &FEAR_GREED_BUCKETS)?;
        Ok(Self {
            value,
            classification,
            color: classification.color,
        })
    }

    pub fn altseason(value: f64) -> Result<Self, MetricsError> {
        Ok(Self {
            value,
            classification: classify(value, &ALTSEASON_BUCKETS)?,
            color: altseason_color(value)?,
        })
    }
}
