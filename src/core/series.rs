//! Price series types and the loader abstraction that supplies them.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price samples for one asset, ascending by timestamp.
///
/// Ordering is the loader's responsibility: points are kept in the order they
/// were supplied and duplicates are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Builds a series from `(unix_millis, price)` pairs.
    pub fn from_millis_pairs(pairs: &[(i64, f64)]) -> Result<Self> {
        pairs
            .iter()
            .map(|(ms, price)| {
                Utc.timestamp_millis_opt(*ms)
                    .single()
                    .map(|ts| PricePoint::new(ts, *price))
                    .ok_or_else(|| anyhow!("Invalid timestamp in price series: {ms}"))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Supplies a trailing window of daily prices for an asset.
#[async_trait]
pub trait SeriesLoader: Send + Sync {
    async fn load_series(&self, asset: &str, days: u32) -> Result<PriceSeries>;
}
