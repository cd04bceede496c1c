//! Market snapshot types: the price ticker and global market capitalisation.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    pub price: f64,
    /// 24 hour change in percent.
    pub change_24h: f64,
}

#[async_trait]
pub trait TickerLoader: Send + Sync {
    /// Top `count` assets by market capitalisation.
    async fn load_ticker(&self, count: u32) -> Result<Vec<TickerEntry>>;
}

#[async_trait]
pub trait MarketCapLoader: Send + Sync {
    /// Total market capitalisation in USD.
    async fn load_total_market_cap(&self) -> Result<f64>;
}
