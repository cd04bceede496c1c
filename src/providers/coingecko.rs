use super::util::get_json;
use crate::core::{
    BasketEntry, BasketLoader, MarketCapLoader, PriceSeries, RelativePerformanceInput,
    SeriesLoader, TickerEntry, TickerLoader,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// CoinGecko public API: price history, market listings and global totals.
pub struct CoinGeckoProvider {
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_markets(&self, per_page: u32, change_window: &str) -> Result<Vec<MarketItem>> {
        let url = format!(
            "{}/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage={}",
            self.base_url, per_page, change_window
        );
        get_json(&url).await
    }
}

#[derive(Deserialize, Debug)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

#[derive(Deserialize, Debug)]
struct MarketItem {
    id: String,
    symbol: String,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    price_change_percentage_30d_in_currency: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Deserialize, Debug)]
struct GlobalData {
    #[serde(default)]
    total_market_cap: Option<MarketCapByCurrency>,
}

#[derive(Deserialize, Debug)]
struct MarketCapByCurrency {
    usd: Option<f64>,
}

#[async_trait]
impl SeriesLoader for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoSeriesFetch", skip(self), fields(asset = %asset))]
    async fn load_series(&self, asset: &str, days: u32) -> Result<PriceSeries> {
        let url = format!(
            "{}/api/v3/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, asset, days
        );
        let chart: MarketChartResponse = get_json(&url)
            .await
            .with_context(|| format!("Failed to load price history for {asset}"))?;

        debug!("Received {} price samples for {}", chart.prices.len(), asset);
        PriceSeries::from_millis_pairs(&chart.prices)
    }
}

#[async_trait]
impl BasketLoader for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoBasketFetch", skip(self))]
    async fn load_basket(&self, size: u32, reference_id: &str) -> Result<RelativePerformanceInput> {
        let markets = self
            .fetch_markets(size, "30d")
            .await
            .context("Failed to load market basket")?;

        let entries = markets
            .into_iter()
            .map(|m| BasketEntry::new(m.id, m.price_change_percentage_30d_in_currency))
            .collect();

        Ok(RelativePerformanceInput {
            entries,
            reference_id: reference_id.to_string(),
        })
    }
}

#[async_trait]
impl TickerLoader for CoinGeckoProvider {
    async fn load_ticker(&self, count: u32) -> Result<Vec<TickerEntry>> {
        let markets = self
            .fetch_markets(count, "24h")
            .await
            .context("Failed to load ticker")?;

        Ok(markets
            .into_iter()
            .filter_map(|m| match m.current_price {
                Some(price) => Some(TickerEntry {
                    symbol: m.symbol.to_uppercase(),
                    price,
                    change_24h: m.price_change_percentage_24h.unwrap_or(0.0),
                }),
                None => {
                    debug!("Skipping {} without a current price", m.id);
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl MarketCapLoader for CoinGeckoProvider {
    async fn load_total_market_cap(&self) -> Result<f64> {
        let url = format!("{}/api/v3/global", self.base_url);
        let global: GlobalResponse = get_json(&url)
            .await
            .context("Failed to load global market data")?;

        Ok(global
            .data
            .total_market_cap
            .and_then(|cap| cap.usd)
            .unwrap_or(0.0))
    }
}
