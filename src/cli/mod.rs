//! Terminal presentation of the dashboard panels.

pub mod dashboard;
pub mod market;
pub mod mayer;
pub mod news;
pub mod sentiment;
pub mod setup;
pub mod ui;
pub mod watch;

use crate::core::config::{AppConfig, ProvidersConfig, RefreshConfig};
use crate::core::{
    BasketLoader, IndexSource, MarketCapLoader, NewsProvider, SeriesLoader, TickerLoader,
};
use crate::providers::{
    alternative_me::FearGreedProvider, altseason_api::AltseasonApiSource,
    coingecko::CoinGeckoProvider, cryptocompare::CryptoCompareNewsProvider,
    gdelt::GdeltNewsProvider,
};
use anyhow::Result;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// The data collectors every panel draws from, passed explicitly to renderers.
pub struct Services {
    pub series: Arc<dyn SeriesLoader>,
    pub basket: Arc<dyn BasketLoader>,
    pub ticker: Arc<dyn TickerLoader>,
    pub market_cap: Arc<dyn MarketCapLoader>,
    pub fear_greed: Arc<dyn IndexSource>,
    pub altseason_sources: Vec<Box<dyn IndexSource>>,
    pub news: Vec<Arc<dyn NewsProvider>>,
}

impl Services {
    pub fn from_config(providers: &ProvidersConfig) -> Self {
        let coingecko = Arc::new(CoinGeckoProvider::new(&providers.coingecko.base_url));

        Services {
            series: coingecko.clone(),
            basket: coingecko.clone(),
            ticker: coingecko.clone(),
            market_cap: coingecko,
            fear_greed: Arc::new(FearGreedProvider::new(&providers.alternative_me.base_url)),
            altseason_sources: providers
                .altseason_sources
                .iter()
                .map(|s| Box::new(AltseasonApiSource::new(&s.name, &s.url)) as Box<dyn IndexSource>)
                .collect(),
            news: vec![
                Arc::new(CryptoCompareNewsProvider::new(
                    &providers.cryptocompare.base_url,
                )),
                Arc::new(GdeltNewsProvider::new(&providers.gdelt.base_url)),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Ticker,
    FearGreed,
    Altseason,
    MarketCap,
    Mayer,
    News,
}

impl Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Panel::Ticker => "Ticker",
                Panel::FearGreed => "Fear & Greed",
                Panel::Altseason => "Altseason",
                Panel::MarketCap => "Market Cap",
                Panel::Mayer => "Mayer Multiple",
                Panel::News => "News",
            }
        )
    }
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Ticker,
        Panel::FearGreed,
        Panel::Altseason,
        Panel::MarketCap,
        Panel::Mayer,
        Panel::News,
    ];

    pub fn refresh_interval(&self, refresh: &RefreshConfig) -> Duration {
        let seconds = match self {
            Panel::Ticker => refresh.ticker,
            Panel::FearGreed => refresh.fear_greed,
            Panel::Altseason => refresh.altseason,
            Panel::MarketCap => refresh.market_cap,
            Panel::Mayer => refresh.mayer,
            Panel::News => refresh.news,
        };
        RefreshConfig::interval(seconds)
    }
}

/// Fetches, computes and renders one panel.
pub async fn render_panel(panel: Panel, services: &Services, config: &AppConfig) -> Result<String> {
    let output = match panel {
        Panel::Ticker => {
            let entries = market::load_ticker(services.ticker.as_ref(), config.ticker.count).await?;
            market::display_ticker(&entries)
        }
        Panel::FearGreed => sentiment::load_fear_greed(services.fear_greed.as_ref())
            .await?
            .display(),
        Panel::Altseason => sentiment::load_altseason(
            &services.altseason_sources,
            services.basket.as_ref(),
            &config.altseason,
        )
        .await?
        .display(),
        Panel::MarketCap => {
            market::display_market_cap(market::load_market_cap(services.market_cap.as_ref()).await?)
        }
        Panel::Mayer => mayer::load(services.series.as_ref(), &config.mayer)
            .await?
            .display(),
        Panel::News => news::display(&news::load(&services.news, config.news.limit).await?),
    };
    Ok(output)
}
