//! Derived-metrics engine and the collaborator abstractions around it

pub mod classify;
pub mod config;
pub mod error;
pub mod log;
pub mod market;
pub mod moving_average;
pub mod news;
pub mod relative;
pub mod sentiment;
pub mod series;

// Re-export main types for cleaner imports
pub use error::MetricsError;
pub use market::{MarketCapLoader, TickerEntry, TickerLoader};
pub use moving_average::{
    MovingAverageResult, RatioSeriesPoint, build_ratio_series, compute_moving_average,
};
pub use news::{Article, NewsProvider};
pub use relative::{BasketEntry, BasketLoader, RelativePerformanceInput, compute_relative_index};
pub use sentiment::{IndexSource, ResolvedIndex, SentimentReading, resolve_index};
pub use series::{PricePoint, PriceSeries, SeriesLoader};
