use super::ui;
use crate::core::config::AltseasonConfig;
use crate::core::sentiment::IndexOrigin;
use crate::core::{
    BasketLoader, IndexSource, SentimentReading, compute_relative_index, resolve_index,
};
use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SentimentView {
    pub title: &'static str,
    pub reading: SentimentReading,
    pub origin: IndexOrigin,
    pub as_percent: bool,
}

pub async fn load_fear_greed(source: &dyn IndexSource) -> Result<SentimentView> {
    let value = source
        .fetch_index()
        .await?
        .ok_or_else(|| anyhow!("No Fear & Greed reading available"))?;

    Ok(SentimentView {
        title: "Fear & Greed Index",
        reading: SentimentReading::fear_greed(value)?,
        origin: IndexOrigin::Source(source.name().to_string()),
        as_percent: false,
    })
}

/// External altseason sources first, then the index computed from the basket.
pub async fn load_altseason(
    sources: &[Box<dyn IndexSource>],
    basket_loader: &dyn BasketLoader,
    config: &AltseasonConfig,
) -> Result<SentimentView> {
    let fallback = async {
        let basket = basket_loader
            .load_basket(config.basket_size, &config.reference)
            .await?;
        let index = compute_relative_index(&basket);
        debug!(
            "Computed altseason index {} from {} basket entries",
            index,
            basket.entries.len()
        );
        Ok::<f64, anyhow::Error>(f64::from(index))
    };

    let resolved = resolve_index(sources, fallback)
        .await
        .context("Altseason index unavailable")?;

    Ok(SentimentView {
        title: "Altseason Index",
        reading: SentimentReading::altseason(resolved.value)?,
        origin: resolved.origin,
        as_percent: true,
    })
}

impl SentimentView {
    pub fn value_text(&self) -> String {
        if self.as_percent {
            format!("{:.0}%", self.reading.value)
        } else {
            format!("{:.0}", self.reading.value)
        }
    }

    pub fn display(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell(self.title),
            ui::header_cell("Classification"),
            ui::header_cell("Source"),
        ]);
        table.add_row(vec![
            ui::index_cell(&self.value_text(), self.reading.color),
            Cell::new(self.reading.classification.label),
            Cell::new(self.origin.to_string()),
        ]);
        table.to_string()
    }
}
