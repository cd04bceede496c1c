use super::ui;
use crate::core::{MarketCapLoader, TickerEntry, TickerLoader};
use anyhow::{Result, bail};
use comfy_table::{Attribute, Cell, CellAlignment};

pub async fn load_ticker(loader: &dyn TickerLoader, count: u32) -> Result<Vec<TickerEntry>> {
    let entries = loader.load_ticker(count).await?;
    if entries.is_empty() {
        bail!("Ticker returned no assets");
    }
    Ok(entries)
}

pub fn display_ticker(entries: &[TickerEntry]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Price"),
        ui::header_cell("24h"),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.symbol).add_attribute(Attribute::Bold),
            Cell::new(ui::format_usd(entry.price, 2)).set_alignment(CellAlignment::Right),
            ui::change_cell(entry.change_24h),
        ]);
    }

    table.to_string()
}

pub async fn load_market_cap(loader: &dyn MarketCapLoader) -> Result<f64> {
    loader.load_total_market_cap().await
}

pub fn display_market_cap(total: f64) -> String {
    format!(
        "Global Market Cap: {}",
        ui::style_text(&ui::format_usd(total, 0), ui::StyleType::Value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockTicker(Vec<TickerEntry>);

    #[async_trait]
    impl TickerLoader for MockTicker {
        async fn load_ticker(&self, count: u32) -> Result<Vec<TickerEntry>> {
            Ok(self.0.iter().take(count as usize).cloned().collect())
        }
    }

    fn entry(symbol: &str, price: f64, change_24h: f64) -> TickerEntry {
        TickerEntry {
            symbol: symbol.to_string(),
            price,
            change_24h,
        }
    }

    #[tokio::test]
    async fn test_ticker_table() {
        let loader = MockTicker(vec![
            entry("BTC", 64000.5, 1.25),
            entry("ETH", 3100.0, -2.5),
        ]);
        let entries = load_ticker(&loader, 10).await.unwrap();
        let table = display_ticker(&entries);

        assert!(table.contains("BTC"));
        assert!(table.contains("$64,000.50"));
        assert!(table.contains("+1.25%"));
        assert!(table.contains("-2.50%"));
    }

    #[tokio::test]
    async fn test_empty_ticker_is_error() {
        let result = load_ticker(&MockTicker(Vec::new()), 10).await;
        assert_eq!(result.unwrap_err().to_string(), "Ticker returned no assets");
    }

    #[test]
    fn test_market_cap_display() {
        let text = display_market_cap(2_450_000_000_000.4);
        assert!(text.starts_with("Global Market Cap: "));
        assert!(text.contains("$2,450,000,000,000"));
    }
}
