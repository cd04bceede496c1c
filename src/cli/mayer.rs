use super::ui;
use crate::core::config::MayerConfig;
use crate::core::{
    MovingAverageResult, RatioSeriesPoint, SeriesLoader, build_ratio_series,
    compute_moving_average,
};
use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment};
use tracing::debug;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const CHART_WIDTH: usize = 60;
const RECENT_ROWS: usize = 7;

/// Headline multiple plus the charted ratio series for one asset.
#[derive(Debug, Clone)]
pub struct MayerView {
    pub asset: String,
    pub window: usize,
    pub chart_window: usize,
    pub headline: MovingAverageResult,
    pub chart: Vec<RatioSeriesPoint>,
}

pub async fn load(loader: &dyn SeriesLoader, config: &MayerConfig) -> Result<MayerView> {
    let series = loader
        .load_series(&config.asset, config.history_days)
        .await?;
    debug!(
        "Computing Mayer Multiple over {} samples for {}",
        series.len(),
        config.asset
    );

    let headline = compute_moving_average(&series, config.window)
        .with_context(|| format!("Cannot compute Mayer Multiple for {}", config.asset))?;
    let chart = build_ratio_series(&series, config.chart_window)
        .with_context(|| format!("Cannot build Mayer chart for {}", config.asset))?;

    Ok(MayerView {
        asset: config.asset.clone(),
        window: config.window,
        chart_window: config.chart_window,
        headline,
        chart,
    })
}

/// Renders `values` as a one-line block chart, bucketing down to `width` columns.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let columns: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|col| {
                let start = col * values.len() / width;
                let end = ((col + 1) * values.len() / width).max(start + 1);
                let chunk = &values[start..end];
                chunk.iter().sum::<f64>() / chunk.len() as f64
            })
            .collect()
    };

    let min = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;

    columns
        .iter()
        .map(|v| {
            let level = if span > 0.0 {
                (((v - min) / span) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}

impl MayerView {
    pub fn display(&self) -> String {
        let mut output = format!(
            "Mayer Multiple ({}, {}-day MA): {}\n",
            self.asset,
            self.window,
            ui::style_text(&self.headline.formatted_multiple(), ui::StyleType::Value)
        );
        output.push_str(&ui::style_text(
            &format!(
                "Price {} / average {}",
                ui::format_usd(self.headline.current_price, 2),
                ui::format_usd(self.headline.average, 2)
            ),
            ui::StyleType::Subtle,
        ));

        let (Some(first), Some(last)) = (self.chart.first(), self.chart.last()) else {
            output.push_str(&format!(
                "\n\nNot enough history for a {}-day chart",
                self.chart_window
            ));
            return output;
        };

        let ratios: Vec<f64> = self.chart.iter().map(|p| p.ratio).collect();
        output.push_str(&format!(
            "\n\nPrice / {}-day MA, {} to {}\n{}\n",
            self.chart_window,
            first.date_label(),
            last.date_label(),
            sparkline(&ratios, CHART_WIDTH)
        ));

        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Multiple")]);
        let skip = self.chart.len().saturating_sub(RECENT_ROWS);
        for point in self.chart.iter().skip(skip) {
            table.add_row(vec![
                Cell::new(point.date_label()),
                Cell::new(format!("{:.2}", point.ratio)).set_alignment(CellAlignment::Right),
            ]);
        }
        output.push_str(&table.to_string());
        output
    }
}
