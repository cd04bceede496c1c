//! Relative-performance (altseason) index over a basket snapshot.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketEntry {
    pub id: String,
    pub trailing_return: Option<f64>,
}

impl BasketEntry {
    pub fn new(id: impl Into<String>, trailing_return: Option<f64>) -> Self {
        Self {
            id: id.into(),
            trailing_return,
        }
    }
}

/// A basket snapshot plus the id of the asset every other entry is measured
/// against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativePerformanceInput {
    pub entries: Vec<BasketEntry>,
    pub reference_id: String,
}

/// Supplies trailing returns for the top `size` assets.
#[async_trait]
pub trait BasketLoader: Send + Sync {
    async fn load_basket(&self, size: u32, reference_id: &str)
    -> Result<RelativePerformanceInput>;
}

/// Percentage of non-reference entries whose trailing return strictly beats the
/// reference's. Missing returns count as 0; an empty basket gives 0.
pub fn compute_relative_index(input: &RelativePerformanceInput) -> u8 {
    let reference_return = input
        .entries
        .iter()
        .find(|e| e.id == input.reference_id)
        .and_then(|e| e.trailing_return)
        .unwrap_or(0.0);

    let (total, outperformers) = input
        .entries
        .iter()
        .filter(|e| e.id != input.reference_id)
        .fold((0usize, 0usize), |(total, count), e| {
            let beats = e.trailing_return.unwrap_or(0.0) > reference_return;
            (total + 1, count + usize::from(beats))
        });

    if total == 0 {
        return 0;
    }
    (100.0 * outperformers as f64 / total as f64).round() as u8
}
