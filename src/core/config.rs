use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BaseUrlConfig {
    pub base_url: String,
}

impl BaseUrlConfig {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

/// An external altseason index endpoint, tried in the order listed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AltseasonSourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProvidersConfig {
    pub coingecko: BaseUrlConfig,
    pub alternative_me: BaseUrlConfig,
    pub cryptocompare: BaseUrlConfig,
    pub gdelt: BaseUrlConfig,
    pub altseason_sources: Vec<AltseasonSourceConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            coingecko: BaseUrlConfig::new("https://api.coingecko.com"),
            alternative_me: BaseUrlConfig::new("https://api.alternative.me"),
            cryptocompare: BaseUrlConfig::new("https://min-api.cryptocompare.com"),
            gdelt: BaseUrlConfig::new("https://api.gdeltproject.org"),
            altseason_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MayerConfig {
    pub asset: String,
    /// Moving average window for the headline multiple, in samples.
    pub window: usize,
    /// Shorter window used for the charted ratio series.
    pub chart_window: usize,
    pub history_days: u32,
}

impl Default for MayerConfig {
    fn default() -> Self {
        Self {
            asset: "bitcoin".to_string(),
            window: 200,
            chart_window: 50,
            history_days: 200,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AltseasonConfig {
    pub reference: String,
    pub basket_size: u32,
}

impl Default for AltseasonConfig {
    fn default() -> Self {
        Self {
            reference: "bitcoin".to_string(),
            basket_size: 50,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TickerConfig {
    pub count: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self { count: 10 }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NewsConfig {
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

/// Refresh cadence of each dashboard panel, in seconds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    pub ticker: u64,
    pub fear_greed: u64,
    pub altseason: u64,
    pub market_cap: u64,
    pub mayer: u64,
    pub news: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            ticker: 60,
            fear_greed: 4 * 60 * 60,
            altseason: 6 * 60 * 60,
            market_cap: 60 * 60,
            mayer: 6 * 60 * 60,
            news: 30 * 60,
        }
    }
}

impl RefreshConfig {
    /// Zero is bumped to one second so an interval never spins.
    pub fn interval(seconds: u64) -> Duration {
        Duration::from_secs(seconds.max(1))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub mayer: MayerConfig,
    pub altseason: AltseasonConfig,
    pub ticker: TickerConfig,
    pub news: NewsConfig,
    pub refresh: RefreshConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "cryptodash", "cryptodash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
