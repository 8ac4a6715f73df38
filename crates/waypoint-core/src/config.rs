//! Engine configuration
//!
//! Tunable constants for the projection engine: trend sensitivity, insight
//! cap, history lookback, and the default drift thresholds applied to users
//! without stored settings.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, or ~/.local/share/waypoint/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::DriftSettings;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Engine configuration with documented defaults
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Relative half-over-half rate change that counts as a trend (0.10 = 10%)
    pub trend_threshold: f64,
    /// Maximum insights returned in a summary
    pub max_insights: usize,
    /// Snapshots fetched per goal when summarizing from a store
    pub history_limit: usize,
    /// Horizon for expected pace when a goal has no target date
    pub default_horizon_days: i64,
    /// Drift thresholds for users without stored settings
    pub default_drift: DriftSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.10,
            max_insights: 10,
            history_limit: 120,
            default_horizon_days: 365,
            default_drift: DriftSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default override location or embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load configuration from an explicit override path
    ///
    /// A missing file falls back to the embedded defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.trend_threshold > 0.0 && self.trend_threshold < 1.0) {
            return Err(Error::Config(format!(
                "trend.threshold must be between 0 and 1, got {}",
                self.trend_threshold
            )));
        }
        if self.max_insights == 0 {
            return Err(Error::Config(
                "insights.max_insights must be at least 1".to_string(),
            ));
        }
        if self.history_limit < 2 {
            return Err(Error::Config("history.limit must be at least 2".to_string()));
        }
        if self.default_horizon_days <= 0 {
            return Err(Error::Config(
                "drift.default_horizon_days must be positive".to_string(),
            ));
        }
        self.default_drift.validate().map_err(Error::Config)?;
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("waypoint").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    trend: Option<RawTrend>,
    insights: Option<RawInsights>,
    history: Option<RawHistory>,
    drift: Option<RawDrift>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    max_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawDrift {
    default_horizon_days: Option<i64>,
    warning_threshold: Option<f64>,
    critical_threshold: Option<f64>,
}

/// Parse config from TOML content, layering values over the defaults
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = EngineConfig::default();

    if let Some(trend) = raw.trend {
        if let Some(threshold) = trend.threshold {
            config.trend_threshold = threshold;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(max) = insights.max_insights {
            config.max_insights = max;
        }
    }

    if let Some(history) = raw.history {
        if let Some(limit) = history.limit {
            config.history_limit = limit;
        }
    }

    if let Some(drift) = raw.drift {
        if let Some(days) = drift.default_horizon_days {
            config.default_horizon_days = days;
        }
        if let Some(warning) = drift.warning_threshold {
            config.default_drift.warning_threshold = warning;
        }
        if let Some(critical) = drift.critical_threshold {
            config.default_drift.critical_threshold = critical;
        }
    }

    config.validate()?;
    Ok(config)
}
