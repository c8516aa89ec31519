//! Run configuration for the perfume listings analysis.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MEN_PATH: &str = "perfume-dashboard/data/ebday_mens_perfume.csv";
pub const DEFAULT_WOMEN_PATH: &str = "perfume-dashboard/data/ebday_womens_perfume.csv";

/// Smallest chart edge, in pixels, that still leaves room for axes and labels.
pub const MIN_CHART_EDGE: u32 = 200;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("histogram_bins must be at least 1")]
    ZeroBins,
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("chart size {0}x{1} is below the {min}px minimum", min = MIN_CHART_EDGE)]
    ChartTooSmall(u32, u32),
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Men's listings CSV.
    pub men_path: PathBuf,

    /// Women's listings CSV.
    pub women_path: PathBuf,

    /// Directory receiving the PNG charts.
    /// Default: "charts"
    pub output_dir: PathBuf,

    /// Number of bins in the price histogram.
    /// Default: 30
    pub histogram_bins: usize,

    /// Length of the item location tables.
    /// Default: 10
    pub top_n: usize,

    /// Rows shown when previewing each source file.
    /// Default: 20
    pub preview_rows: usize,

    /// Rows shown when previewing the merged table.
    /// Default: 5
    pub merged_preview_rows: usize,

    pub chart_width: u32,
    pub chart_height: u32,

    /// Open the written PNGs with the system viewer.
    pub open_charts: bool,

    /// Show the interactive chart window after the report.
    pub gui: bool,

    /// Where to write the summary as JSON, if anywhere.
    pub summary_json: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            men_path: PathBuf::from(DEFAULT_MEN_PATH),
            women_path: PathBuf::from(DEFAULT_WOMEN_PATH),
            output_dir: PathBuf::from("charts"),
            histogram_bins: 30,
            top_n: 10,
            preview_rows: 20,
            merged_preview_rows: 5,
            chart_width: 1024,
            chart_height: 768,
            open_charts: false,
            gui: false,
            summary_json: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.chart_width < MIN_CHART_EDGE || self.chart_height < MIN_CHART_EDGE {
            return Err(ConfigError::ChartTooSmall(self.chart_width, self.chart_height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let config = AnalysisConfig {
            histogram_bins: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBins));
    }

    #[test]
    fn test_small_chart_rejected() {
        let config = AnalysisConfig {
            chart_width: 120,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ChartTooSmall(120, 768)));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AnalysisConfig {
            summary_json: Some(PathBuf::from("out/summary.json")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
