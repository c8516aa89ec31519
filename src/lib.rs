//! Perfume EDA - Exploratory analysis of men's and women's perfume listings
//!
//! Loads the two listing CSVs with Polars, merges and cleans them, computes
//! descriptive statistics and renders four charts, either as PNG files or in
//! an interactive window.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::{AnalysisConfig, ConfigError};
pub use data::{Category, DataLoader, DataProcessor, Listing, LoaderError};
pub use pipeline::{AnalysisOutput, AnalysisPipeline};
pub use stats::{AnalysisSummary, StatsCalculator};
