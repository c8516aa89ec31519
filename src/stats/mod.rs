//! Stats module - Descriptive statistics and frequency tables

mod calculator;

pub use calculator::{
    AnalysisSummary, BoxStats, CategorySummary, FrequencyEntry, HistogramBin, PriceSummary,
    QuantityMeans, StatsCalculator, StatsError,
};
