//! Statistics Calculator Module
//! Descriptive statistics and frequency counts over the merged listings.

use crate::data::listing::{
    Category, AVAILABLE_COL, BRAND_COL, CATEGORY_COL, ITEM_LOCATION_COL, PRICE_COL, SOLD_COL,
};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Max, Min, OrderStatistics};
use thiserror::Error;
use tracing::debug;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

const COUNT_COL: &str = "count";

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Mean, max and min of the price column. All `None` when no price is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuantityMeans {
    pub available: Option<f64>,
    pub sold: Option<f64>,
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

impl FrequencyEntry {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Figures for one category subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub rows: usize,
    pub price: PriceSummary,
    pub quantities: QuantityMeans,
    pub top_locations: Vec<FrequencyEntry>,
}

/// Everything the console report and JSON export need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_rows: usize,
    pub price: PriceSummary,
    pub quantities: QuantityMeans,
    pub brand_counts: Vec<FrequencyEntry>,
    pub top_locations: Vec<FrequencyEntry>,
    pub category_counts: Vec<FrequencyEntry>,
    pub categories: Vec<CategorySummary>,
}

impl AnalysisSummary {
    pub fn category(&self, category: Category) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Box plot figures for one group of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub mean: f64,
    pub count: usize,
}

/// Handles statistical calculations over listing frames.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Non-null values of a numeric column as `f64`. NaN is dropped as well.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, StatsError> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Mean, max and min of `price`, skipping nulls.
    pub fn price_summary(df: &DataFrame) -> Result<PriceSummary, StatsError> {
        let prices = Self::numeric_values(df, PRICE_COL)?;
        if prices.is_empty() {
            return Ok(PriceSummary::default());
        }

        let mean = Self::mean(&prices);
        let count = prices.len();
        let data = Data::new(prices);
        Ok(PriceSummary {
            count,
            mean,
            max: Some(data.max()),
            min: Some(data.min()),
        })
    }

    /// Mean of `available` and `sold`.
    pub fn quantity_means(df: &DataFrame) -> Result<QuantityMeans, StatsError> {
        Ok(QuantityMeans {
            available: Self::mean(&Self::numeric_values(df, AVAILABLE_COL)?),
            sold: Self::mean(&Self::numeric_values(df, SOLD_COL)?),
        })
    }

    /// Rows belonging to one category.
    pub fn filter_category(df: &DataFrame, category: Category) -> Result<DataFrame, StatsError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(CATEGORY_COL).eq(lit(category.as_str())))
            .collect()?;
        Ok(filtered)
    }

    /// Frequency of each non-null value, most frequent first.
    ///
    /// Ties are ordered by value so the table is stable between runs.
    pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<FrequencyEntry>, StatsError> {
        let counts = df
            .clone()
            .lazy()
            .filter(col(column).is_not_null())
            .group_by([col(column)])
            .agg([len().alias(COUNT_COL)])
            .collect()?;

        let values = counts.column(column)?.cast(&DataType::String)?;
        let values = values.str()?;
        let totals = counts.column(COUNT_COL)?.cast(&DataType::UInt64)?;
        let totals = totals.u64()?;

        let mut entries: Vec<FrequencyEntry> = values
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(value, count)| {
                Some(FrequencyEntry::new(value?, count? as usize))
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        Ok(entries)
    }

    /// Keep the `n` most frequent entries of an already sorted table.
    pub fn top_n(mut counts: Vec<FrequencyEntry>, n: usize) -> Vec<FrequencyEntry> {
        counts.truncate(n);
        counts
    }

    /// Summary of one category subset.
    pub fn summarize_category(
        df: &DataFrame,
        category: Category,
        top_n: usize,
    ) -> Result<CategorySummary, StatsError> {
        let subset = Self::filter_category(df, category)?;
        Ok(CategorySummary {
            category,
            rows: subset.height(),
            price: Self::price_summary(&subset)?,
            quantities: Self::quantity_means(&subset)?,
            top_locations: Self::top_n(Self::value_counts(&subset, ITEM_LOCATION_COL)?, top_n),
        })
    }

    /// Global and per-category figures for the merged frame.
    pub fn summarize(df: &DataFrame, top_n: usize) -> Result<AnalysisSummary, StatsError> {
        let categories = Category::ALL
            .iter()
            .map(|&c| Self::summarize_category(df, c, top_n))
            .collect::<Result<Vec<_>, _>>()?;

        let summary = AnalysisSummary {
            total_rows: df.height(),
            price: Self::price_summary(df)?,
            quantities: Self::quantity_means(df)?,
            brand_counts: Self::value_counts(df, BRAND_COL)?,
            top_locations: Self::top_n(Self::value_counts(df, ITEM_LOCATION_COL)?, top_n),
            category_counts: Self::value_counts(df, CATEGORY_COL)?,
            categories,
        };

        debug!(
            "Summarised {} rows, {} distinct brands",
            summary.total_rows,
            summary.brand_counts.len()
        );
        Ok(summary)
    }

    /// Equal-width histogram over `[min, max]`.
    ///
    /// The maximum lands in the last bin. When all values are equal a single
    /// unit-wide bin centred on the value holds everything.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max <= min {
            return vec![HistogramBin {
                start: min - 0.5,
                end: min + 0.5,
                count: values.len(),
            }];
        }

        let width = (max - min) / bins as f64;
        let mut result: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            result[idx].count += 1;
        }

        result
    }

    /// Quartiles, whiskers and mean of a group. `None` for an empty group.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let mut data = Data::new(values.to_vec());
        let q1 = data.lower_quartile();
        let median = data.median();
        let q3 = data.upper_quartile();
        let iqr = q3 - q1;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - WHISKER_IQR_FACTOR * iqr)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + WHISKER_IQR_FACTOR * iqr)
            .unwrap_or(q3);

        Some(BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            mean: Self::mean(values).unwrap_or(f64::NAN),
            count: values.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merged_frame() -> DataFrame {
        df![
            "brand" => ["Dior", "Unknown", "Dior", "Chanel"],
            "price" => [Some(50.0), Some(70.0), None, Some(90.0)],
            "available" => [10i64, 0, 4, 6],
            "sold" => [25i64, 0, 5, 10],
            "itemLocation" => [Some("Allen"), Some("Dallas"), None, Some("Allen")],
            "category" => ["men", "men", "men", "women"],
        ]
        .unwrap()
    }

    #[test]
    fn test_price_summary_skips_nulls() {
        let summary = StatsCalculator::price_summary(&merged_frame()).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, Some(70.0));
        assert_eq!(summary.max, Some(90.0));
        assert_eq!(summary.min, Some(50.0));
    }

    #[test]
    fn test_price_summary_empty_frame() {
        let df = df!["price" => Vec::<f64>::new()].unwrap();
        let summary = StatsCalculator::price_summary(&df).unwrap();
        assert_eq!(summary, PriceSummary::default());
    }

    #[test]
    fn test_quantity_means() {
        let means = StatsCalculator::quantity_means(&merged_frame()).unwrap();
        assert_eq!(means.available, Some(5.0));
        assert_eq!(means.sold, Some(10.0));
    }

    #[test]
    fn test_value_counts_sorted_by_count_then_value() {
        let counts = StatsCalculator::value_counts(&merged_frame(), "brand").unwrap();
        assert_eq!(
            counts,
            vec![
                FrequencyEntry::new("Dior", 2),
                FrequencyEntry::new("Chanel", 1),
                FrequencyEntry::new("Unknown", 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_excludes_nulls() {
        let counts = StatsCalculator::value_counts(&merged_frame(), "itemLocation").unwrap();
        let total: usize = counts.iter().map(|e| e.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_top_n_truncates() {
        let counts: Vec<FrequencyEntry> = (0..15)
            .map(|i| FrequencyEntry::new(format!("loc{:02}", i), 20 - i))
            .collect();
        let top = StatsCalculator::top_n(counts, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].value, "loc00");
        assert_eq!(top[9].value, "loc09");
    }

    #[test]
    fn test_summarize_category_counts_sum_to_rows() {
        let df = merged_frame();
        let summary = StatsCalculator::summarize(&df, 10).unwrap();

        let total: usize = summary.category_counts.iter().map(|e| e.count).sum();
        assert_eq!(total, df.height());

        let men = summary.category(Category::Men).unwrap();
        assert_eq!(men.rows, 3);
        assert_eq!(men.price.mean, Some(60.0));
        assert_eq!(men.quantities.available, Some(14.0 / 3.0));

        let women = summary.category(Category::Women).unwrap();
        assert_eq!(women.top_locations, vec![FrequencyEntry::new("Allen", 1)]);
    }

    #[test]
    fn test_histogram_counts_add_up() {
        let values = [1.0, 2.0, 2.5, 3.0, 9.0, 10.0];
        let bins = StatsCalculator::histogram(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[2].end, 10.0);
        // The maximum belongs to the last bin.
        assert_eq!(bins[2].count, 2);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = StatsCalculator::histogram(&[5.0, 5.0, 5.0], 30);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert!(bins[0].start < 5.0 && bins[0].end > 5.0);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(StatsCalculator::histogram(&[], 30).is_empty());
    }

    #[test]
    fn test_box_stats_whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0];
        let stats = StatsCalculator::box_stats(&values).unwrap();

        assert!(stats.q1 <= stats.median && stats.median <= stats.q3);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 7.0);
        assert_eq!(stats.count, 8);
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(StatsCalculator::box_stats(&[]).is_none());
    }
}
