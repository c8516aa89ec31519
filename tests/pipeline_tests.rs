//! Integration tests for the listing analysis pipeline.
//!
//! These tests drive the pipeline end to end over the CSV fixtures.

use perfume_eda::data::listing::{
    AVAILABLE_COL, AVAILABLE_TEXT_COL, BRAND_COL, CATEGORY_COL, LAST_UPDATED_COL, SOLD_COL,
    TYPE_COL,
};
use perfume_eda::stats::FrequencyEntry;
use perfume_eda::{
    AnalysisConfig, AnalysisPipeline, Category, DataLoader, DataProcessor, LoaderError,
    StatsCalculator,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config_for(men: &str, women: &str) -> AnalysisConfig {
    AnalysisConfig {
        men_path: fixtures_path().join(men),
        women_path: fixtures_path().join(women),
        ..Default::default()
    }
}

fn cleaned_frame(men: &str, women: &str) -> (DataFrame, DataFrame, DataFrame) {
    let (men_raw, women_raw) =
        DataLoader::load_pair(&fixtures_path().join(men), &fixtures_path().join(women)).unwrap();
    let merged = DataProcessor::prepare(&men_raw, &women_raw).unwrap();
    let cleaned = DataProcessor::fill_missing(&merged).unwrap();
    (men_raw, women_raw, cleaned)
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_small_scenario_statistics() {
    let mut out = Vec::new();
    let output =
        AnalysisPipeline::analyze(&config_for("mens_small.csv", "womens_small.csv"), &mut out)
            .unwrap();

    assert_eq!(output.merged.height(), 3);
    assert_eq!(output.summary.total_rows, 3);
    assert_eq!(output.summary.price.mean, Some(70.0));
    assert_eq!(output.summary.price.max, Some(90.0));
    assert_eq!(output.summary.price.min, Some(50.0));

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("Average price: $70.00"));
    assert!(report.contains("Maximum price: $90.00"));
    assert!(report.contains("Minimum price: $50.00"));
    assert!(report.contains("Men's listings shape: (2, 10)"));
    assert!(report.contains("Women's listings shape: (1, 10)"));
}

#[test]
fn test_missing_brand_becomes_unknown() {
    let (_, _, cleaned) = cleaned_frame("mens_small.csv", "womens_small.csv");
    let brands = cleaned.column(BRAND_COL).unwrap().str().unwrap();
    assert_eq!(brands.get(1), Some("Unknown"));

    let available_text = cleaned.column(AVAILABLE_TEXT_COL).unwrap().str().unwrap();
    assert_eq!(available_text.get(1), Some("Not available"));
    assert_eq!(cleaned.column(SOLD_COL).unwrap().i64().unwrap().get(1), Some(0));
}

#[test]
fn test_categories_follow_source_file() {
    let (men_raw, women_raw, cleaned) = cleaned_frame("mens_listings.csv", "womens_listings.csv");
    let labels: Vec<Option<&str>> = cleaned
        .column(CATEGORY_COL)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();

    let (men_rows, women_rows) = labels.split_at(men_raw.height());
    assert!(men_rows.iter().all(|l| *l == Some("men")));
    assert!(women_rows.iter().all(|l| *l == Some("women")));
    assert_eq!(cleaned.height(), men_raw.height() + women_raw.height());
}

#[test]
fn test_no_nulls_in_filled_columns() {
    let (_, _, cleaned) = cleaned_frame("mens_listings.csv", "womens_listings.csv");
    for name in [
        BRAND_COL,
        TYPE_COL,
        AVAILABLE_COL,
        AVAILABLE_TEXT_COL,
        SOLD_COL,
        LAST_UPDATED_COL,
    ] {
        assert_eq!(
            cleaned.column(name).unwrap().null_count(),
            0,
            "column {} still has nulls",
            name
        );
    }
}

#[test]
fn test_mean_price_within_range_and_category_counts_sum() {
    let (_, _, cleaned) = cleaned_frame("mens_listings.csv", "womens_listings.csv");
    let summary = StatsCalculator::summarize(&cleaned, 10).unwrap();

    let mean = summary.price.mean.unwrap();
    assert!(summary.price.min.unwrap() <= mean && mean <= summary.price.max.unwrap());

    let total: usize = summary.category_counts.iter().map(|e| e.count).sum();
    assert_eq!(total, cleaned.height());
    assert_eq!(
        summary.category_counts,
        vec![FrequencyEntry::new("men", 5), FrequencyEntry::new("women", 3)]
    );
}

#[test]
fn test_location_tables() {
    let (_, _, cleaned) = cleaned_frame("mens_listings.csv", "womens_listings.csv");
    let summary = StatsCalculator::summarize(&cleaned, 2).unwrap();

    assert_eq!(
        summary.top_locations,
        vec![
            FrequencyEntry::new("Allen, Texas, United States", 3),
            FrequencyEntry::new("Brooklyn, New York, United States", 2),
        ]
    );

    let women = summary.category(Category::Women).unwrap();
    // The women's file has one listing without a location.
    let located: usize = women.top_locations.iter().map(|e| e.count).sum();
    assert_eq!(located, 2);
}

#[test]
fn test_chart_data_covers_every_listing() {
    let mut out = Vec::new();
    let output = AnalysisPipeline::analyze(
        &config_for("mens_listings.csv", "womens_listings.csv"),
        &mut out,
    )
    .unwrap();

    assert_eq!(output.listings.len(), 8);
    assert_eq!(output.chart_data.points.len(), 8);
    assert_eq!(output.chart_data.histogram.len(), 30);
    let binned: usize = output.chart_data.histogram.iter().map(|b| b.count).sum();
    assert_eq!(binned, 8);
}

#[test]
fn test_summary_json_written() {
    let mut out = Vec::new();
    let output =
        AnalysisPipeline::analyze(&config_for("mens_small.csv", "womens_small.csv"), &mut out)
            .unwrap();

    let path = std::env::temp_dir()
        .join(format!("perfume_eda_{}", std::process::id()))
        .join("summary.json");
    AnalysisPipeline::write_summary_json(&output.summary, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["total_rows"], 3);
    assert_eq!(json["price"]["mean"], 70.0);
    assert_eq!(json["categories"][1]["category"], "women");

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_missing_input_file_aborts() {
    let mut out = Vec::new();
    let result = AnalysisPipeline::analyze(&config_for("mens_small.csv", "nope.csv"), &mut out);

    let err = result.err().expect("missing file must fail");
    match err.downcast_ref::<LoaderError>() {
        Some(LoaderError::FileNotFound(path)) => assert!(path.ends_with("nope.csv")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
    // Nothing is reported before the inputs are confirmed.
    assert!(out.is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let mut out = Vec::new();
    let config = AnalysisConfig {
        histogram_bins: 0,
        ..config_for("mens_small.csv", "womens_small.csv")
    };
    assert!(AnalysisPipeline::analyze(&config, &mut out).is_err());
}
