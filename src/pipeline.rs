//! Analysis pipeline: load, merge, clean, summarise, report.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::config::AnalysisConfig;
use crate::data::{DataLoader, DataProcessor, Listing};
use crate::report::ConsoleReport;
use crate::stats::{AnalysisSummary, StatsCalculator};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a run produces before charts are written.
pub struct AnalysisOutput {
    pub merged: DataFrame,
    pub listings: Vec<Listing>,
    pub summary: AnalysisSummary,
    pub chart_data: ChartData,
}

pub struct AnalysisPipeline;

impl AnalysisPipeline {
    /// Run the text part of the analysis, writing the report to `out`.
    pub fn analyze(config: &AnalysisConfig, out: &mut impl Write) -> Result<AnalysisOutput> {
        config.validate()?;

        let (men_raw, women_raw) = DataLoader::load_pair(&config.men_path, &config.women_path)?;

        ConsoleReport::source_preview(out, "Men's", &men_raw, config.preview_rows)?;
        ConsoleReport::source_preview(out, "Women's", &women_raw, config.preview_rows)?;
        ConsoleReport::dimensions(out, &men_raw, &women_raw)?;

        let merged = DataProcessor::prepare(&men_raw, &women_raw)
            .context("Failed to merge listing files")?;
        ConsoleReport::merged_preview(out, &merged, config.merged_preview_rows)?;
        ConsoleReport::missing_counts(
            out,
            "Missing values before filling",
            &DataProcessor::missing_value_counts(&merged),
        )?;

        let cleaned = DataProcessor::fill_missing(&merged)?;
        ConsoleReport::missing_counts(
            out,
            "Missing values after filling",
            &DataProcessor::missing_value_counts(&cleaned),
        )?;

        let summary = StatsCalculator::summarize(&cleaned, config.top_n)?;
        ConsoleReport::summary(out, &summary, config.top_n)?;

        let listings = DataProcessor::listings(&cleaned)?;
        let chart_data = ChartData::from_listings(&listings, config.histogram_bins);
        info!("Analysed {} listings", listings.len());

        Ok(AnalysisOutput {
            merged: cleaned,
            listings,
            summary,
            chart_data,
        })
    }

    /// Write the four PNG charts into the configured output directory.
    pub fn render_charts(config: &AnalysisConfig, output: &AnalysisOutput) -> Result<Vec<PathBuf>> {
        let paths = StaticChartRenderer::render_all(
            &output.chart_data,
            &config.output_dir,
            config.chart_width,
            config.chart_height,
        )
        .with_context(|| format!("Failed to render charts into {}", config.output_dir.display()))?;
        Ok(paths)
    }

    /// Save the summary as pretty-printed JSON.
    pub fn write_summary_json(summary: &AnalysisSummary, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush()?;
        info!("Summary saved: {}", path.display());
        Ok(())
    }
}
