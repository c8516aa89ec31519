//! Console Report Module
//! Plain-text previews and statistic summaries.

use crate::data::{Category, DataLoader};
use crate::stats::{AnalysisSummary, FrequencyEntry};
use polars::prelude::*;
use std::io::{self, Write};

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn decimal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Writes the analysis report to any `Write` sink.
pub struct ConsoleReport;

impl ConsoleReport {
    /// First `rows` rows of a source file.
    pub fn source_preview(
        out: &mut impl Write,
        label: &str,
        df: &DataFrame,
        rows: usize,
    ) -> io::Result<()> {
        writeln!(out, "{} listings, first {} rows:", label, rows)?;
        writeln!(out, "{}", df.head(Some(rows)))?;
        writeln!(out)
    }

    /// Rows x columns of each source file.
    pub fn dimensions(out: &mut impl Write, men: &DataFrame, women: &DataFrame) -> io::Result<()> {
        let (mr, mc) = men.shape();
        let (wr, wc) = women.shape();
        writeln!(out, "Men's listings shape: ({}, {})", mr, mc)?;
        writeln!(out, "Women's listings shape: ({}, {})", wr, wc)?;
        writeln!(out)
    }

    /// Column names and the first rows of the merged table.
    pub fn merged_preview(out: &mut impl Write, merged: &DataFrame, rows: usize) -> io::Result<()> {
        writeln!(out, "Merged columns:")?;
        writeln!(out, "{}", DataLoader::column_names(merged).join(", "))?;
        writeln!(out)?;
        writeln!(out, "Merged listings, first {} rows:", rows)?;
        writeln!(out, "{}", merged.head(Some(rows)))?;
        writeln!(out)
    }

    pub fn missing_counts(
        out: &mut impl Write,
        title: &str,
        counts: &[(String, usize)],
    ) -> io::Result<()> {
        writeln!(out, "{}:", title)?;
        let width = counts.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, count) in counts {
            writeln!(out, "  {:<width$}  {}", name, count, width = width)?;
        }
        writeln!(out)
    }

    pub fn frequency_table(
        out: &mut impl Write,
        title: &str,
        entries: &[FrequencyEntry],
    ) -> io::Result<()> {
        writeln!(out, "{}:", title)?;
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        }
        let width = entries.iter().map(|e| e.value.chars().count()).max().unwrap_or(0);
        for entry in entries {
            writeln!(out, "  {:<width$}  {}", entry.value, entry.count, width = width)?;
        }
        writeln!(out)
    }

    /// Every statistic of the run, in report order.
    pub fn summary(out: &mut impl Write, summary: &AnalysisSummary, top_n: usize) -> io::Result<()> {
        Self::frequency_table(out, "Brand frequency", &summary.brand_counts)?;

        writeln!(out, "Average price: {}", money(summary.price.mean))?;
        writeln!(out, "Maximum price: {}", money(summary.price.max))?;
        writeln!(out, "Minimum price: {}", money(summary.price.min))?;
        writeln!(out, "Average available: {}", decimal(summary.quantities.available))?;
        writeln!(out, "Average sold: {}", decimal(summary.quantities.sold))?;
        writeln!(out)?;

        Self::frequency_table(
            out,
            &format!("Item location top {}", top_n),
            &summary.top_locations,
        )?;
        Self::frequency_table(out, "Listings per category", &summary.category_counts)?;

        for category in Category::ALL {
            if let Some(c) = summary.category(category) {
                writeln!(
                    out,
                    "Average available ({}): {}",
                    category,
                    decimal(c.quantities.available)
                )?;
            }
        }
        for category in Category::ALL {
            if let Some(c) = summary.category(category) {
                writeln!(out, "Average sold ({}): {}", category, decimal(c.quantities.sold))?;
            }
        }
        writeln!(out)?;

        for category in Category::ALL {
            if let Some(c) = summary.category(category) {
                Self::frequency_table(
                    out,
                    &format!("Item location top {} ({})", top_n, category),
                    &c.top_locations,
                )?;
            }
        }

        Ok(())
    }
}
