//! CSV Data Loader Module
//! Reads the two listing files into Polars DataFrames.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Rows scanned for schema inference.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a single CSV file with a header row.
    ///
    /// A missing file is reported as [`LoaderError::FileNotFound`] before
    /// Polars is asked to read anything.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        debug!("Reading {}", path.display());
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Load the men's and women's files.
    ///
    /// Both paths are checked up front so nothing is read when either is absent.
    pub fn load_pair(men: &Path, women: &Path) -> Result<(DataFrame, DataFrame), LoaderError> {
        for path in [men, women] {
            if !path.is_file() {
                return Err(LoaderError::FileNotFound(path.to_path_buf()));
            }
        }

        let men_df = Self::load_csv(men)?;
        let women_df = Self::load_csv(women)?;
        Ok((men_df, women_df))
    }

    /// Column names of a frame, in order.
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
