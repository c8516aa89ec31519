//! Data Processor Module
//! Handles schema normalisation, category tagging, merging and null filling.

use crate::data::listing::*;
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Unknown category label '{0}' in row {1}")]
    UnknownCategory(String, usize),
}

/// Replacement used for a null cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillValue {
    Text(&'static str),
    Zero,
}

impl FillValue {
    fn to_expr(self) -> Expr {
        match self {
            FillValue::Text(s) => lit(s),
            FillValue::Zero => lit(0i64),
        }
    }
}

/// Per-column substitutions applied by [`DataProcessor::fill_missing`].
pub const MISSING_VALUE_DEFAULTS: [(&str, FillValue); 6] = [
    (BRAND_COL, FillValue::Text("Unknown")),
    (TYPE_COL, FillValue::Text("Unknown")),
    (AVAILABLE_COL, FillValue::Zero),
    (AVAILABLE_TEXT_COL, FillValue::Text("Not available")),
    (SOLD_COL, FillValue::Zero),
    (LAST_UPDATED_COL, FillValue::Text("Unknown")),
];

/// Source columns every listing file must carry, with their target dtype.
fn listing_schema() -> [(&'static str, DataType); 8] {
    [
        (BRAND_COL, DataType::String),
        (TYPE_COL, DataType::String),
        (PRICE_COL, DataType::Float64),
        (AVAILABLE_COL, DataType::Int64),
        (AVAILABLE_TEXT_COL, DataType::String),
        (SOLD_COL, DataType::Int64),
        (LAST_UPDATED_COL, DataType::String),
        (ITEM_LOCATION_COL, DataType::String),
    ]
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Project a raw listing frame onto the canonical columns and dtypes.
    ///
    /// Casts are non-strict, so a malformed numeric cell turns into null.
    /// A missing column fails the collect.
    pub fn normalize_schema(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let exprs: Vec<Expr> = listing_schema()
            .into_iter()
            .map(|(name, dtype)| col(name).cast(dtype))
            .collect();

        Ok(df.clone().lazy().select(exprs).collect()?)
    }

    /// Add the `category` column holding the given label on every row.
    pub fn tag_category(df: &DataFrame, category: Category) -> Result<DataFrame, ProcessorError> {
        let tagged = df
            .clone()
            .lazy()
            .with_column(lit(category.as_str()).alias(CATEGORY_COL))
            .collect()?;
        Ok(tagged)
    }

    /// Stack men's rows above women's rows, keeping order within each.
    pub fn merge(men: &DataFrame, women: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let merged = concat(
            [men.clone().lazy(), women.clone().lazy()],
            UnionArgs::default(),
        )?
        .collect()?;

        debug!(
            "Merged {} + {} rows into {}",
            men.height(),
            women.height(),
            merged.height()
        );
        Ok(merged)
    }

    /// Normalise, tag and merge the two raw source frames.
    pub fn prepare(men_raw: &DataFrame, women_raw: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let men = Self::tag_category(&Self::normalize_schema(men_raw)?, Category::Men)?;
        let women = Self::tag_category(&Self::normalize_schema(women_raw)?, Category::Women)?;
        Self::merge(&men, &women)
    }

    /// Null count of every column, in column order.
    pub fn missing_value_counts(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// Replace nulls using [`MISSING_VALUE_DEFAULTS`]. Other columns are untouched.
    pub fn fill_missing(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let before: usize = df.get_columns().iter().map(|c| c.null_count()).sum();

        let exprs: Vec<Expr> = MISSING_VALUE_DEFAULTS
            .iter()
            .map(|(name, value)| col(*name).fill_null(value.to_expr()))
            .collect();
        let filled = df.clone().lazy().with_columns(exprs).collect()?;

        let after: usize = filled.get_columns().iter().map(|c| c.null_count()).sum();
        info!("Filled {} missing values ({} remain)", before - after, after);
        Ok(filled)
    }

    /// Materialise the rows of a cleaned frame as [`Listing`] records.
    pub fn listings(df: &DataFrame) -> Result<Vec<Listing>, ProcessorError> {
        let category = df.column(CATEGORY_COL)?.str()?;
        let brand = df.column(BRAND_COL)?.str()?;
        let product_type = df.column(TYPE_COL)?.str()?;
        let price = df.column(PRICE_COL)?.f64()?;
        let available = df.column(AVAILABLE_COL)?.i64()?;
        let available_text = df.column(AVAILABLE_TEXT_COL)?.str()?;
        let sold = df.column(SOLD_COL)?.i64()?;
        let last_updated = df.column(LAST_UPDATED_COL)?.str()?;
        let item_location = df.column(ITEM_LOCATION_COL)?.str()?;

        let mut listings = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let label = category.get(i).unwrap_or_default();
            let category = Category::from_label(label)
                .ok_or_else(|| ProcessorError::UnknownCategory(label.to_string(), i))?;

            listings.push(Listing {
                category,
                brand: brand.get(i).unwrap_or("Unknown").to_string(),
                product_type: product_type.get(i).unwrap_or("Unknown").to_string(),
                price: price.get(i),
                available: available.get(i).unwrap_or(0),
                available_text: available_text.get(i).unwrap_or("Not available").to_string(),
                sold: sold.get(i).unwrap_or(0),
                last_updated: last_updated.get(i).unwrap_or("Unknown").to_string(),
                item_location: item_location.get(i).map(str::to_string),
            });
        }

        Ok(listings)
    }
}
