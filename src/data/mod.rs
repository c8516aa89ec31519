//! Data module - CSV loading, merging and cleaning

pub mod listing;
mod loader;
mod processor;

pub use listing::{Category, Listing};
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, FillValue, ProcessorError, MISSING_VALUE_DEFAULTS};
