//! Listing record and the canonical column layout of the merged table.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const BRAND_COL: &str = "brand";
pub const TYPE_COL: &str = "type";
pub const PRICE_COL: &str = "price";
pub const AVAILABLE_COL: &str = "available";
pub const AVAILABLE_TEXT_COL: &str = "availableText";
pub const SOLD_COL: &str = "sold";
pub const LAST_UPDATED_COL: &str = "lastUpdated";
pub const ITEM_LOCATION_COL: &str = "itemLocation";
pub const CATEGORY_COL: &str = "category";

/// Which source file a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Men, Category::Women];

    /// Label stored in the `category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "men" => Some(Category::Men),
            "women" => Some(Category::Women),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the merged, cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub category: Category,
    pub brand: String,
    pub product_type: String,
    pub price: Option<f64>,
    pub available: i64,
    pub available_text: String,
    pub sold: i64,
    pub last_updated: String,
    pub item_location: Option<String>,
}
