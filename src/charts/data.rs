//! Chart inputs shared by the static renderer and the interactive viewer.

use crate::data::{Category, Listing};
use crate::stats::{BoxStats, HistogramBin, StatsCalculator};

/// RGB colours per category
pub const MEN_RGB: (u8, u8, u8) = (52, 152, 219); // Blue
pub const WOMEN_RGB: (u8, u8, u8) = (231, 76, 60); // Red
pub const NEUTRAL_RGB: (u8, u8, u8) = (96, 125, 139); // Blue Grey

pub fn category_rgb(category: Category) -> (u8, u8, u8) {
    match category {
        Category::Men => MEN_RGB,
        Category::Women => WOMEN_RGB,
    }
}

/// The four charts produced for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    PriceHistogram,
    AvailableVsSold,
    PriceByCategory,
    AvailableVsSoldByCategory,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::PriceHistogram,
        ChartKind::AvailableVsSold,
        ChartKind::PriceByCategory,
        ChartKind::AvailableVsSoldByCategory,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::PriceHistogram => "Perfume Price Distribution",
            ChartKind::AvailableVsSold => "Available vs Sold",
            ChartKind::PriceByCategory => "Price by Category",
            ChartKind::AvailableVsSoldByCategory => "Available vs Sold by Category",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::PriceHistogram => "price_histogram.png",
            ChartKind::AvailableVsSold => "available_vs_sold.png",
            ChartKind::PriceByCategory => "price_by_category.png",
            ChartKind::AvailableVsSoldByCategory => "available_vs_sold_by_category.png",
        }
    }
}

/// One listing as a point on the available/sold plane, with hover details.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub available: f64,
    pub sold: f64,
    pub category: Category,
    pub brand: String,
    pub price: Option<f64>,
}

/// Prices of one category with their box plot figures.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPrices {
    pub category: Category,
    pub prices: Vec<f64>,
    pub box_stats: Option<BoxStats>,
}

/// Chart data for all four charts
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub histogram: Vec<HistogramBin>,
    pub points: Vec<ScatterPoint>,
    pub price_groups: Vec<CategoryPrices>,
}

impl ChartData {
    pub fn from_listings(listings: &[Listing], histogram_bins: usize) -> Self {
        let prices: Vec<f64> = listings
            .iter()
            .filter_map(|l| l.price)
            .filter(|p| !p.is_nan())
            .collect();

        let points = listings
            .iter()
            .map(|l| ScatterPoint {
                available: l.available as f64,
                sold: l.sold as f64,
                category: l.category,
                brand: l.brand.clone(),
                price: l.price,
            })
            .collect();

        let price_groups = Category::ALL
            .iter()
            .map(|&category| {
                let prices: Vec<f64> = listings
                    .iter()
                    .filter(|l| l.category == category)
                    .filter_map(|l| l.price)
                    .filter(|p| !p.is_nan())
                    .collect();
                CategoryPrices {
                    category,
                    box_stats: StatsCalculator::box_stats(&prices),
                    prices,
                }
            })
            .collect();

        Self {
            histogram: StatsCalculator::histogram(&prices, histogram_bins),
            points,
            price_groups,
        }
    }

    pub fn points_in(&self, category: Category) -> impl Iterator<Item = &ScatterPoint> {
        self.points.iter().filter(move |p| p.category == category)
    }

    /// Largest `(available, sold)` over all points, floored at 1.
    pub fn scatter_extent(&self) -> (f64, f64) {
        self.points.iter().fold((1.0, 1.0), |(x, y), p| {
            (x.max(p.available), y.max(p.sold))
        })
    }

    /// `(min, max)` over every category's prices.
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        self.price_groups
            .iter()
            .flat_map(|g| g.prices.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Point closest to `(x, y)` after scaling each axis by its extent.
    pub fn nearest_point(&self, x: f64, y: f64) -> Option<&ScatterPoint> {
        let (sx, sy) = self.scatter_extent();
        self.points.iter().min_by(|a, b| {
            let da = ((a.available - x) / sx).powi(2) + ((a.sold - y) / sy).powi(2);
            let db = ((b.available - x) / sx).powi(2) + ((b.sold - y) / sy).powi(2);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(category: Category, brand: &str, price: Option<f64>, available: i64, sold: i64) -> Listing {
        Listing {
            category,
            brand: brand.to_string(),
            product_type: "Eau de Parfum".to_string(),
            price,
            available,
            available_text: "Not available".to_string(),
            sold,
            last_updated: "Unknown".to_string(),
            item_location: None,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing(Category::Men, "Dior", Some(50.0), 10, 25),
            listing(Category::Men, "Armani", Some(70.0), 0, 0),
            listing(Category::Women, "Chanel", Some(90.0), 4, 12),
            listing(Category::Women, "Lancome", None, 2, 40),
        ]
    }

    #[test]
    fn test_from_listings_groups_prices_by_category() {
        let data = ChartData::from_listings(&sample(), 30);

        assert_eq!(data.points.len(), 4);
        assert_eq!(data.price_groups.len(), 2);
        assert_eq!(data.price_groups[0].category, Category::Men);
        assert_eq!(data.price_groups[0].prices, vec![50.0, 70.0]);
        assert_eq!(data.price_groups[1].prices, vec![90.0]);
        assert!(data.price_groups[1].box_stats.is_some());

        let binned: usize = data.histogram.iter().map(|b| b.count).sum();
        assert_eq!(binned, 3);
    }

    #[test]
    fn test_points_in_filters_category() {
        let data = ChartData::from_listings(&sample(), 30);
        let brands: Vec<&str> = data
            .points_in(Category::Women)
            .map(|p| p.brand.as_str())
            .collect();
        assert_eq!(brands, vec!["Chanel", "Lancome"]);
    }

    #[test]
    fn test_extents() {
        let data = ChartData::from_listings(&sample(), 30);
        assert_eq!(data.scatter_extent(), (10.0, 40.0));
        assert_eq!(data.price_extent(), Some((50.0, 90.0)));
    }

    #[test]
    fn test_nearest_point() {
        let data = ChartData::from_listings(&sample(), 30);
        let hit = data.nearest_point(9.5, 24.0).unwrap();
        assert_eq!(hit.brand, "Dior");
    }

    #[test]
    fn test_chart_file_names_are_distinct() {
        let mut names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
