//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::data::{category_rgb, ChartData, ChartKind, NEUTRAL_RGB};
use crate::data::Category;
use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points,
};
use std::sync::Arc;

pub const NEUTRAL_COLOR: Color32 = Color32::from_rgb(NEUTRAL_RGB.0, NEUTRAL_RGB.1, NEUTRAL_RGB.2);

/// Creates the interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a category.
    pub fn category_color(category: Category) -> Color32 {
        let (r, g, b) = category_rgb(category);
        Color32::from_rgb(r, g, b)
    }

    /// Draw the chart of the given kind filling the available space.
    pub fn draw(ui: &mut egui::Ui, kind: ChartKind, data: &Arc<ChartData>) {
        match kind {
            ChartKind::PriceHistogram => Self::draw_histogram(ui, data),
            ChartKind::AvailableVsSold => Self::draw_scatter(ui, data, false),
            ChartKind::PriceByCategory => Self::draw_boxplot(ui, data),
            ChartKind::AvailableVsSoldByCategory => Self::draw_scatter(ui, data, true),
        }
    }

    /// Price histogram; hovering a bar shows its range and count.
    pub fn draw_histogram(ui: &mut egui::Ui, data: &ChartData) {
        let bars: Vec<Bar> = data
            .histogram
            .iter()
            .map(|bin| {
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width(bin.end - bin.start)
                    .name(format!("${:.2} - ${:.2}", bin.start, bin.end))
            })
            .collect();

        Plot::new("price_histogram")
            .x_axis_label("Price (USD)")
            .y_axis_label("Listings")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(NEUTRAL_COLOR).name("Listings"));
            });
    }

    /// Available vs sold scatter. Hover shows brand, price and category of the
    /// nearest listing.
    pub fn draw_scatter(ui: &mut egui::Ui, data: &Arc<ChartData>, by_category: bool) {
        let hover_data = Arc::clone(data);
        let id = if by_category {
            "scatter_by_category"
        } else {
            "scatter_all"
        };

        let mut plot = Plot::new(id)
            .x_axis_label("Available")
            .y_axis_label("Sold")
            .allow_scroll(false)
            .label_formatter(move |_name, value| Self::hover_text(&hover_data, value));
        if by_category {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            if by_category {
                for category in Category::ALL {
                    let points: PlotPoints = data
                        .points_in(category)
                        .map(|p| [p.available, p.sold])
                        .collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(3.0)
                            .color(Self::category_color(category))
                            .name(category.as_str()),
                    );
                }
            } else {
                let points: PlotPoints = data.points.iter().map(|p| [p.available, p.sold]).collect();
                plot_ui.points(Points::new(points).radius(3.0).color(NEUTRAL_COLOR));
            }
        });
    }

    fn hover_text(data: &ChartData, value: &PlotPoint) -> String {
        match data.nearest_point(value.x, value.y) {
            Some(p) => format!(
                "{}\nprice: {}\ncategory: {}\navailable: {}\nsold: {}",
                p.brand,
                p.price.map(|v| format!("${:.2}", v)).unwrap_or_else(|| "-".to_string()),
                p.category,
                p.available,
                p.sold
            ),
            None => format!("available: {:.0}\nsold: {:.0}", value.x, value.y),
        }
    }

    /// Box plot of price per category with every listing overlaid.
    /// X-axis: categories, Y-axis: price
    pub fn draw_boxplot(ui: &mut egui::Ui, data: &ChartData) {
        let labels: Vec<&'static str> = data
            .price_groups
            .iter()
            .map(|g| g.category.as_str())
            .collect();

        Plot::new("price_by_category")
            .legend(Legend::default())
            .x_axis_label("Category")
            .y_axis_label("Price (USD)")
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels
                    .get(idx as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (i, group) in data.price_groups.iter().enumerate() {
                    let Some(stats) = group.box_stats else {
                        continue;
                    };
                    let color = Self::category_color(group.category);
                    let name = group.category.as_str();

                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            stats.lower_whisker,
                            stats.q1,
                            stats.median,
                            stats.q3,
                            stats.upper_whisker,
                        ),
                    )
                    .name(name)
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(name));

                    let points: PlotPoints = group
                        .prices
                        .iter()
                        .enumerate()
                        .map(|(j, &price)| {
                            let offset = ((j % 11) as f64 / 10.0 - 0.5) * 0.35;
                            [i as f64 + offset, price]
                        })
                        .collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(2.5)
                            .color(color.gamma_multiply(0.7))
                            .name(name),
                    );
                }
            });
    }
}
