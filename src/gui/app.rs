//! Perfume Dashboard Application
//! Main window with summary panel and chart tabs.

use crate::charts::{ChartData, ChartKind, ChartPlotter};
use crate::data::Category;
use crate::stats::{AnalysisSummary, FrequencyEntry};
use egui::{RichText, SidePanel};
use std::sync::Arc;

/// Rows shown in the side panel brand list
const SIDE_PANEL_BRANDS: usize = 10;

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Main application window.
pub struct PerfumeDashboardApp {
    chart_data: Arc<ChartData>,
    summary: AnalysisSummary,
    selected: ChartKind,
}

impl PerfumeDashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        chart_data: ChartData,
        summary: AnalysisSummary,
    ) -> Self {
        Self {
            chart_data: Arc::new(chart_data),
            summary,
            selected: ChartKind::PriceHistogram,
        }
    }

    fn frequency_grid(ui: &mut egui::Ui, id: &str, entries: &[FrequencyEntry]) {
        egui::Grid::new(id).striped(true).show(ui, |ui| {
            for entry in entries {
                ui.label(entry.value.as_str());
                ui.label(entry.count.to_string());
                ui.end_row();
            }
        });
    }

    fn show_summary(&self, ui: &mut egui::Ui) {
        let s = &self.summary;

        ui.heading("Perfume Listings");
        ui.label(format!("{} listings", s.total_rows));
        ui.separator();

        ui.label(RichText::new("Price").strong());
        ui.label(format!("Average: {}", money(s.price.mean)));
        ui.label(format!("Maximum: {}", money(s.price.max)));
        ui.label(format!("Minimum: {}", money(s.price.min)));
        ui.separator();

        ui.label(RichText::new("By category").strong());
        egui::Grid::new("category_grid").striped(true).show(ui, |ui| {
            ui.label("");
            ui.label("rows");
            ui.label("avg available");
            ui.label("avg sold");
            ui.end_row();
            for category in Category::ALL {
                if let Some(c) = s.category(category) {
                    ui.label(
                        RichText::new(category.as_str())
                            .color(ChartPlotter::category_color(category)),
                    );
                    ui.label(c.rows.to_string());
                    ui.label(
                        c.quantities
                            .available
                            .map(|v| format!("{:.2}", v))
                            .unwrap_or_default(),
                    );
                    ui.label(
                        c.quantities
                            .sold
                            .map(|v| format!("{:.2}", v))
                            .unwrap_or_default(),
                    );
                    ui.end_row();
                }
            }
        });
        ui.separator();

        ui.collapsing("Top brands", |ui| {
            let top: Vec<FrequencyEntry> =
                s.brand_counts.iter().take(SIDE_PANEL_BRANDS).cloned().collect();
            Self::frequency_grid(ui, "brand_grid", &top);
        });
        ui.collapsing("Top item locations", |ui| {
            Self::frequency_grid(ui, "location_grid", &s.top_locations);
        });
    }
}

impl eframe::App for PerfumeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Summary
        SidePanel::left("summary_panel")
            .min_width(280.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_summary(ui);
                });
            });

        // Central panel - Chart tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut self.selected, kind, kind.title());
                }
            });
            ui.separator();
            ui.label(RichText::new(self.selected.title()).size(18.0).strong());
            ChartPlotter::draw(ui, self.selected, &self.chart_data);
        });
    }
}
