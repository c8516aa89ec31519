//! GUI module - Interactive chart window

mod app;

pub use app::PerfumeDashboardApp;

use crate::charts::ChartData;
use crate::stats::AnalysisSummary;
use eframe::egui;

/// Open the dashboard window and block until it is closed.
pub fn run_dashboard(chart_data: ChartData, summary: AnalysisSummary) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Perfume Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Perfume Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(PerfumeDashboardApp::new(cc, chart_data, summary)))),
    )
}
