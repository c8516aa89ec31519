//! Charts module - Chart data, static rendering and interactive plotting

mod data;
mod plotter;
mod renderer;

pub use data::{category_rgb, CategoryPrices, ChartData, ChartKind, ScatterPoint};
pub use plotter::ChartPlotter;
pub use renderer::{ChartError, StaticChartRenderer};
