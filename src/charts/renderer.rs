//! Static Chart Renderer
//! Draws the four charts into RGB buffers with plotters and saves them as PNG.
//!
//! Layout of every chart:
//! 1. Caption centred on top
//! 2. Cartesian plot with labelled axes
//! 3. Legend (category charts only)

use crate::charts::data::{category_rgb, ChartData, ChartKind, NEUTRAL_RGB};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 28;
const POINT_RADIUS: u32 = 3;
const BOX_HALF_WIDTH: f64 = 0.25;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to encode chart image: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `output_dir`, returning the written paths in
    /// [`ChartKind::ALL`] order.
    pub fn render_all(
        data: &ChartData,
        output_dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, ChartError> {
        std::fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let path = output_dir.join(kind.file_name());
            Self::render_to_file(kind, data, &path, width, height)?;
            info!("Chart saved: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Render one chart and save it as PNG.
    pub fn render_to_file(
        kind: ChartKind,
        data: &ChartData,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ChartError> {
        let buffer = Self::render_to_buffer(kind, data, width, height)?;
        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ChartError::Render("pixel buffer size mismatch".to_string()))?;
        img.save(path)?;
        Ok(())
    }

    /// Render one chart into a packed RGB buffer of `width * height * 3` bytes.
    pub fn render_to_buffer(
        kind: ChartKind,
        data: &ChartData,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ChartError> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            match kind {
                ChartKind::PriceHistogram => Self::draw_histogram(&root, data)?,
                ChartKind::AvailableVsSold => Self::draw_scatter(&root, data, false)?,
                ChartKind::PriceByCategory => Self::draw_boxplot(&root, data)?,
                ChartKind::AvailableVsSoldByCategory => Self::draw_scatter(&root, data, true)?,
            }

            root.present()?;
        }
        Ok(buffer)
    }

    fn draw_histogram(root: &Area, data: &ChartData) -> Result<(), ChartError> {
        let (x_min, x_max) = match (data.histogram.first(), data.histogram.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let top = data.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        let y_max = (top.max(1) as f64) * 1.1;

        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::PriceHistogram.title(), (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Price (USD)")
            .y_desc("Listings")
            .draw()?;

        let fill = rgb(NEUTRAL_RGB);
        chart.draw_series(data.histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                fill.mix(0.8).filled(),
            )
        }))?;
        chart.draw_series(data.histogram.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], WHITE)
        }))?;

        Ok(())
    }

    fn draw_scatter(root: &Area, data: &ChartData, by_category: bool) -> Result<(), ChartError> {
        let (x_max, y_max) = data.scatter_extent();
        let kind = if by_category {
            ChartKind::AvailableVsSoldByCategory
        } else {
            ChartKind::AvailableVsSold
        };

        let mut chart = ChartBuilder::on(root)
            .caption(kind.title(), (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max * 1.05, 0f64..y_max * 1.05)?;

        chart
            .configure_mesh()
            .x_desc("Available")
            .y_desc("Sold")
            .draw()?;

        if !by_category {
            let color = rgb(NEUTRAL_RGB);
            chart.draw_series(data.points.iter().map(|p| {
                Circle::new((p.available, p.sold), POINT_RADIUS, color.mix(0.6).filled())
            }))?;
            return Ok(());
        }

        for category in crate::data::Category::ALL {
            let color = rgb(category_rgb(category));
            chart
                .draw_series(data.points_in(category).map(|p| {
                    Circle::new((p.available, p.sold), POINT_RADIUS, color.mix(0.6).filled())
                }))?
                .label(category.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    fn draw_boxplot(root: &Area, data: &ChartData) -> Result<(), ChartError> {
        let (lo, hi) = data.price_extent().unwrap_or((0.0, 1.0));
        let pad = ((hi - lo) * 0.1).max(1.0);
        let groups = &data.price_groups;
        let labels: Vec<&'static str> = groups.iter().map(|g| g.category.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::PriceByCategory.title(), (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(groups.len() as f64 - 0.5), (lo - pad)..(hi + pad))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(groups.len() * 2 + 1)
            .x_label_formatter(&|x| {
                let idx = x.round();
                if (x - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
            })
            .x_desc("Category")
            .y_desc("Price (USD)")
            .draw()?;

        for (i, group) in groups.iter().enumerate() {
            let Some(stats) = group.box_stats else {
                continue;
            };
            let color = rgb(category_rgb(group.category));
            let cx = i as f64;
            let (left, right) = (cx - BOX_HALF_WIDTH, cx + BOX_HALF_WIDTH);
            let cap = BOX_HALF_WIDTH / 2.0;

            // Box
            chart.draw_series(std::iter::once(Rectangle::new(
                [(left, stats.q1), (right, stats.q3)],
                color.mix(0.3).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(left, stats.q1), (right, stats.q3)],
                color.stroke_width(2),
            )))?;

            // Median, whiskers and caps
            let segments = [
                [(left, stats.median), (right, stats.median)],
                [(cx, stats.lower_whisker), (cx, stats.q1)],
                [(cx, stats.q3), (cx, stats.upper_whisker)],
                [(cx - cap, stats.lower_whisker), (cx + cap, stats.lower_whisker)],
                [(cx - cap, stats.upper_whisker), (cx + cap, stats.upper_whisker)],
            ];
            chart.draw_series(
                segments
                    .iter()
                    .map(|seg| PathElement::new(seg.to_vec(), color.stroke_width(2))),
            )?;

            // All points, spread sideways so duplicates stay visible
            chart.draw_series(group.prices.iter().enumerate().map(|(j, &price)| {
                let offset = ((j % 11) as f64 / 10.0 - 0.5) * BOX_HALF_WIDTH;
                Circle::new((cx + offset, price), 2, color.mix(0.7).filled())
            }))?;

            // Mean marker
            chart.draw_series(std::iter::once(Cross::new(
                (cx, stats.mean),
                5,
                BLACK.stroke_width(2),
            )))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_from_drawing_error() {
        let err: ChartError =
            DrawingAreaErrorKind::<std::io::Error>::LayoutError.into();
        assert!(matches!(err, ChartError::Render(_)));
    }
}
