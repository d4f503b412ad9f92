use plotters::prelude::*;

use crate::models::{ChartGeometry, TimeSeries};
use crate::utils::errors::TrendsError;

/// Stroke color of the trend line (#FEE440)
const LINE_COLOR: RGBColor = RGBColor(0xFE, 0xE4, 0x40);

/// Renders a series as a bare SVG line: white background, one stroke, no axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRenderer {
    pub width: u32,
    pub height: u32,
    pub pad_x: f64,
    pub pad_y: f64,
    pub stroke_width: u32,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            pad_x: 20.0,
            pad_y: 20.0,
            stroke_width: 3,
        }
    }
}

impl ChartRenderer {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn geometry(&self, series: &TimeSeries) -> ChartGeometry {
        ChartGeometry::fit(&series.values(), self.width, self.height, self.pad_x, self.pad_y)
    }

    /// Pixel coordinates of every point, in series order
    pub fn project(&self, series: &TimeSeries) -> Vec<(i32, i32)> {
        let geometry = self.geometry(series);
        series
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let (x, y) = geometry.map(i, v);
                (x.round() as i32, y.round() as i32)
            })
            .collect()
    }

    /// Generate the chart as an SVG document
    pub fn render_svg(&self, series: &TimeSeries) -> Result<String, TrendsError> {
        if !series.is_chartable() {
            return Err(TrendsError::InsufficientData { points: series.len() });
        }

        let coords = self.project(series);
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| TrendsError::Internal(format!("Failed to fill canvas: {}", e)))?;

            // One open polyline: first point is the move, the rest are line-tos
            root.draw(&PathElement::new(coords, LINE_COLOR.stroke_width(self.stroke_width)))
                .map_err(|e| TrendsError::Internal(format!("Failed to draw line: {}", e)))?;

            root.present()
                .map_err(|e| TrendsError::Internal(format!("Failed to render chart: {}", e)))?;
        }

        Ok(svg)
    }
}
