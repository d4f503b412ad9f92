//! Chart geometry models

/// Affine mapping from (index, value) to pixel coordinates.
///
/// Built per render from the series being drawn; x spacing is by index, not
/// by real time delta.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: u32,
    pub height: u32,
    pub pad_x: f64,
    pub pad_y: f64,
    count: usize,
    min_val: f64,
    /// `None` for a flat series
    range: Option<f64>,
}

impl ChartGeometry {
    pub fn fit(values: &[f64], width: u32, height: u32, pad_x: f64, pad_y: f64) -> Self {
        let min_val = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_val = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max_val - min_val;

        Self {
            width,
            height,
            pad_x,
            pad_y,
            count: values.len(),
            min_val: if min_val.is_finite() { min_val } else { 0.0 },
            range: (range.is_finite() && range > 0.0).then_some(range),
        }
    }

    pub fn x(&self, index: usize) -> f64 {
        if self.count < 2 {
            return self.pad_x;
        }
        let inner = f64::from(self.width) - 2.0 * self.pad_x;
        index as f64 / (self.count - 1) as f64 * inner + self.pad_x
    }

    /// Larger values map higher up (smaller y); a flat series sits on the vertical center
    pub fn y(&self, value: f64) -> f64 {
        let height = f64::from(self.height);
        match self.range {
            Some(range) => height - self.pad_y - (value - self.min_val) / range * (height - 2.0 * self.pad_y),
            None => height / 2.0,
        }
    }

    pub fn map(&self, index: usize, value: f64) -> (f64, f64) {
        (self.x(index), self.y(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_point_mapping() {
        let geometry = ChartGeometry::fit(&[10.0, 20.0, 10.0], 800, 400, 20.0, 20.0);
        assert_eq!(geometry.map(0, 10.0), (20.0, 380.0));
        assert_eq!(geometry.map(1, 20.0), (400.0, 20.0));
        assert_eq!(geometry.map(2, 10.0), (780.0, 380.0));
    }

    #[test]
    fn test_flat_series_is_centered() {
        let geometry = ChartGeometry::fit(&[5.0, 5.0, 5.0], 800, 400, 20.0, 20.0);
        assert_eq!(geometry.y(5.0), 200.0);
    }

    #[test]
    fn test_single_point_does_not_divide_by_zero() {
        let geometry = ChartGeometry::fit(&[5.0], 800, 400, 20.0, 20.0);
        assert_eq!(geometry.x(0), 20.0);
    }
}
