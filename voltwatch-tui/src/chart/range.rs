//! Display range calculation across chart series.

use super::series::Series;

/// Fraction of the value spread added above and below the extremes.
const RANGE_BUFFER: f64 = 0.05;

/// An inclusive y-axis range shared by every series on a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// The range widened enough to draw when min and max coincide.
    ///
    /// A flat series produces a zero-span range; the chart widget cannot
    /// scale against that, so pad by half a unit or 5% of the magnitude,
    /// whichever is larger.
    pub fn widened_for_display(&self) -> Self {
        if self.span() > 0.0 {
            return *self;
        }
        let pad = f64::max(0.5, self.min.abs() * RANGE_BUFFER);
        Self::new(self.min - pad, self.max + pad)
    }
}

/// Compute the shared display range over every point of every series.
///
/// The extremes are taken globally, then buffered by 5% of the spread on
/// each side so points never sit on the chart border. Returns `None` when
/// no series has any points.
pub fn compute_range(series: &[Series]) -> Option<DisplayRange> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for s in series {
        for point in &s.points {
            min = min.min(point.value);
            max = max.max(point.value);
        }
    }

    if min > max {
        return None;
    }

    let buffer = (max - min) * RANGE_BUFFER;
    Some(DisplayRange::new(min - buffer, max + buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::series::SeriesPoint;

    fn series_of(name: &str, values: &[f64]) -> Series {
        let mut s = Series::new(name);
        s.points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| SeriesPoint::new(i as i64, v))
            .collect();
        s
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn buffers_by_five_percent_of_spread() {
        let series = [series_of("Volts", &[3.0, 5.0, 10.0, 20.0])];

        let range = compute_range(&series).unwrap();
        assert_close(range.min, 2.15);
        assert_close(range.max, 20.85);
    }

    #[test]
    fn buffer_is_symmetric_around_the_extremes() {
        let series = [series_of("Watts", &[0.0, 100.0])];

        let range = compute_range(&series).unwrap();
        assert_close(range.min, -5.0);
        assert_close(range.max, 105.0);
    }

    #[test]
    fn extremes_span_all_series() {
        let series = [
            series_of("Volts", &[12.0, 14.0]),
            series_of("Watts", &[2.0, 24.0]),
        ];

        let range = compute_range(&series).unwrap();
        assert_close(range.min, 0.9);
        assert_close(range.max, 25.1);
    }

    #[test]
    fn no_points_means_no_range() {
        assert_eq!(compute_range(&[]), None);
        assert_eq!(compute_range(&[Series::new("Volts")]), None);
    }

    #[test]
    fn single_point_collapses_to_zero_span() {
        let series = [series_of("Volts", &[13.2])];

        let range = compute_range(&series).unwrap();
        assert_eq!(range.min, 13.2);
        assert_eq!(range.max, 13.2);
        assert_eq!(range.span(), 0.0);
    }

    #[test]
    fn widening_pads_a_flat_range() {
        let range = DisplayRange::new(13.2, 13.2).widened_for_display();
        assert!(range.min < 13.2);
        assert!(range.max > 13.2);
        assert!(range.span() >= 1.0);
    }

    #[test]
    fn widening_pads_flat_zero_by_half_a_unit() {
        let range = DisplayRange::new(0.0, 0.0).widened_for_display();
        assert_eq!(range.min, -0.5);
        assert_eq!(range.max, 0.5);
    }

    #[test]
    fn widening_leaves_a_real_range_alone() {
        let range = DisplayRange::new(2.15, 20.85);
        assert_eq!(range.widened_for_display(), range);
    }

    #[test]
    fn negative_values_are_handled() {
        let series = [series_of("RSRP", &[-104.0, -96.0])];

        let range = compute_range(&series).unwrap();
        assert_close(range.min, -104.4);
        assert_close(range.max, -95.6);
    }
}
