//! Output seam between chart state and the rendering widget.

use super::range::DisplayRange;
use super::series::{Series, SeriesPoint};

/// Receives chart state changes from the controller.
///
/// The controller decides *what* changed after each fetch resolves; the
/// sink decides how that looks on screen. Splitting the two keeps the
/// resolve logic testable without a terminal.
pub trait ChartSink {
    /// Replace the whole chart with fresh series and an optional range.
    ///
    /// Called on the first successful fetch and again whenever the chart
    /// has to be rebuilt after an error.
    fn create(&mut self, series: &[Series], range: Option<DisplayRange>);

    /// Replace the points of one existing series, identified by its
    /// position in the series list passed to [`create`](Self::create).
    fn patch_series(&mut self, index: usize, points: &[SeriesPoint]);

    /// Update the shared y-axis range.
    fn set_range(&mut self, range: DisplayRange);

    /// Flag the chart as stale after a failed fetch.
    ///
    /// Existing series stay on screen; only the error marker changes.
    fn set_error_state(&mut self, message: &str);
}
