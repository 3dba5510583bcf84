//! Telemetry chart widget backed by [`ChartSink`].
//!
//! [`TuiChart`] buffers whatever the controller resolves into it; the
//! render pass turns those buffers into a ratatui `Chart` each frame.

use chrono::DateTime;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::chart::{ChartSink, DisplayRange, Series, SeriesPoint};

/// Buffered chart state, written by the controller and read by the renderer.
#[derive(Debug, Default)]
pub struct TuiChart {
    series: Vec<BufferedSeries>,
    range: Option<DisplayRange>,
    error: Option<String>,
    initialized: bool,
}

#[derive(Debug)]
struct BufferedSeries {
    name: String,
    points: Vec<(f64, f64)>,
}

impl TuiChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a successful fetch has populated the chart at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl ChartSink for TuiChart {
    fn create(&mut self, series: &[Series], range: Option<DisplayRange>) {
        self.series = series
            .iter()
            .map(|s| BufferedSeries {
                name: s.name.clone(),
                points: s.points.iter().map(SeriesPoint::xy).collect(),
            })
            .collect();
        self.range = range;
        self.error = None;
        self.initialized = true;
    }

    fn patch_series(&mut self, index: usize, points: &[SeriesPoint]) {
        let Some(series) = self.series.get_mut(index) else {
            tracing::warn!(index, "patch for a series the chart does not have");
            return;
        };
        series.points = points.iter().map(SeriesPoint::xy).collect();
    }

    fn set_range(&mut self, range: DisplayRange) {
        self.range = Some(range);
    }

    fn set_error_state(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

/// Render the telemetry chart for the active page and window.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chart = &app.chart;
    let title = format!(" {} ({}) ", app.page.title(), app.window.label());

    if !chart.initialized {
        render_placeholder(frame, app, area, &title);
        return;
    }

    let border_color = if chart.error.is_some() {
        app.theme.critical
    } else {
        app.theme.border
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border_color));

    let bounds = x_bounds(&chart.series);
    let (Some(range), Some((x_min, x_max))) = (chart.range, bounds) else {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "No data in this window",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .centered()
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.name.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.series_color(i)))
                .data(&s.points)
        })
        .collect();

    let y = range.widened_for_display();
    let x_labels = vec![
        Span::raw(time_label(x_min)),
        Span::raw(time_label((x_min + x_max) / 2.0)),
        Span::raw(time_label(x_max)),
    ];
    let y_labels = vec![
        Span::raw(format!("{:.1}", y.min)),
        Span::raw(format!("{:.1}", (y.min + y.max) / 2.0)),
        Span::raw(format!("{:.1}", y.max)),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y.min, y.max])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let (message, style, border_color) = match &app.chart.error {
        Some(error) => (
            format!("Error fetching data: {error}"),
            Style::default().fg(app.theme.critical),
            app.theme.critical,
        ),
        None => (
            "Loading telemetry...".to_string(),
            Style::default().add_modifier(Modifier::DIM),
            app.theme.border,
        ),
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border_color));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(message, style)),
    ])
    .centered()
    .block(block);
    frame.render_widget(paragraph, area);
}

/// The x-axis span covering every buffered point.
///
/// A lone sample has no span, so pad it out to a drawable minute.
fn x_bounds(series: &[BufferedSeries]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for s in series {
        for &(x, _) in &s.points {
            min = min.min(x);
            max = max.max(x);
        }
    }

    if min > max {
        return None;
    }
    if max - min < 1.0 {
        return Some((min - 30_000.0, max + 30_000.0));
    }
    Some((min, max))
}

/// Format a display-shifted epoch millisecond value as an axis label.
///
/// Points carry local wall time already, so the label is read straight
/// off the instant without another timezone conversion.
fn time_label(ts_ms: f64) -> String {
    match DateTime::from_timestamp_millis(ts_ms as i64) {
        Some(instant) => instant.format("%m/%d %I:%M%p").to_string(),
        None => String::new(),
    }
}
