//! Live reading gauge strip.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::app::App;

/// Render one gauge per manifest field with the latest live values.
///
/// Gauges sit dimmed at zero until the first reading arrives; a reading
/// that carried an error instead of data leaves them dimmed too.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app.page.fields();
    if fields.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, fields.len() as u32); fields.len()];
    let chunks = Layout::horizontal(constraints).split(area);

    for (field, chunk) in fields.iter().zip(chunks.iter()) {
        let range = app.page.gauge_range(field.field_key);
        let value = app
            .live
            .as_ref()
            .filter(|reading| reading.has_data())
            .and_then(|reading| reading.numeric_value(field.field_key));

        let block = Block::default()
            .title(format!(" {} ", field.display_name))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        let gauge = match (value, range) {
            (Some(value), Some(range)) => Gauge::default()
                .block(block)
                .ratio(range.ratio(value))
                .label(format!("{value:.1} {}", range.unit))
                .gauge_style(Style::default().fg(app.theme.highlight)),
            (Some(value), None) => Gauge::default()
                .block(block)
                .ratio(0.0)
                .label(format!("{value:.1}"))
                .gauge_style(Style::default().fg(app.theme.highlight)),
            (None, _) => Gauge::default()
                .block(block)
                .ratio(0.0)
                .label("-")
                .gauge_style(Style::default().add_modifier(Modifier::DIM)),
        };

        frame.render_widget(gauge, *chunk);
    }
}
