//! Alert log table.

use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::alerts::{AlertColumn, AlertsPhase};
use crate::app::App;
use crate::chart::timestamp::normalize;

/// Render the alert browser: a table of fetched rows plus a paging footer.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let pager = &app.alerts;

    if pager.rows().is_empty() {
        match pager.phase() {
            AlertsPhase::Failed(message) => {
                render_message(
                    frame,
                    app,
                    area,
                    format!("Error fetching alerts: {message}"),
                    Style::default().fg(app.theme.critical),
                    app.theme.critical,
                );
            }
            AlertsPhase::Empty => {
                let message = if pager.filters().is_empty() {
                    "No alerts recorded"
                } else {
                    "No alerts match the active filters"
                };
                render_message(
                    frame,
                    app,
                    area,
                    message.to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                    app.theme.border,
                );
            }
            _ => {
                render_message(
                    frame,
                    app,
                    area,
                    "Loading alerts...".to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                    app.theme.border,
                );
            }
        }
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    let header = Row::new(vec![
        Cell::from(format_header(AlertColumn::Timestamp, app)),
        Cell::from(format_header(AlertColumn::Source, app)),
        Cell::from(format_header(AlertColumn::Level, app)),
        Cell::from(format_header(AlertColumn::Value, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = pager
        .rows()
        .iter()
        .map(|alert| {
            Row::new(vec![
                Cell::from(timestamp_cell(&alert.timestamp)),
                Cell::from(alert.source.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(alert.level.clone()).style(app.theme.level_style(&alert.level)),
                Cell::from(alert.value_text()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(15), // Timestamp - fixed
        Constraint::Fill(2),    // Source
        Constraint::Length(10), // Level - fixed
        Constraint::Fill(3),    // Value
    ];

    let sort_info = match pager.sort() {
        Some((column, ascending)) => format!(
            " [sort: {}{}]",
            column.label().to_lowercase(),
            if ascending { "↑" } else { "↓" }
        ),
        None => String::new(),
    };
    let more = if pager.has_more() { "+" } else { "" };
    let title = format!(" Alerts ({}{}){} ", pager.rows().len(), more, sort_info);

    let border_color = if matches!(pager.phase(), AlertsPhase::Failed(_)) {
        app.theme.critical
    } else {
        app.theme.border
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(table, chunks[0]);
    frame.render_widget(footer(app), chunks[1]);
}

fn footer(app: &App) -> Paragraph<'_> {
    let pager = &app.alerts;
    let line = match pager.phase() {
        AlertsPhase::Failed(message) => Line::from(Span::styled(
            format!(" fetch failed: {message}"),
            Style::default().fg(app.theme.critical),
        )),
        AlertsPhase::Loading => Line::from(Span::styled(
            " Loading...",
            Style::default().add_modifier(Modifier::DIM),
        )),
        _ if pager.has_more() => Line::from(Span::styled(
            format!(" {} shown, more available (n to load)", pager.rows().len()),
            Style::default().add_modifier(Modifier::DIM),
        )),
        _ => Line::from(Span::styled(
            format!(" {} shown", pager.rows().len()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    Paragraph::new(line)
}

fn render_message(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    message: String,
    style: Style,
    border_color: ratatui::style::Color,
) {
    let block = Block::default()
        .title(" Alerts ")
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

fn format_header(column: AlertColumn, app: &App) -> Span<'static> {
    match app.alerts.sort() {
        Some((active, ascending)) if active == column => {
            let arrow = if ascending { "↑" } else { "↓" };
            Span::raw(format!("{}{}", column.label(), arrow))
        }
        _ => Span::raw(column.label().to_string()),
    }
}

/// Format an alert timestamp as local wall time, falling back to the raw
/// string when it does not parse.
fn timestamp_cell(raw: &str) -> String {
    normalize(raw)
        .and_then(DateTime::from_timestamp_millis)
        .map(|instant| instant.format("%m/%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}
