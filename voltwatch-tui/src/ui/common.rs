//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::chart::ChartPhase;

/// Render the header bar.
///
/// Displays: fetch status indicator, data source, signal badge, clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let indicator = match app.chart_phase() {
        ChartPhase::Ready => Span::styled(" ● ", Style::default().fg(app.theme.healthy)),
        ChartPhase::Failed => Span::styled(" ● ", Style::default().fg(app.theme.critical)),
        ChartPhase::Uninitialized => {
            Span::styled(" ● ", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let signal = match app.signal_quality() {
        Some(quality) => Span::styled(
            format!("Signal: {}", quality.label()),
            app.theme.quality_style(quality),
        ),
        None if app.signal_error.is_some() => Span::styled(
            "Signal: unavailable",
            Style::default().add_modifier(Modifier::DIM),
        ),
        None => Span::styled("Signal: -", Style::default().add_modifier(Modifier::DIM)),
    };

    let line = Line::from(vec![
        indicator,
        Span::styled("VOLTWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ "),
        signal,
        Span::raw(" │ "),
        Span::raw(Local::now().format("%H:%M:%S").to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing the telemetry pages and the alerts view.
///
/// Highlights the currently active tab.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:System "),
        Line::from(" 2:Router "),
        Line::from(" 3:Camera "),
        Line::from(" 4:Network "),
        Line::from(" 5:Alerts "),
    ];

    let selected = match app.view {
        View::Telemetry => app.page.index(),
        View::Alerts => 4,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the page breadcrumb and available controls, with temporary
/// status messages taking priority over everything else.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let live_info = match app.live_error() {
        Some(err) => format!("live: {} | ", err),
        None => String::new(),
    };

    let status = match app.view {
        View::Telemetry => format!(
            " {} ({}) | {}1-4:page 5:alerts [/]:window r:refresh ?:help q:quit",
            app.page.title(),
            app.window.label(),
            live_info,
        ),
        View::Alerts => format!(
            " Alerts | {}s:sort S:reverse n:more 0:reset r:refresh ?:help q:quit",
            live_info,
        ),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1-4         Telemetry pages"),
        Line::from("  5 / a       Alerts view"),
        Line::from("  Tab/S-Tab   Next/previous view"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Telemetry",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ] or PgDn   Next time window"),
        Line::from("  [ or PgUp   Previous time window"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Alerts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  s           Cycle sort column"),
        Line::from("  S           Toggle sort direction"),
        Line::from("  n           Load next page"),
        Line::from("  0           Reset to first page"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
