//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use voltwatch_types::SignalQuality;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-level alerts and fair signal.
    pub warning: Color,
    /// Color for critical alerts and poor signal.
    pub critical: Color,
    /// Color for informational alerts and healthy signal.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Chart dataset colors, cycled by series position.
    pub series: [Color; 3],
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            series: [Color::Cyan, Color::Yellow, Color::Magenta],
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            series: [Color::Blue, Color::Red, Color::Magenta],
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get the dataset color for a series position
    pub fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }

    /// Get style for an alert severity level
    pub fn level_style(&self, level: &str) -> Style {
        match level.to_ascii_lowercase().as_str() {
            "critical" | "error" => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            "warning" => Style::default().fg(self.warning),
            "info" => Style::default().fg(self.healthy),
            _ => Style::default(),
        }
    }

    /// Get style for a signal quality tier
    pub fn quality_style(&self, quality: SignalQuality) -> Style {
        match quality {
            SignalQuality::Excellent => {
                Style::default().fg(self.healthy).add_modifier(Modifier::BOLD)
            }
            SignalQuality::Good => Style::default().fg(self.healthy),
            SignalQuality::Fair => Style::default().fg(self.warning),
            SignalQuality::Poor => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }
}
