//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`chart`]: Telemetry chart for the active page and time window
//! - [`live`]: Gauge strip showing the latest streamed reading
//! - [`alerts`]: Paged alert log table with sortable columns
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │ Live Gauges (live::render)           │  telemetry views only
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (chart/alerts::render)               │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod alerts;
pub mod chart;
pub mod common;
pub mod live;
pub mod theme;

pub use chart::TuiChart;
pub use theme::Theme;
