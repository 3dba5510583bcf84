// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # voltwatch-tui
//!
//! A terminal dashboard and library for watching an off-grid power
//! station: telemetry charts per subsystem, live gauge readings, cellular
//! signal quality, and the station's alert log.
//!
//! ## Architecture
//!
//! The crate is organized around one data pipeline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│  chart   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │(pipeline)│    │(render) │    │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── HttpSource | FileSource | LiveSource        │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, the typed command pipeline, and the
//!   fetch-completion plumbing
//! - **[`source`]**: Acquisition abstraction ([`WindowSource`] trait) with
//!   station HTTP, capture-replay file, and streamed live-reading sources
//! - **[`chart`]**: The record-to-chart pipeline - timestamp
//!   normalization, series construction, range calculation, and the
//!   staleness-guarded [`ChartController`](chart::ChartController)
//! - **[`alerts`]**: Paged, sortable browser state over the station's
//!   alert log
//! - **[`ui`]**: Terminal rendering using ratatui - chart, gauges, alert
//!   table, and theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a station
//! voltwatch --endpoint http://station.local:8000
//!
//! # Replay captured payloads offline
//! voltwatch --file captures/
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use std::sync::Arc;
//! use voltwatch_tui::app::App;
//! use voltwatch_tui::config::AppConfig;
//! use voltwatch_tui::source::FileSource;
//!
//! let source = Arc::new(FileSource::new("captures"));
//! let app = App::new(&AppConfig::default(), source, None, None);
//! ```
//!
//! ### Driving the chart pipeline directly
//!
//! ```
//! use voltwatch_tui::chart::{ChartController, Resolution};
//! use voltwatch_tui::ui::TuiChart;
//! use voltwatch_types::{Page, TelemetryRecord, Window};
//!
//! let mut controller = ChartController::new(Page::System);
//! let mut chart = TuiChart::new();
//!
//! let ticket = controller.select_window(Window::H6);
//! let records = vec![
//!     TelemetryRecord::new("2024-01-15T10:30:00Z").with_value("volts", 13.2),
//! ];
//! let outcome = controller.resolve(ticket, Ok::<_, String>(records), &mut chart);
//! assert_eq!(outcome, Resolution::Applied);
//! assert!(chart.is_initialized());
//! ```

pub mod alerts;
pub mod app;
pub mod chart;
pub mod config;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use alerts::{AlertColumn, AlertFilters, AlertsPager, AlertsPhase};
pub use app::{App, View};
pub use chart::{ChartController, ChartPhase, ChartSink, DisplayRange, Series, SeriesPoint};
pub use config::AppConfig;
pub use source::{FileSource, HttpSource, LiveSource, SourceError, WindowSource};
pub use ui::{Theme, TuiChart};
