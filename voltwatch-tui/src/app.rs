//! Application state and the command pipeline.
//!
//! Keystrokes arrive as typed [`Command`]s and [`App::handle`] is the only
//! entry point that acts on them. Fetches run on spawned tasks and report
//! back as [`FetchOutcome`] messages over an mpsc channel; the run loop
//! drains that channel every tick and folds each outcome into the chart
//! controller, the alert pager, or the signal readout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use voltwatch_client::{AlertQuery, AlertsPage, StationClient};
use voltwatch_types::{
    evaluate_reading, evaluate_signal, LiveReading, Page, SignalQuality, SignalReport,
    TelemetryRecord, Window,
};

use crate::alerts::{AlertFilters, AlertTicket, AlertsPager, AlertsPhase};
use crate::chart::{ChartController, ChartPhase, FetchTicket};
use crate::config::AppConfig;
use crate::events::Command;
use crate::source::{LiveSource, SourceError, WindowSource};
use crate::ui::{Theme, TuiChart};

/// The current view/tab in the TUI.
///
/// The four telemetry pages share one view; which page is shown is
/// `App::page`. Alerts are their own view with their own key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Time-series chart plus the live gauge strip for the active page.
    Telemetry,
    /// The paged alert browser.
    Alerts,
}

/// A completed background fetch, shipped back to the run loop.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A window of telemetry records for one page's chart.
    Window {
        page: Page,
        ticket: FetchTicket,
        result: Result<Vec<TelemetryRecord>, SourceError>,
    },
    /// One page of the alert log.
    Alerts {
        ticket: AlertTicket,
        result: Result<AlertsPage, SourceError>,
    },
    /// The cellular signal report.
    Signal {
        result: Result<SignalReport, SourceError>,
    },
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub view: View,
    pub show_help: bool,

    // Telemetry chart for the active page
    pub page: Page,
    pub window: Window,
    controller: ChartController,
    pub chart: TuiChart,

    // Alert browser
    pub alerts: AlertsPager,

    // Instantaneous readouts
    pub live: Option<LiveReading>,
    pub signal: Option<SignalReport>,
    pub signal_error: Option<String>,

    // Acquisition
    source: Arc<dyn WindowSource>,
    client: Option<StationClient>,
    live_source: Option<LiveSource>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    outcome_rx: mpsc::Receiver<FetchOutcome>,

    /// Auto-refresh interval; zero disables.
    pub refresh_interval: Duration,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App over the given acquisition backends.
    ///
    /// `client` is `None` when running off captured files; the alert and
    /// signal views then report that they need a station connection.
    /// Nothing is fetched until [`App::start`].
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn WindowSource>,
        client: Option<StationClient>,
        live_source: Option<LiveSource>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let filters = AlertFilters {
            level: config.alert_level.clone(),
            source: config.alert_source.clone(),
            ..Default::default()
        };

        Self {
            running: true,
            view: View::Telemetry,
            show_help: false,
            page: config.page,
            window: config.window,
            controller: ChartController::new(config.page),
            chart: TuiChart::new(),
            alerts: AlertsPager::new(filters),
            live: None,
            signal: None,
            signal_error: None,
            source,
            client,
            live_source,
            outcome_tx,
            outcome_rx,
            refresh_interval: Duration::from_secs(config.refresh_secs),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Kick off the initial fetches. Must run inside a tokio runtime.
    pub fn start(&mut self) {
        let ticket = self.controller.select_window(self.window);
        self.dispatch_window(ticket);
        self.dispatch_signal();
    }

    /// Apply one command from the key mapper.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Quit => self.quit(),
            Command::ToggleHelp => self.toggle_help(),
            Command::SelectPage(page) => self.select_page(page),
            Command::ShowAlerts => self.show_alerts(),
            Command::NextView => self.next_view(),
            Command::PrevView => self.prev_view(),
            Command::NextWindow => self.select_window(self.window.next()),
            Command::PrevWindow => self.select_window(self.window.previous()),
            Command::Refresh => self.refresh(),
            Command::CycleAlertSort => self.alerts.cycle_sort(),
            Command::FlipAlertSort => self.alerts.flip_sort(),
            Command::LoadMoreAlerts => self.load_more_alerts(),
            Command::ResetAlerts => self.alerts.reset(),
        }
    }

    /// Show a telemetry page, rebuilding the chart when the page changes.
    ///
    /// Each page gets a fresh sink and a replacement controller that
    /// keeps the ticket counter, so fetches still in flight stay stale
    /// even after a roundtrip back to their page; cross-page outcomes die
    /// against the page tag in [`FetchOutcome::Window`].
    pub fn select_page(&mut self, page: Page) {
        if self.view == View::Telemetry && self.page == page {
            return;
        }
        self.view = View::Telemetry;
        if self.page != page {
            self.page = page;
            self.controller = self.controller.replace(page);
            self.chart = TuiChart::new();
        }
        let ticket = self.controller.select_window(self.window);
        self.dispatch_window(ticket);
    }

    /// Switch to the alerts view, fetching the first page on first visit.
    pub fn show_alerts(&mut self) {
        self.view = View::Alerts;
        if *self.alerts.phase() == AlertsPhase::Loading && self.alerts.rows().is_empty() {
            self.fetch_first_alerts();
        }
    }

    /// Switch to the next tab (pages in order, then alerts, wrapping).
    pub fn next_view(&mut self) {
        match self.view {
            View::Telemetry => {
                if self.page == Page::Network {
                    self.show_alerts();
                } else {
                    self.select_page(self.page.next());
                }
            }
            View::Alerts => self.select_page(Page::System),
        }
    }

    /// Switch to the previous tab.
    pub fn prev_view(&mut self) {
        match self.view {
            View::Telemetry => {
                if self.page == Page::System {
                    self.show_alerts();
                } else {
                    self.select_page(self.page.previous());
                }
            }
            View::Alerts => self.select_page(Page::Network),
        }
    }

    /// Change the chart window and fetch it.
    pub fn select_window(&mut self, window: Window) {
        self.window = window;
        let ticket = self.controller.select_window(window);
        self.dispatch_window(ticket);
    }

    /// Refetch whatever the active view shows.
    pub fn refresh(&mut self) {
        match self.view {
            View::Telemetry => {
                let ticket = self.controller.refresh();
                self.dispatch_window(ticket);
            }
            View::Alerts => self.fetch_first_alerts(),
        }
        self.dispatch_signal();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Background refresh tick: keep the chart and signal current without
    /// touching the alert browser (reloading it would drop the user's
    /// paging and sort).
    pub fn auto_refresh(&mut self) {
        let ticket = self.controller.refresh();
        self.dispatch_window(ticket);
        self.dispatch_signal();
    }

    fn load_more_alerts(&mut self) {
        match self.alerts.load_more() {
            Some((ticket, query)) => self.dispatch_alerts(ticket, query),
            None => self.set_status_message("No more alerts to load".to_string()),
        }
    }

    fn fetch_first_alerts(&mut self) {
        let (ticket, query) = self.alerts.first_page();
        self.dispatch_alerts(ticket, query);
    }

    fn dispatch_window(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        let page = self.page;
        tokio::spawn(async move {
            let result = source.fetch_window(page, ticket.window()).await;
            let _ = tx
                .send(FetchOutcome::Window {
                    page,
                    ticket,
                    result,
                })
                .await;
        });
    }

    fn dispatch_alerts(&mut self, ticket: AlertTicket, query: AlertQuery) {
        let Some(client) = self.client.clone() else {
            self.alerts.apply(ticket, Err(offline_error()));
            return;
        };
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client
                .fetch_alerts(&query)
                .await
                .map_err(SourceError::from);
            let _ = tx.send(FetchOutcome::Alerts { ticket, result }).await;
        });
    }

    fn dispatch_signal(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_signal().await.map_err(SourceError::from);
            let _ = tx.send(FetchOutcome::Signal { result }).await;
        });
    }

    /// Fold every completed fetch into the application state.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Window {
                page,
                ticket,
                result,
            } => {
                // Controller sequence numbers restart when the page
                // changes, so outcomes for other pages must be dropped
                // before they reach the new controller.
                if page != self.page {
                    tracing::debug!(%page, "discarding fetch for a page no longer shown");
                    return;
                }
                self.controller.resolve(ticket, result, &mut self.chart);
            }
            FetchOutcome::Alerts { ticket, result } => {
                self.alerts.apply(ticket, result);
            }
            FetchOutcome::Signal { result } => match result {
                Ok(report) => {
                    self.signal = Some(report);
                    self.signal_error = None;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "signal fetch failed");
                    self.signal_error = Some(err.to_string());
                }
            },
        }
    }

    /// Take the latest live reading, if a feed is attached and has one.
    pub fn poll_live(&mut self) {
        let Some(live) = self.live_source.as_mut() else {
            return;
        };
        if let Some(reading) = live.poll() {
            self.live = Some(reading);
        }
    }

    /// Whether a live feed is attached at all.
    pub fn has_live_feed(&self) -> bool {
        self.live_source.is_some()
    }

    /// Last error reported by the live feed reader.
    pub fn live_error(&self) -> Option<String> {
        self.live_source.as_ref().and_then(|source| source.last_error())
    }

    /// Render phase of the active page's chart.
    pub fn chart_phase(&self) -> ChartPhase {
        self.controller.phase()
    }

    /// Returns a description of the window data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Quality tier for the header badge.
    ///
    /// The station's own label wins when it sent one, then a score over
    /// the report's raw metrics, then a score over the latest live
    /// reading (network-page feeds stream the same three metrics).
    pub fn signal_quality(&self) -> Option<SignalQuality> {
        if let Some(report) = &self.signal {
            if let Some(quality) = report.parsed_quality() {
                return Some(quality);
            }
            if let (Some(rsrp), Some(rsrq), Some(sinr)) =
                (report.rsrp, report.rsrq, report.sinr)
            {
                return Some(evaluate_signal(rsrp, rsrq, sinr));
            }
        }
        self.live.as_ref().and_then(evaluate_reading)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn offline_error() -> SourceError {
    SourceError::Transport("alerts require a station connection".to_string())
}
