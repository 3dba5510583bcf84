//! Fetch lifecycle and staleness guard for one chart.
//!
//! Window switches can outrun slow fetches: the user flips from 1h to 1d
//! while the 1h response is still in flight. Every fetch carries a ticket
//! from a monotonic counter, and only the latest ticket may touch the
//! chart. Anything older resolves to [`Resolution::Stale`] and is
//! dropped without side effects.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use voltwatch_types::{Page, TelemetryRecord, Window};

use super::range::compute_range;
use super::series::build_series_in;
use super::sink::ChartSink;

/// Authorization for one in-flight window fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    window: Window,
}

impl FetchTicket {
    pub fn window(&self) -> Window {
        self.window
    }
}

/// What [`ChartController::resolve`] did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The fetch was current and the sink was updated.
    Applied,
    /// A newer fetch superseded this one; nothing was touched.
    Stale,
}

/// Render phase of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPhase {
    /// Nothing drawn yet.
    #[default]
    Uninitialized,
    /// Series exist on the sink and can be patched in place.
    Ready,
    /// The last fetch failed; the next success rebuilds from scratch.
    Failed,
}

/// Drives the chart for one page through window switches and refreshes.
#[derive(Debug)]
pub struct ChartController {
    page: Page,
    window: Window,
    phase: ChartPhase,
    issued: u64,
}

impl ChartController {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            window: Window::default(),
            phase: ChartPhase::Uninitialized,
            issued: 0,
        }
    }

    /// Replacement controller for a page switch.
    ///
    /// Fetches dispatched by this controller may still be in flight, so
    /// the replacement carries the ticket counter forward; a fresh
    /// counter would re-issue sequence numbers the old fetches already
    /// hold and let a superseded response pass the staleness check.
    pub fn replace(&self, page: Page) -> Self {
        Self {
            page,
            window: self.window,
            phase: ChartPhase::Uninitialized,
            issued: self.issued,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    /// Switch the active window and issue a ticket for its fetch.
    pub fn select_window(&mut self, window: Window) -> FetchTicket {
        self.window = window;
        self.issue()
    }

    /// Issue a ticket to re-fetch the current window.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            window: self.window,
        }
    }

    /// Resolve a completed fetch against the sink, in local display time.
    pub fn resolve<E: Display>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<TelemetryRecord>, E>,
        sink: &mut dyn ChartSink,
    ) -> Resolution {
        self.resolve_in(ticket, outcome, &Local, sink)
    }

    /// Resolve a completed fetch with an explicit display timezone.
    ///
    /// Only the most recently issued ticket is applied. On success the
    /// records become series: a `Ready` chart is patched series by
    /// series, any other phase gets a full rebuild. On error the sink is
    /// flagged stale and existing series are left alone.
    pub fn resolve_in<Tz: TimeZone, E: Display>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<TelemetryRecord>, E>,
        tz: &Tz,
        sink: &mut dyn ChartSink,
    ) -> Resolution {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                window = %ticket.window,
                "discarding superseded fetch"
            );
            return Resolution::Stale;
        }

        match outcome {
            Ok(records) => {
                let series = build_series_in(&records, self.page.fields(), tz);
                let range = compute_range(&series);

                if self.phase == ChartPhase::Ready {
                    for (index, s) in series.iter().enumerate() {
                        sink.patch_series(index, &s.points);
                    }
                    if let Some(range) = range {
                        sink.set_range(range);
                    }
                } else {
                    sink.create(&series, range);
                }
                self.phase = ChartPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(
                    page = %self.page,
                    window = %ticket.window,
                    error = %err,
                    "window fetch failed"
                );
                sink.set_error_state(&err.to_string());
                self.phase = ChartPhase::Failed;
            }
        }

        Resolution::Applied
    }
}
