//! Alert browser state: paging, sorting, and fetch lifecycle.
//!
//! The station serves alerts ten at a time. The pager keeps the rows
//! fetched so far, appends on load-more without disturbing the displayed
//! order, and guards against out-of-order fetch completions the same way
//! the chart controller does.

use std::cmp::Ordering;
use std::fmt::Display;

use voltwatch_client::{AlertQuery, AlertsPage};
use voltwatch_types::AlertRecord;

/// Rows per fetched page.
pub const PAGE_LIMIT: u32 = 10;

/// Where the alert browser is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertsPhase {
    /// First page requested, nothing to show yet.
    Loading,
    /// Rows on screen.
    Loaded,
    /// The station reported no matching alerts.
    Empty,
    /// The last fetch failed with this message.
    Failed(String),
}

/// Sortable columns of the alert table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertColumn {
    Timestamp,
    Source,
    Level,
    Value,
}

impl AlertColumn {
    pub const ALL: [AlertColumn; 4] = [
        AlertColumn::Timestamp,
        AlertColumn::Source,
        AlertColumn::Level,
        AlertColumn::Value,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AlertColumn::Timestamp => "Timestamp",
            AlertColumn::Source => "Source",
            AlertColumn::Level => "Level",
            AlertColumn::Value => "Value",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AlertColumn::Timestamp => AlertColumn::Source,
            AlertColumn::Source => AlertColumn::Level,
            AlertColumn::Level => AlertColumn::Value,
            AlertColumn::Value => AlertColumn::Timestamp,
        }
    }
}

/// Search filters, fixed for the lifetime of the pager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilters {
    /// Inclusive start date, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub end: Option<String>,
    pub level: Option<String>,
    pub source: Option<String>,
}

impl AlertFilters {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.level.is_none() && self.source.is_none()
    }
}

/// Authorization for one in-flight alert fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTicket {
    seq: u64,
}

/// One-page-at-a-time browser over the station's alert log.
#[derive(Debug)]
pub struct AlertsPager {
    limit: u32,
    /// Offset of the next page to fetch.
    offset: u32,
    filters: AlertFilters,
    rows: Vec<AlertRecord>,
    has_more: bool,
    phase: AlertsPhase,
    sort_column: Option<AlertColumn>,
    sort_ascending: bool,
    issued: u64,
    pending_append: bool,
}

impl AlertsPager {
    pub fn new(filters: AlertFilters) -> Self {
        Self {
            limit: PAGE_LIMIT,
            offset: 0,
            filters,
            rows: Vec::new(),
            has_more: false,
            phase: AlertsPhase::Loading,
            sort_column: None,
            sort_ascending: true,
            issued: 0,
            pending_append: false,
        }
    }

    pub fn rows(&self) -> &[AlertRecord] {
        &self.rows
    }

    pub fn phase(&self) -> &AlertsPhase {
        &self.phase
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn filters(&self) -> &AlertFilters {
        &self.filters
    }

    /// The active sort, as `(column, ascending)`.
    pub fn sort(&self) -> Option<(AlertColumn, bool)> {
        self.sort_column.map(|column| (column, self.sort_ascending))
    }

    /// Request the first page, discarding whatever is loaded.
    pub fn first_page(&mut self) -> (AlertTicket, AlertQuery) {
        self.offset = 0;
        self.phase = AlertsPhase::Loading;
        self.pending_append = false;
        (self.issue(), self.query())
    }

    /// Request the next page, if the station said one exists.
    pub fn load_more(&mut self) -> Option<(AlertTicket, AlertQuery)> {
        if self.phase != AlertsPhase::Loaded || !self.has_more {
            return None;
        }
        self.pending_append = true;
        Some((self.issue(), self.query()))
    }

    /// Trim back to the first page without refetching.
    ///
    /// Keeps the first `limit` rows in their current displayed order.
    /// Load-more is re-armed only when the trim actually dropped rows;
    /// a log that fit in one page keeps the station's own flag.
    pub fn reset(&mut self) {
        if self.rows.len() > self.limit as usize {
            self.rows.truncate(self.limit as usize);
            self.offset = self.limit;
            self.has_more = true;
        }
        self.phase = if self.rows.is_empty() {
            AlertsPhase::Empty
        } else {
            AlertsPhase::Loaded
        };
    }

    fn issue(&mut self) -> AlertTicket {
        self.issued += 1;
        AlertTicket { seq: self.issued }
    }

    fn query(&self) -> AlertQuery {
        let mut query = AlertQuery::page(self.limit, self.offset);
        query.start = self.filters.start.clone();
        query.end = self.filters.end.clone();
        query.level = self.filters.level.clone();
        query.source = self.filters.source.clone();
        query
    }

    /// Fold a completed fetch into the pager.
    ///
    /// Returns `false` when the ticket was superseded by a newer request,
    /// in which case nothing changes. Offsets advance only on success, so
    /// a failed page can be retried without skipping rows.
    pub fn apply<E: Display>(
        &mut self,
        ticket: AlertTicket,
        outcome: Result<AlertsPage, E>,
    ) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(seq = ticket.seq, latest = self.issued, "discarding stale alert fetch");
            return false;
        }

        match outcome {
            Ok(page) if self.pending_append => {
                if page.alerts.is_empty() {
                    // The station ran out between pages
                    self.has_more = false;
                } else {
                    self.rows.extend(page.alerts);
                    self.offset += self.limit;
                    self.has_more = page.has_more;
                }
                self.pending_append = false;
                self.phase = AlertsPhase::Loaded;
            }
            Ok(page) => {
                self.rows = page.alerts;
                self.sort_column = None;
                self.sort_ascending = true;
                if self.rows.is_empty() {
                    self.has_more = false;
                    self.phase = AlertsPhase::Empty;
                } else {
                    self.offset = self.limit;
                    self.has_more = page.has_more;
                    self.phase = AlertsPhase::Loaded;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "alert fetch failed");
                self.pending_append = false;
                self.phase = AlertsPhase::Failed(err.to_string());
            }
        }

        true
    }

    /// Sort by a column: a new column sorts ascending, the same column
    /// again flips to descending.
    pub fn sort_by(&mut self, column: AlertColumn) {
        if self.sort_column == Some(column) && self.sort_ascending {
            self.sort_ascending = false;
        } else {
            self.sort_column = Some(column);
            self.sort_ascending = true;
        }
        self.resort();
    }

    /// Move the sort to the next column, ascending.
    pub fn cycle_sort(&mut self) {
        let next = match self.sort_column {
            Some(column) => column.next(),
            None => AlertColumn::Timestamp,
        };
        self.sort_column = Some(next);
        self.sort_ascending = true;
        self.resort();
    }

    /// Flip the current sort direction.
    pub fn flip_sort(&mut self) {
        if self.sort_column.is_some() {
            self.sort_ascending = !self.sort_ascending;
            self.resort();
        }
    }

    fn resort(&mut self) {
        let Some(column) = self.sort_column else {
            return;
        };
        match column {
            AlertColumn::Timestamp => {
                self.rows.sort_by_key(|row| timestamp_key(&row.timestamp));
            }
            AlertColumn::Source => {
                self.rows.sort_by_key(|row| row.source.to_lowercase());
            }
            AlertColumn::Level => {
                self.rows.sort_by_key(|row| row.level_rank());
            }
            AlertColumn::Value => {
                self.rows.sort_by(compare_values);
            }
        }
        if !self.sort_ascending {
            self.rows.reverse();
        }
    }
}

/// Ordering key for timestamp sorting: true epoch milliseconds, with
/// unparseable stamps after everything else.
fn timestamp_key(raw: &str) -> i64 {
    crate::chart::timestamp::parse_instant_ms(raw).unwrap_or(i64::MAX)
}

/// Numbers order numerically and come before text; text orders
/// lexicographically.
fn compare_values(a: &AlertRecord, b: &AlertRecord) -> Ordering {
    match (a.numeric_value(), b.numeric_value()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.value_text().cmp(&b.value_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(timestamp: &str, source: &str, level: &str, value: serde_json::Value) -> AlertRecord {
        AlertRecord {
            timestamp: timestamp.to_string(),
            source: source.to_string(),
            level: level.to_string(),
            value,
        }
    }

    fn page_of(count: usize, has_more: bool) -> AlertsPage {
        let alerts = (0..count)
            .map(|i| {
                row(
                    &format!("2024-01-15T10:{:02}:00Z", i),
                    "system",
                    "warning",
                    json!(i as f64),
                )
            })
            .collect();
        AlertsPage { alerts, has_more }
    }

    fn ok(page: AlertsPage) -> Result<AlertsPage, String> {
        Ok(page)
    }

    // ==================== Paging ====================

    #[test]
    fn first_page_loads_and_arms_load_more() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        assert_eq!(*pager.phase(), AlertsPhase::Loading);

        let (ticket, query) = pager.first_page();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert!(!query.has_filters());

        assert!(pager.apply(ticket, ok(page_of(10, true))));
        assert_eq!(*pager.phase(), AlertsPhase::Loaded);
        assert_eq!(pager.rows().len(), 10);
        assert!(pager.has_more());
    }

    #[test]
    fn load_more_appends_at_the_next_offset() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        pager.apply(ticket, ok(page_of(10, true)));

        let (ticket, query) = pager.load_more().unwrap();
        assert_eq!(query.offset, 10);

        pager.apply(ticket, ok(page_of(4, false)));
        assert_eq!(pager.rows().len(), 14);
        assert!(!pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn empty_first_page_is_empty_not_failed() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();

        pager.apply(ticket, ok(AlertsPage::default()));
        assert_eq!(*pager.phase(), AlertsPhase::Empty);
        assert!(!pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn empty_later_page_just_disarms_load_more() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        pager.apply(ticket, ok(page_of(10, true)));

        let (ticket, _) = pager.load_more().unwrap();
        pager.apply(
            ticket,
            ok(AlertsPage {
                alerts: Vec::new(),
                has_more: true,
            }),
        );

        assert_eq!(pager.rows().len(), 10);
        assert_eq!(*pager.phase(), AlertsPhase::Loaded);
        assert!(!pager.has_more());
    }

    #[test]
    fn failed_fetch_reports_and_can_be_retried_without_skipping() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        pager.apply(ticket, ok(page_of(10, true)));

        let (ticket, first_query) = pager.load_more().unwrap();
        pager.apply(ticket, Err::<AlertsPage, _>("station unreachable".to_string()));
        assert_eq!(
            *pager.phase(),
            AlertsPhase::Failed("station unreachable".to_string())
        );

        // Retry fetches the same offset the failed request used
        pager.phase = AlertsPhase::Loaded;
        let (_, retry_query) = pager.load_more().unwrap();
        assert_eq!(retry_query.offset, first_query.offset);
    }

    #[test]
    fn stale_ticket_changes_nothing() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (old, _) = pager.first_page();
        let (new, _) = pager.first_page();

        assert!(!pager.apply(old, ok(page_of(3, false))));
        assert_eq!(*pager.phase(), AlertsPhase::Loading);
        assert!(pager.rows().is_empty());

        assert!(pager.apply(new, ok(page_of(5, false))));
        assert_eq!(pager.rows().len(), 5);
    }

    #[test]
    fn reset_trims_to_one_page_and_rearms() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        pager.apply(ticket, ok(page_of(10, true)));
        let (ticket, _) = pager.load_more().unwrap();
        pager.apply(ticket, ok(page_of(10, false)));
        assert_eq!(pager.rows().len(), 20);

        pager.reset();
        assert_eq!(pager.rows().len(), 10);
        assert!(pager.has_more());

        let (_, query) = pager.load_more().unwrap();
        assert_eq!(query.offset, 10);
    }

    #[test]
    fn reset_on_a_short_log_stays_exhausted() {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        pager.apply(ticket, ok(page_of(4, false)));

        pager.reset();
        assert_eq!(pager.rows().len(), 4);
        assert!(!pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn filters_route_through_the_search_query() {
        let filters = AlertFilters {
            level: Some("critical".to_string()),
            source: Some("camera".to_string()),
            ..Default::default()
        };
        let mut pager = AlertsPager::new(filters);

        let (_, query) = pager.first_page();
        assert!(query.has_filters());
        assert_eq!(query.route(), "/api/search_alerts");
        assert_eq!(query.level.as_deref(), Some("critical"));
    }

    // ==================== Sorting ====================

    fn loaded_pager(rows: Vec<AlertRecord>) -> AlertsPager {
        let mut pager = AlertsPager::new(AlertFilters::default());
        let (ticket, _) = pager.first_page();
        let count = rows.len();
        pager.apply(
            ticket,
            ok(AlertsPage {
                alerts: rows,
                has_more: false,
            }),
        );
        assert_eq!(pager.rows().len(), count);
        pager
    }

    #[test]
    fn sorting_same_column_twice_flips_direction() {
        let mut pager = loaded_pager(vec![
            row("2024-01-15T10:30:00Z", "b", "info", json!(1)),
            row("2024-01-14T10:30:00Z", "a", "info", json!(2)),
        ]);

        pager.sort_by(AlertColumn::Timestamp);
        assert_eq!(pager.sort(), Some((AlertColumn::Timestamp, true)));
        assert_eq!(pager.rows()[0].source, "a");

        pager.sort_by(AlertColumn::Timestamp);
        assert_eq!(pager.sort(), Some((AlertColumn::Timestamp, false)));
        assert_eq!(pager.rows()[0].source, "b");

        // A different column starts ascending again
        pager.sort_by(AlertColumn::Source);
        assert_eq!(pager.sort(), Some((AlertColumn::Source, true)));
    }

    #[test]
    fn timestamps_sort_as_instants_not_strings() {
        // 23:00+10:00 is 13:00 UTC, before 14:00Z; string order says otherwise
        let mut pager = loaded_pager(vec![
            row("2024-01-15T14:00:00Z", "second", "info", json!(1)),
            row("2024-01-15T23:00:00+10:00", "first", "info", json!(2)),
        ]);

        pager.sort_by(AlertColumn::Timestamp);
        assert_eq!(pager.rows()[0].source, "first");
        assert_eq!(pager.rows()[1].source, "second");
    }

    #[test]
    fn levels_sort_by_severity_rank() {
        let mut pager = loaded_pager(vec![
            row("t", "a", "warning", json!(1)),
            row("t", "b", "critical", json!(2)),
            row("t", "c", "info", json!(3)),
        ]);

        pager.sort_by(AlertColumn::Level);
        let levels: Vec<&str> = pager.rows().iter().map(|r| r.level.as_str()).collect();
        assert_eq!(levels, ["info", "warning", "critical"]);
    }

    #[test]
    fn values_sort_numeric_first() {
        let mut pager = loaded_pager(vec![
            row("t", "a", "info", json!("offline")),
            row("t", "b", "info", json!(10.9)),
            row("t", "c", "info", json!("2.5")),
            row("t", "d", "info", json!(3)),
        ]);

        pager.sort_by(AlertColumn::Value);
        let sources: Vec<&str> = pager.rows().iter().map(|r| r.source.as_str()).collect();
        // "2.5" coerces numerically; "offline" does not
        assert_eq!(sources, ["c", "d", "b", "a"]);
    }

    #[test]
    fn load_more_appends_without_resorting() {
        let mut pager = loaded_pager(vec![
            row("2024-01-15T10:30:00Z", "b", "info", json!(1)),
            row("2024-01-14T10:30:00Z", "a", "info", json!(2)),
        ]);
        pager.has_more = true;

        pager.sort_by(AlertColumn::Source);
        assert_eq!(pager.rows()[0].source, "a");

        let (ticket, _) = pager.load_more().unwrap();
        pager.apply(
            ticket,
            ok(AlertsPage {
                alerts: vec![row("2024-01-13T10:30:00Z", "0-first", "info", json!(3))],
                has_more: false,
            }),
        );

        // The new row lands at the end, not sorted into place
        assert_eq!(pager.rows().last().unwrap().source, "0-first");
    }

    #[test]
    fn cycle_and_flip_walk_the_columns() {
        let mut pager = loaded_pager(vec![row("t", "a", "info", json!(1))]);

        pager.cycle_sort();
        assert_eq!(pager.sort(), Some((AlertColumn::Timestamp, true)));
        pager.cycle_sort();
        assert_eq!(pager.sort(), Some((AlertColumn::Source, true)));
        pager.flip_sort();
        assert_eq!(pager.sort(), Some((AlertColumn::Source, false)));
    }
}
