//! Series construction from telemetry records.
//!
//! A window fetch yields rows of loosely-typed fields; the chart needs one
//! clean series per manifest entry. Construction is a single stateless
//! pass: bad timestamps drop the whole record, bad values drop just that
//! point, and everything else flows through in input order.

use chrono::{Local, TimeZone};
use voltwatch_types::{coerce_numeric, FieldSpec, TelemetryRecord};

use super::timestamp::normalize_in;

/// One chartable point: display-local epoch milliseconds and a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub ts_ms: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(ts_ms: i64, value: f64) -> Self {
        Self { ts_ms, value }
    }

    /// The point as `(x, y)` for the chart widget.
    pub fn xy(&self) -> (f64, f64) {
        (self.ts_ms as f64, self.value)
    }
}

/// A named series of points, in record order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build one series per manifest field from a record batch.
///
/// Uses the system's local timezone for timestamp normalization; see
/// [`build_series_in`] for the timezone-injected variant.
pub fn build_series(records: &[TelemetryRecord], fields: &[FieldSpec]) -> Vec<Series> {
    build_series_in(records, fields, &Local)
}

/// Build one series per manifest field, normalizing timestamps against an
/// explicit display timezone.
///
/// The output always has exactly one series per field, named by the
/// field's display name and in manifest order, even when a series ends up
/// empty. A record whose timestamp does not normalize contributes nothing
/// to any series; a field value that does not coerce to a finite number
/// skips only that point.
pub fn build_series_in<Tz: TimeZone>(
    records: &[TelemetryRecord],
    fields: &[FieldSpec],
    tz: &Tz,
) -> Vec<Series> {
    let mut series: Vec<Series> = fields
        .iter()
        .map(|field| Series::new(field.display_name))
        .collect();

    for record in records {
        let Some(ts_ms) = normalize_in(&record.timestamp, tz) else {
            tracing::warn!(
                timestamp = %record.timestamp,
                "skipping record with unusable timestamp"
            );
            continue;
        };

        for (index, field) in fields.iter().enumerate() {
            let Some(value) = record.value(field.field_key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match coerce_numeric(value) {
                Some(v) => series[index].points.push(SeriesPoint::new(ts_ms, v)),
                None => {
                    tracing::debug!(
                        field = field.field_key,
                        %value,
                        "skipping non-numeric value"
                    );
                }
            }
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use voltwatch_types::Page;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn record(timestamp: &str) -> TelemetryRecord {
        TelemetryRecord::new(timestamp)
    }

    #[test]
    fn one_series_per_field_in_manifest_order() {
        let series = build_series_in(&[], Page::Network.fields(), &utc());

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["RSRP", "RSRQ", "SINR"]);
        assert!(series.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn values_land_in_their_field_series() {
        let records = vec![
            record("2024-01-15T10:30:00Z")
                .with_value("volts", 13.2)
                .with_value("watts", 18.5)
                .with_value("amps", 1.4),
            record("2024-01-15T10:31:00Z")
                .with_value("volts", 13.1)
                .with_value("watts", 18.2)
                .with_value("amps", 1.3),
        ];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        assert_eq!(series[0].points.len(), 2);
        assert_eq!(series[0].points[0].value, 13.2);
        assert_eq!(series[1].points[1].value, 18.2);
        assert_eq!(series[2].points[0].value, 1.4);
    }

    #[test]
    fn bad_timestamp_drops_the_whole_record() {
        let records = vec![
            record("garbage")
                .with_value("volts", 13.2)
                .with_value("watts", 18.5),
            record("2024-01-15T10:31:00Z").with_value("volts", 13.1),
        ];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[0].points[0].value, 13.1);
        assert!(series[1].is_empty());
    }

    #[test]
    fn bad_value_drops_only_its_point() {
        let records = vec![record("2024-01-15T10:30:00Z")
            .with_value("volts", "not a number")
            .with_value("watts", 18.5)
            .with_value("amps", 1.4)];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        assert!(series[0].is_empty());
        assert_eq!(series[1].points.len(), 1);
        assert_eq!(series[2].points.len(), 1);
    }

    #[test]
    fn skip_rules_compose_across_records() {
        // First record dies on its timestamp, the second only loses volts.
        let records = vec![
            record("bad")
                .with_value("volts", 1.0)
                .with_value("watts", 2.0),
            record("2023-01-01T00:00:00")
                .with_value("volts", "x")
                .with_value("watts", 5.0),
        ];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        assert!(series[0].is_empty());
        assert_eq!(series[1].points.len(), 1);
        assert_eq!(series[1].points[0].value, 5.0);
    }

    #[test]
    fn null_and_absent_fields_are_skipped_quietly() {
        let records = vec![record("2024-01-15T10:30:00Z")
            .with_value("volts", serde_json::Value::Null)
            .with_value("watts", 18.5)];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        assert!(series[0].is_empty()); // null volts
        assert_eq!(series[1].points.len(), 1);
        assert!(series[2].is_empty()); // amps absent
    }

    #[test]
    fn numeric_strings_coerce() {
        let records = vec![record("2024-01-15T10:30:00Z").with_value("volts", "13.2")];

        let series = build_series_in(&records, Page::System.fields(), &utc());
        assert_eq!(series[0].points[0].value, 13.2);
    }

    #[test]
    fn input_order_is_preserved_without_dedup() {
        let records = vec![
            record("2024-01-15T10:30:00Z").with_value("volts", 1.0),
            record("2024-01-15T10:30:00Z").with_value("volts", 2.0),
            record("2024-01-15T10:29:00Z").with_value("volts", 3.0),
        ];

        let series = build_series_in(&records, Page::System.fields(), &utc());

        let values: Vec<f64> = series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn timestamps_shift_into_display_time() {
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        let records = vec![record("2024-01-15T10:30:00Z").with_value("volts", 13.2)];

        let shifted = build_series_in(&records, Page::System.fields(), &plus2);
        let unshifted = build_series_in(&records, Page::System.fields(), &utc());

        assert_eq!(
            shifted[0].points[0].ts_ms - unshifted[0].points[0].ts_ms,
            7_200_000
        );
    }

    #[test]
    fn point_xy_maps_for_the_chart_widget() {
        let point = SeriesPoint::new(1_705_314_600_000, 13.2);
        assert_eq!(point.xy(), (1_705_314_600_000.0, 13.2));
    }
}
