//! Telemetry records - the rows of a window fetch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single telemetry record from the station.
///
/// One record holds every field the station sampled at one timestamp.
/// The field set varies by measurement (electrical pages report
/// `volts`/`watts`/`amps`, the network page reports `rsrp`/`rsrq`/`sinr`),
/// so the fields are kept as a flattened map rather than a fixed struct.
///
/// The station serializes values loosely: a field may arrive as a JSON
/// number, a numeric string, `null`, or be absent entirely. Use
/// [`numeric_value`](Self::numeric_value) to coerce a field; it returns
/// `None` for anything that is not a finite number.
///
/// # Example
///
/// ```rust
/// use voltwatch_types::TelemetryRecord;
///
/// let record: TelemetryRecord = serde_json::from_str(
///     r#"{"timestamp": "2024-01-15T10:30:00Z", "volts": 13.2, "amps": null}"#,
/// ).unwrap();
///
/// assert_eq!(record.timestamp, "2024-01-15T10:30:00Z");
/// assert_eq!(record.numeric_value("volts"), Some(13.2));
/// assert_eq!(record.numeric_value("amps"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Raw timestamp string exactly as the station sent it.
    ///
    /// Missing timestamps deserialize to an empty string, which later
    /// fails normalization and drops the record.
    #[serde(default)]
    pub timestamp: String,

    /// All remaining fields of the record, keyed by field name.
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl TelemetryRecord {
    /// Create a record with a timestamp and no fields.
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            values: BTreeMap::new(),
        }
    }

    /// Set a field value (builder-style, mainly for tests and fixtures).
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a field value by key, case-insensitively.
    ///
    /// An exact match wins; otherwise the first key equal ignoring ASCII
    /// case is returned.
    pub fn value(&self, field_key: &str) -> Option<&Value> {
        lookup_value(&self.values, field_key)
    }

    /// Coerce a field to a finite `f64`.
    ///
    /// JSON numbers pass through. Strings are trimmed and parsed, so
    /// `"18.5"` and `" 1e3 "` coerce while `"12V"` does not. `null`,
    /// absent keys, and non-finite results are all `None`.
    pub fn numeric_value(&self, field_key: &str) -> Option<f64> {
        coerce_numeric(self.value(field_key)?)
    }
}

/// Case-insensitive key lookup shared by the flattened-map types.
pub(crate) fn lookup_value<'a>(
    values: &'a BTreeMap<String, Value>,
    field_key: &str,
) -> Option<&'a Value> {
    if let Some(v) = values.get(field_key) {
        return Some(v);
    }
    values
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(field_key))
        .map(|(_, v)| v)
}

/// Coerce a JSON value to a finite `f64`, if it is one.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Why a window payload could not yield records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The station reported an error instead of data.
    #[error("{0}")]
    Server(String),

    /// The payload carried neither an error nor a data list.
    #[error("response missing data list")]
    MissingData,
}

/// The wire envelope of a window fetch.
///
/// The station answers `/{page}/data/{window}` with either
/// `{"measurement": ..., "data": [...]}` or `{"error": "..."}`.
/// [`into_records`](Self::into_records) folds both shapes into one result;
/// an empty `data` list is a valid (empty) batch, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPayload {
    /// Error message, present when the fetch failed server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Name of the measurement the records came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,

    /// The records, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<TelemetryRecord>>,
}

impl WindowPayload {
    /// Extract the record batch, applying the error rules.
    pub fn into_records(self) -> Result<Vec<TelemetryRecord>, PayloadError> {
        if let Some(message) = self.error {
            return Err(PayloadError::Server(message));
        }
        self.data.ok_or(PayloadError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // TelemetryRecord Tests
    // ========================================================================

    #[test]
    fn record_deserializes_flattened_fields() {
        let record: TelemetryRecord = serde_json::from_str(
            r#"{"timestamp": "2024-01-15T10:30:00Z", "volts": 13.2, "watts": 18.5, "amps": 1.4}"#,
        )
        .unwrap();

        assert_eq!(record.timestamp, "2024-01-15T10:30:00Z");
        assert_eq!(record.values.len(), 3);
        assert_eq!(record.numeric_value("watts"), Some(18.5));
    }

    #[test]
    fn record_missing_timestamp_defaults_to_empty() {
        let record: TelemetryRecord = serde_json::from_str(r#"{"volts": 13.2}"#).unwrap();
        assert_eq!(record.timestamp, "");
        assert_eq!(record.numeric_value("volts"), Some(13.2));
    }

    #[test]
    fn record_value_exact_match_wins() {
        let record = TelemetryRecord::new("t")
            .with_value("volts", 1.0)
            .with_value("VOLTS", 2.0);

        assert_eq!(record.value("volts"), Some(&json!(1.0)));
    }

    #[test]
    fn record_value_is_case_insensitive() {
        let record = TelemetryRecord::new("t").with_value("RSRP", -95.0);

        assert_eq!(record.numeric_value("rsrp"), Some(-95.0));
        assert_eq!(record.numeric_value("Rsrp"), Some(-95.0));
    }

    #[test]
    fn record_value_absent_key() {
        let record = TelemetryRecord::new("t").with_value("volts", 13.2);
        assert!(record.value("watts").is_none());
        assert!(record.numeric_value("watts").is_none());
    }

    #[test]
    fn numeric_value_accepts_numeric_strings() {
        let record = TelemetryRecord::new("t")
            .with_value("watts", "18.5")
            .with_value("volts", "  12 ")
            .with_value("amps", "1e-3");

        assert_eq!(record.numeric_value("watts"), Some(18.5));
        assert_eq!(record.numeric_value("volts"), Some(12.0));
        assert_eq!(record.numeric_value("amps"), Some(0.001));
    }

    #[test]
    fn numeric_value_rejects_non_numeric() {
        let record = TelemetryRecord::new("t")
            .with_value("a", "N/A")
            .with_value("b", "12V")
            .with_value("c", Value::Null)
            .with_value("d", true)
            .with_value("e", "");

        for key in ["a", "b", "c", "d", "e"] {
            assert!(record.numeric_value(key).is_none(), "key {key}");
        }
    }

    #[test]
    fn numeric_value_rejects_non_finite() {
        // Overflowing strings parse to infinity, which is not chartable.
        let record = TelemetryRecord::new("t").with_value("v", "1e999");
        assert!(record.numeric_value("v").is_none());
    }

    #[test]
    fn coerce_numeric_negative_values() {
        assert_eq!(coerce_numeric(&json!(-95.5)), Some(-95.5));
        assert_eq!(coerce_numeric(&json!("-110")), Some(-110.0));
    }

    // ========================================================================
    // WindowPayload Tests
    // ========================================================================

    #[test]
    fn payload_with_data_yields_records() {
        let payload: WindowPayload = serde_json::from_str(
            r#"{"measurement": "system_data", "data": [
                {"timestamp": "2024-01-15T10:30:00Z", "volts": 13.2},
                {"timestamp": "2024-01-15T10:31:00Z", "volts": 13.1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(payload.measurement.as_deref(), Some("system_data"));
        let records = payload.into_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].numeric_value("volts"), Some(13.1));
    }

    #[test]
    fn payload_with_error_is_server_error() {
        let payload: WindowPayload =
            serde_json::from_str(r#"{"error": "Error fetching data: timeout"}"#).unwrap();

        assert_eq!(
            payload.into_records(),
            Err(PayloadError::Server("Error fetching data: timeout".into()))
        );
    }

    #[test]
    fn payload_error_wins_over_data() {
        let payload: WindowPayload =
            serde_json::from_str(r#"{"error": "boom", "data": []}"#).unwrap();
        assert!(matches!(
            payload.into_records(),
            Err(PayloadError::Server(_))
        ));
    }

    #[test]
    fn payload_without_data_is_missing_data() {
        let payload: WindowPayload = serde_json::from_str(r#"{"measurement": "x"}"#).unwrap();
        assert_eq!(payload.into_records(), Err(PayloadError::MissingData));
    }

    #[test]
    fn payload_with_empty_data_is_a_valid_empty_batch() {
        let payload: WindowPayload =
            serde_json::from_str(r#"{"measurement": "x", "data": []}"#).unwrap();
        assert_eq!(payload.into_records(), Ok(vec![]));
    }

    #[test]
    fn payload_error_display() {
        assert_eq!(PayloadError::Server("boom".into()).to_string(), "boom");
        assert_eq!(
            PayloadError::MissingData.to_string(),
            "response missing data list"
        );
    }
}
