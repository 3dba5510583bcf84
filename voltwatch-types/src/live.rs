//! Live readings and the cellular signal report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::lookup_value;
use crate::{coerce_numeric, SignalQuality};

/// One streamed message of instantaneous gauge values.
///
/// The station pushes the latest sample of the page's stream as a flat
/// JSON object, one message roughly every 30 seconds. When it has nothing
/// to send it pushes `{"error": "..."}` instead; both shapes decode into
/// this type.
///
/// # Example
///
/// ```rust
/// use voltwatch_types::LiveReading;
///
/// let reading: LiveReading = serde_json::from_str(
///     r#"{"timestamp": "2024-01-15T10:30:00Z", "volts": 13.2, "watts": 18.5}"#,
/// ).unwrap();
///
/// assert!(reading.error.is_none());
/// assert_eq!(reading.numeric_value("volts"), Some(13.2));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiveReading {
    /// When the station sampled these values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Present when the station had no data to send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The sampled fields, keyed by field name.
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl LiveReading {
    /// Look up a field value by key, case-insensitively.
    pub fn value(&self, field_key: &str) -> Option<&Value> {
        lookup_value(&self.values, field_key)
    }

    /// Coerce a field to a finite `f64`, same rules as telemetry records.
    pub fn numeric_value(&self, field_key: &str) -> Option<f64> {
        coerce_numeric(self.value(field_key)?)
    }

    /// Whether this message carried data rather than an error.
    pub fn has_data(&self) -> bool {
        self.error.is_none() && !self.values.is_empty()
    }
}

/// Body of the station's `/cellular` route.
///
/// A healthy answer carries the three modem metrics and a precomputed
/// quality label; failures come back as `{"status": "ERROR: ..."}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalReport {
    #[serde(default, rename = "RSRP", skip_serializing_if = "Option::is_none")]
    pub rsrp: Option<f64>,

    #[serde(default, rename = "RSRQ", skip_serializing_if = "Option::is_none")]
    pub rsrq: Option<f64>,

    #[serde(default, rename = "SINR", skip_serializing_if = "Option::is_none")]
    pub sinr: Option<f64>,

    /// Quality label the station computed ("Excellent" .. "Poor").
    #[serde(default, rename = "Quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Error status, present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SignalReport {
    /// Whether the station reported an error instead of metrics.
    pub fn is_error(&self) -> bool {
        self.status.is_some()
    }

    /// The quality label parsed into a tier, when present and known.
    pub fn parsed_quality(&self) -> Option<SignalQuality> {
        self.quality.as_deref()?.parse().ok()
    }
}
