//! Alert records served by the station's alert routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce_numeric;

/// One alert row.
///
/// The station stores alerts with free-form `source` and `level` tags, so
/// both are plain strings here. `value` is whatever the alerting rule
/// recorded; usually a number, occasionally text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Raw timestamp string as served.
    #[serde(default)]
    pub timestamp: String,

    /// Which subsystem raised the alert.
    #[serde(default)]
    pub source: String,

    /// Severity tag ("critical", "warning", "info").
    #[serde(default)]
    pub level: String,

    /// The value that tripped the alert.
    #[serde(default)]
    pub value: Value,
}

impl AlertRecord {
    /// Severity as an ordering rank: critical 3, warning 2, info 1,
    /// anything else 0. Case-insensitive.
    pub fn level_rank(&self) -> u8 {
        match self.level.to_ascii_lowercase().as_str() {
            "critical" => 3,
            "warning" => 2,
            "info" => 1,
            _ => 0,
        }
    }

    /// The alert value as a finite number, when it is one.
    pub fn numeric_value(&self) -> Option<f64> {
        coerce_numeric(&self.value)
    }

    /// The alert value rendered for a table cell.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Wire body of `/api/alerts` and `/api/search_alerts`.
///
/// A populated page arrives as `{"alerts": [...], "has_more": true}`;
/// when nothing matched the station sends
/// `{"message": "No alerts available", "has_more": false}` instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertsPayload {
    /// The rows of this page, newest first.
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,

    /// Informational message when no rows matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether another page exists past this one.
    #[serde(default)]
    pub has_more: bool,
}
