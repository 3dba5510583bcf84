//! Cellular signal-quality scoring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::LiveReading;

/// Value the station firmware writes when the modem query failed.
pub const SIGNAL_SENTINEL: f64 = -9999.0;

/// Overall cellular link quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Label as the station reports it.
    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "Excellent",
            SignalQuality::Good => "Good",
            SignalQuality::Fair => "Fair",
            SignalQuality::Poor => "Poor",
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a quality label is not one of the four tiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown signal quality: {0}")]
pub struct UnknownQuality(pub String);

impl FromStr for SignalQuality {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(SignalQuality::Excellent),
            "good" => Ok(SignalQuality::Good),
            "fair" => Ok(SignalQuality::Fair),
            "poor" => Ok(SignalQuality::Poor),
            other => Err(UnknownQuality(other.to_string())),
        }
    }
}

// Per-metric tier scores, 4 best to 1 worst. Band edges follow the
// station's scoring tables.

fn score_rsrp(dbm: f64) -> u8 {
    if dbm > -80.0 {
        4
    } else if dbm > -90.0 {
        3
    } else if dbm > -100.0 {
        2
    } else {
        1
    }
}

fn score_rsrq(db: f64) -> u8 {
    if db > -10.0 {
        4
    } else if db > -15.0 {
        3
    } else if db > -20.0 {
        2
    } else {
        1
    }
}

fn score_sinr(db: f64) -> u8 {
    if db >= 20.0 {
        4
    } else if db >= 13.0 {
        3
    } else if db >= 0.0 {
        2
    } else {
        1
    }
}

/// Combine the three modem metrics into a quality tier.
///
/// Each metric scores 1..=4 over its band, weighted 0.5 (rsrp),
/// 0.3 (rsrq), 0.2 (sinr). The weighted score maps to a tier at
/// 3.5 / 2.5 / 1.5.
///
/// # Example
///
/// ```rust
/// use voltwatch_types::{evaluate_signal, SignalQuality};
///
/// assert_eq!(evaluate_signal(-75.0, -9.0, 21.0), SignalQuality::Excellent);
/// assert_eq!(evaluate_signal(-105.0, -25.0, -5.0), SignalQuality::Poor);
/// ```
pub fn evaluate_signal(rsrp: f64, rsrq: f64, sinr: f64) -> SignalQuality {
    let weighted = f64::from(score_rsrp(rsrp)) * 0.5
        + f64::from(score_rsrq(rsrq)) * 0.3
        + f64::from(score_sinr(sinr)) * 0.2;

    if weighted >= 3.5 {
        SignalQuality::Excellent
    } else if weighted >= 2.5 {
        SignalQuality::Good
    } else if weighted >= 1.5 {
        SignalQuality::Fair
    } else {
        SignalQuality::Poor
    }
}

/// Score a live network reading, if it carries all three metrics.
///
/// Returns `None` when any metric is missing or sits at the firmware's
/// failure sentinel.
pub fn evaluate_reading(reading: &LiveReading) -> Option<SignalQuality> {
    let rsrp = reading.numeric_value("rsrp")?;
    let rsrq = reading.numeric_value("rsrq")?;
    let sinr = reading.numeric_value("sinr")?;

    if rsrp <= SIGNAL_SENTINEL || rsrq <= SIGNAL_SENTINEL || sinr <= SIGNAL_SENTINEL {
        return None;
    }
    Some(evaluate_signal(rsrp, rsrq, sinr))
}
