//! Dashboard pages and their field manifests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field of a page's manifest: how it is labelled and which record
/// key carries its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Human-readable series name ("Volts", "RSRP").
    pub display_name: &'static str,
    /// Key to look up in a [`TelemetryRecord`](crate::TelemetryRecord).
    pub field_key: &'static str,
}

const ELECTRICAL_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        display_name: "Volts",
        field_key: "volts",
    },
    FieldSpec {
        display_name: "Watts",
        field_key: "watts",
    },
    FieldSpec {
        display_name: "Amps",
        field_key: "amps",
    },
];

const NETWORK_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        display_name: "RSRP",
        field_key: "rsrp",
    },
    FieldSpec {
        display_name: "RSRQ",
        field_key: "rsrq",
    },
    FieldSpec {
        display_name: "SINR",
        field_key: "sinr",
    },
];

/// Display bounds and unit suffix for one live gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeRange {
    /// Value rendered as an empty gauge.
    pub floor: f64,
    /// Value rendered as a full gauge.
    pub ceil: f64,
    /// Unit suffix shown next to the value.
    pub unit: &'static str,
}

impl GaugeRange {
    const fn new(floor: f64, ceil: f64, unit: &'static str) -> Self {
        Self { floor, ceil, unit }
    }

    /// Where `value` falls within the gauge, clamped to `0.0..=1.0`.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.ceil - self.floor;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.floor) / span).clamp(0.0, 1.0)
    }
}

/// A telemetry page of the dashboard.
///
/// Each page maps to one measurement stream on the station and carries a
/// static manifest of the fields it charts. The manifest drives series
/// construction and gauge layout; there is no dynamic registry to consult.
///
/// # Example
///
/// ```rust
/// use voltwatch_types::Page;
///
/// let page = Page::Network;
/// assert_eq!(page.route(), "network");
/// assert_eq!(page.fields()[0].display_name, "RSRP");
/// assert_eq!(page.gauge_range("rsrp").unwrap().unit, "dBm");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    System,
    Router,
    Camera,
    Network,
}

impl Page {
    /// All pages, in tab order.
    pub const ALL: [Page; 4] = [Page::System, Page::Router, Page::Camera, Page::Network];

    /// Tab label.
    pub fn title(&self) -> &'static str {
        match self {
            Page::System => "System",
            Page::Router => "Router",
            Page::Camera => "Camera",
            Page::Network => "Network",
        }
    }

    /// URL path segment for this page's data routes.
    pub fn route(&self) -> &'static str {
        match self {
            Page::System => "system",
            Page::Router => "router",
            Page::Camera => "camera",
            Page::Network => "network",
        }
    }

    /// The fields this page charts, in render order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Page::System | Page::Router | Page::Camera => &ELECTRICAL_FIELDS,
            Page::Network => &NETWORK_FIELDS,
        }
    }

    /// Gauge bounds for one of this page's fields, if it has any.
    ///
    /// Bounds mirror the station's preset table: electrical pages gauge
    /// volts 0-20 V, watts 0-24 W, amps 0-2 A; the network page gauges
    /// rsrp -110..-80 dBm, rsrq -30..0 dB, sinr -10..20 dB.
    pub fn gauge_range(&self, field_key: &str) -> Option<GaugeRange> {
        let key = field_key.to_ascii_lowercase();
        let range = match self {
            Page::System | Page::Router | Page::Camera => match key.as_str() {
                "volts" => GaugeRange::new(0.0, 20.0, "V"),
                "watts" => GaugeRange::new(0.0, 24.0, "W"),
                "amps" => GaugeRange::new(0.0, 2.0, "A"),
                _ => return None,
            },
            Page::Network => match key.as_str() {
                "rsrp" => GaugeRange::new(-110.0, -80.0, "dBm"),
                "rsrq" => GaugeRange::new(-30.0, 0.0, "dB"),
                "sinr" => GaugeRange::new(-10.0, 20.0, "dB"),
                _ => return None,
            },
        };
        Some(range)
    }

    /// Position of this page in [`Page::ALL`].
    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// The page after this one, wrapping around.
    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    /// The page before this one, wrapping around.
    pub fn previous(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when a page name does not match any page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Page::System),
            "router" => Ok(Page::Router),
            "camera" => Ok(Page::Camera),
            "network" => Ok(Page::Network),
            other => Err(UnknownPage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electrical_pages_share_a_manifest() {
        for page in [Page::System, Page::Router, Page::Camera] {
            let keys: Vec<&str> = page.fields().iter().map(|f| f.field_key).collect();
            assert_eq!(keys, ["volts", "watts", "amps"]);
        }
    }

    #[test]
    fn network_manifest_order() {
        let names: Vec<&str> = Page::Network
            .fields()
            .iter()
            .map(|f| f.display_name)
            .collect();
        assert_eq!(names, ["RSRP", "RSRQ", "SINR"]);
    }

    #[test]
    fn page_cycling_wraps() {
        assert_eq!(Page::System.next(), Page::Router);
        assert_eq!(Page::Network.next(), Page::System);
        assert_eq!(Page::System.previous(), Page::Network);
        assert_eq!(Page::Camera.previous(), Page::Router);
    }

    #[test]
    fn page_from_str_is_case_insensitive() {
        assert_eq!("system".parse::<Page>().unwrap(), Page::System);
        assert_eq!("Network".parse::<Page>().unwrap(), Page::Network);
        assert_eq!(" CAMERA ".parse::<Page>().unwrap(), Page::Camera);
        assert!("home".parse::<Page>().is_err());
    }

    #[test]
    fn page_serde_round_trip() {
        let json = serde_json::to_string(&Page::Router).unwrap();
        assert_eq!(json, r#""router""#);
        let page: Page = serde_json::from_str(&json).unwrap();
        assert_eq!(page, Page::Router);
    }

    #[test]
    fn gauge_ranges_match_presets() {
        let volts = Page::System.gauge_range("volts").unwrap();
        assert_eq!((volts.floor, volts.ceil, volts.unit), (0.0, 20.0, "V"));

        let rsrp = Page::Network.gauge_range("rsrp").unwrap();
        assert_eq!((rsrp.floor, rsrp.ceil, rsrp.unit), (-110.0, -80.0, "dBm"));

        assert!(Page::System.gauge_range("rsrp").is_none());
        assert!(Page::Network.gauge_range("volts").is_none());
    }

    #[test]
    fn gauge_range_lookup_is_case_insensitive() {
        assert!(Page::Network.gauge_range("RSRP").is_some());
    }

    #[test]
    fn gauge_ratio_clamps() {
        let volts = Page::System.gauge_range("volts").unwrap();
        assert_eq!(volts.ratio(10.0), 0.5);
        assert_eq!(volts.ratio(-5.0), 0.0);
        assert_eq!(volts.ratio(25.0), 1.0);

        let rsrp = Page::Network.gauge_range("rsrp").unwrap();
        assert!((rsrp.ratio(-95.0) - 0.5).abs() < 1e-9);
    }
}
